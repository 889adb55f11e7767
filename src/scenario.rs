//! Scripted documents and key sequences for the replay binary.

use crate::host::MemoryHost;
use crate::keys::KeyEvent;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub document: MemoryHost,
    #[serde(default)]
    pub events: Vec<KeyEvent>,
}

pub fn load(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
    let scenario: Scenario = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse scenario from {}", path.display()))?;
    scenario
        .document
        .validate()
        .with_context(|| format!("Invalid document in {}", path.display()))?;
    Ok(scenario)
}
