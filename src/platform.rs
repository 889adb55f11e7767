//! Modifier convention of the machine the page runs on.

use serde::{Deserialize, Serialize};

/// Which physical key acts as the primary modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformMode {
    /// Command is primary, Control is secondary, Option stays Alt
    Mac,
    /// Control is primary, Control+Alt is secondary
    #[default]
    Other,
}

impl PlatformMode {
    /// Classify the host's reported platform string. Absent or unrecognised
    /// strings fall back to [`PlatformMode::Other`].
    pub fn detect(platform: Option<&str>) -> Self {
        match platform {
            Some(p) if p.contains("Mac") => PlatformMode::Mac,
            _ => PlatformMode::Other,
        }
    }

    pub fn is_mac(&self) -> bool {
        matches!(self, PlatformMode::Mac)
    }
}
