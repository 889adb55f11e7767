//! Render the shortcuts reference from the registry.

use super::registry::COMMANDS;
use super::{Command, CommandId, Section};
use crate::overlay::{OverlayEntry, OverlaySection, OverlayView};
use crate::platform::PlatformMode;

/// Format a command's triggers for display (primary + alternatives).
fn format_triggers(command: &Command, mode: PlatformMode) -> String {
    command
        .triggers()
        .map(|t| t.label(mode))
        .collect::<Vec<_>>()
        .join(" / ")
}

fn toggle_label(mode: PlatformMode) -> String {
    COMMANDS
        .iter()
        .find(|c| c.id == CommandId::ToggleHelp)
        .map(|c| format_triggers(c, mode))
        .unwrap_or_default()
}

/// Build the overlay content for the given platform, grouped by section.
pub fn overlay_view(mode: PlatformMode) -> OverlayView {
    let sections = Section::ALL
        .iter()
        .filter_map(|section| {
            let entries: Vec<OverlayEntry> = COMMANDS
                .iter()
                .filter(|c| c.section == *section && c.show_in_help)
                .map(|c| OverlayEntry {
                    combo: format_triggers(c, mode),
                    description: c.description.to_string(),
                })
                .collect();
            if entries.is_empty() {
                None
            } else {
                Some(OverlaySection {
                    title: section.label().to_string(),
                    entries,
                })
            }
        })
        .collect();

    OverlayView {
        title: "Keyboard Shortcuts".to_string(),
        subtitle: format!("Press {} again to close", toggle_label(mode)),
        sections,
    }
}
