//! Centralized shortcut table.
//!
//! The registry is the single source of truth: dispatch walks it in order and
//! the help overlay is rendered from it.

mod dispatch;
mod help;
mod registry;

pub use dispatch::{select, Dispatch, Dispatcher, Verdict};
pub use help::overlay_view;
pub use registry::COMMANDS;

use crate::context::Context;
use crate::keys::{Combo, KeyPhase, Trigger};
use crate::platform::PlatformMode;

/// Identity of every built-in command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    CloseHelp,
    ToggleHelp,
    BlockEscapeInEditForm,
    BlockChatEnter,
    OpenEditDialog,
    OpenTextReminder,
    AssignCrew,
    ToggleMessages,
    ToggleActivityFeed,
    NotesTab,
    ScrollToNotes,
    InfoTab,
    ScrollToVisits,
    ConfirmDeleteNote,
    SendChat,
    Save,
}

/// Help overlay grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Global,
    VisitRequest,
    VisitEdit,
    JobPage,
}

impl Section {
    /// Display order in the overlay.
    pub const ALL: [Section; 4] = [
        Section::Global,
        Section::VisitRequest,
        Section::VisitEdit,
        Section::JobPage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Global => "Global",
            Section::VisitRequest => "Visit / Request Modals",
            Section::VisitEdit => "Visit Edit Mode",
            Section::JobPage => "Job Page",
        }
    }
}

/// A registry entry.
#[derive(Clone)]
pub struct Command {
    pub id: CommandId,
    pub trigger: Trigger,
    /// Further triggers that select the same command
    pub alternatives: &'static [Trigger],
    /// Key phases the command listens on
    pub phases: &'static [KeyPhase],
    /// Context guard; the command is skipped when it returns false
    pub applies_when: fn(&Context) -> bool,
    pub description: &'static str,
    pub section: Section,
    /// False for suppressions and internal bindings
    pub show_in_help: bool,
}

impl Command {
    /// Whether this entry applies to a classified event in the given context.
    pub fn applies(&self, phase: KeyPhase, combo: &Combo, mode: PlatformMode, ctx: &Context) -> bool {
        self.phases.contains(&phase)
            && self.triggers().any(|t| t.matches(combo, mode))
            && (self.applies_when)(ctx)
    }

    pub fn triggers(&self) -> impl Iterator<Item = &Trigger> {
        std::iter::once(&self.trigger).chain(self.alternatives.iter())
    }
}
