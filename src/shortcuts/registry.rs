//! Static registry of all shortcuts.
//!
//! Order is priority: the first entry whose trigger, phase and guard all match
//! wins. Combos that stay ambiguous until context is known (Shift+N, the
//! primary+Enter cascade, Escape) are split into consecutive entries.

use super::{Command, CommandId, Section};
use crate::context::{Context, DialogKind, PageKind};
use crate::keys::{Key, KeyPhase, Trigger};

const KEYDOWN: &[KeyPhase] = &[KeyPhase::Down];
const ALL_PHASES: &[KeyPhase] = &[KeyPhase::Down, KeyPhase::Up, KeyPhase::Press];
const DOWN_AND_PRESS: &[KeyPhase] = &[KeyPhase::Down, KeyPhase::Press];

fn always(_: &Context) -> bool {
    true
}

fn overlay_visible(ctx: &Context) -> bool {
    ctx.overlay_visible
}

fn edit_form_unobscured(ctx: &Context) -> bool {
    ctx.edit_form_open && !ctx.overlay_visible
}

fn composing_chat(ctx: &Context) -> bool {
    ctx.in_chat_field
}

fn crew_assignable(ctx: &Context) -> bool {
    ctx.dialog.is_any_visit_or_request() || ctx.edit_form_open
}

fn dialog_tabs(ctx: &Context) -> bool {
    !ctx.typing && ctx.dialog.is_visit_or_request()
}

fn notes_card_page(ctx: &Context) -> bool {
    !ctx.typing && ctx.page.has_notes_card()
}

fn job_page(ctx: &Context) -> bool {
    !ctx.typing && ctx.page == PageKind::Job
}

fn delete_confirmation(ctx: &Context) -> bool {
    ctx.dialog.kind == DialogKind::DeleteConfirm && ctx.delete_control
}

/// All shortcuts, highest priority first.
pub static COMMANDS: &[Command] = &[
    // ═══════════════════════════════════════════════════════════════════════════
    // OVERLAY AND SUPPRESSIONS
    // ═══════════════════════════════════════════════════════════════════════════
    Command {
        id: CommandId::CloseHelp,
        trigger: Trigger::Bare(Key::Escape),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: overlay_visible,
        description: "Close this shortcuts reference",
        section: Section::Global,
        show_in_help: false,
    },
    Command {
        id: CommandId::ToggleHelp,
        trigger: Trigger::Primary(Key::K),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: always,
        description: "Show this shortcuts reference",
        section: Section::Global,
        show_in_help: true,
    },
    Command {
        id: CommandId::BlockEscapeInEditForm,
        trigger: Trigger::Bare(Key::Escape),
        alternatives: &[Trigger::Shift(Key::Escape), Trigger::Alt(Key::Escape)],
        phases: ALL_PHASES,
        applies_when: edit_form_unobscured,
        description: "Keep the edit form open on Escape",
        section: Section::VisitEdit,
        show_in_help: false,
    },
    Command {
        id: CommandId::BlockChatEnter,
        trigger: Trigger::Bare(Key::Enter),
        alternatives: &[Trigger::Alt(Key::Enter)],
        phases: DOWN_AND_PRESS,
        applies_when: composing_chat,
        description: "Enter adds a line instead of sending",
        section: Section::Global,
        show_in_help: false,
    },
    // ═══════════════════════════════════════════════════════════════════════════
    // VISIT / REQUEST DIALOG
    // ═══════════════════════════════════════════════════════════════════════════
    Command {
        id: CommandId::OpenEditDialog,
        trigger: Trigger::PrimarySecondary(Key::E),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: always,
        description: "Open visit Edit dialog",
        section: Section::VisitRequest,
        show_in_help: true,
    },
    Command {
        id: CommandId::OpenTextReminder,
        trigger: Trigger::PrimarySecondary(Key::T),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: always,
        description: "Open Text Reminder dialog",
        section: Section::VisitRequest,
        show_in_help: true,
    },
    Command {
        id: CommandId::AssignCrew,
        trigger: Trigger::PrimarySecondary(Key::A),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: crew_assignable,
        description: "Assign crew",
        section: Section::VisitEdit,
        show_in_help: true,
    },
    // ═══════════════════════════════════════════════════════════════════════════
    // SIDE PANELS
    // ═══════════════════════════════════════════════════════════════════════════
    Command {
        id: CommandId::ToggleMessages,
        trigger: Trigger::PrimaryOption(Key::Backslash),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: always,
        description: "Toggle 'Messages' side panel",
        section: Section::Global,
        show_in_help: true,
    },
    Command {
        id: CommandId::ToggleActivityFeed,
        trigger: Trigger::Primary(Key::Backslash),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: always,
        description: "Toggle 'Activity Feed' side panel",
        section: Section::Global,
        show_in_help: true,
    },
    // ═══════════════════════════════════════════════════════════════════════════
    // TABS AND SECTIONS (never while typing)
    // ═══════════════════════════════════════════════════════════════════════════
    Command {
        id: CommandId::NotesTab,
        trigger: Trigger::Shift(Key::N),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: dialog_tabs,
        description: "Switch to Notes tab",
        section: Section::VisitRequest,
        show_in_help: true,
    },
    Command {
        id: CommandId::ScrollToNotes,
        trigger: Trigger::Shift(Key::N),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: notes_card_page,
        description: "Scroll to Internal Notes section",
        section: Section::JobPage,
        show_in_help: true,
    },
    Command {
        id: CommandId::InfoTab,
        trigger: Trigger::Shift(Key::I),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: dialog_tabs,
        description: "Switch to Info tab",
        section: Section::VisitRequest,
        show_in_help: true,
    },
    Command {
        id: CommandId::ScrollToVisits,
        trigger: Trigger::Shift(Key::V),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: job_page,
        description: "Scroll to Visits section",
        section: Section::JobPage,
        show_in_help: true,
    },
    // ═══════════════════════════════════════════════════════════════════════════
    // PRIMARY + ENTER CASCADE
    // ═══════════════════════════════════════════════════════════════════════════
    Command {
        id: CommandId::ConfirmDeleteNote,
        trigger: Trigger::Primary(Key::Enter),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: delete_confirmation,
        description: "Confirm note deletion",
        section: Section::Global,
        show_in_help: false,
    },
    Command {
        id: CommandId::SendChat,
        trigger: Trigger::Primary(Key::Enter),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: composing_chat,
        description: "Send chat message",
        section: Section::Global,
        show_in_help: false,
    },
    Command {
        id: CommandId::Save,
        trigger: Trigger::Primary(Key::Enter),
        alternatives: &[],
        phases: KEYDOWN,
        applies_when: always,
        description: "Click Save button in visit modals, notes, or email forms",
        section: Section::Global,
        show_in_help: true,
    },
];
