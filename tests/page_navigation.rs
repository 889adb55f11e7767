//! Tests for tab switching, section scrolling, crew assignment and the
//! Shift+N precedence between dialog and page.

mod test_utils;

use keyrelay::followup::{DeferredStep, Followup};
use keyrelay::host::{ElementRef, HostAction, MemoryElement, MemoryHost, Target};
use keyrelay::shortcuts::{CommandId, Verdict};
use pretty_assertions::assert_eq;
use std::time::Duration;
use test_utils::*;
use tokio::time::Instant;

/// Card with a title element; returns the card.
fn add_card(host: &mut MemoryHost, title: &str) -> ElementRef {
    let card = host.add(MemoryElement::new(&[Target::Card]));
    host.add(
        MemoryElement::new(&[Target::CardTitle])
            .text(title)
            .child_of(card),
    );
    card
}

/// Visit dialog with Notes and Info tabs; returns (dialog, notes_tab, info_tab).
fn dialog_with_tabs(host: &mut MemoryHost) -> (ElementRef, ElementRef, ElementRef) {
    let (dialog, _) = add_dialog(host, "Visit");
    let notes = host.add(MemoryElement::new(&[Target::NotesTab]).child_of(dialog));
    let info = host.add(MemoryElement::new(&[Target::InfoTab]).child_of(dialog));
    (dialog, notes, info)
}

// ============================================================================
// Dialog tabs
// ============================================================================

#[test]
fn test_notes_tab_clicks_then_schedules_focus() {
    let mut host = MemoryHost::new();
    let (dialog, notes, _) = dialog_with_tabs(&mut host);
    let mut session = mac_session(host);

    let d = session.dispatch(&shift("KeyN"));
    assert_eq!(d.verdict, Verdict::Handled(CommandId::NotesTab));
    assert_eq!(session.host().clicks(), vec![notes]);
    assert_eq!(
        d.followup,
        Some(Followup::After {
            delay: Duration::from_millis(100),
            step: DeferredStep::FocusNoteField {
                scope: Some(dialog)
            },
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_notes_tab_focuses_field_after_render() {
    let mut host = MemoryHost::new();
    let (dialog, notes, _) = dialog_with_tabs(&mut host);
    let (field, _) = add_note_form(&mut host, Some(dialog), "");
    let mut session = mac_session(host);

    let started = Instant::now();
    session.key(&shift("KeyN")).await;

    assert!(started.elapsed() >= Duration::from_millis(100));
    assert_eq!(
        session.host().actions,
        vec![HostAction::Click(notes), HostAction::Focus(field)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_notes_tab_without_field_only_clicks() {
    let mut host = MemoryHost::new();
    let (_, notes, _) = dialog_with_tabs(&mut host);
    let mut session = mac_session(host);

    session.key(&shift("KeyN")).await;

    assert_eq!(session.host().actions, vec![HostAction::Click(notes)]);
}

#[test]
fn test_info_tab_clicks() {
    let mut host = MemoryHost::new();
    let (_, _, info) = dialog_with_tabs(&mut host);
    let mut session = mac_session(host);

    let d = session.dispatch(&shift("KeyI"));
    assert_eq!(d.verdict, Verdict::Handled(CommandId::InfoTab));
    assert!(d.followup.is_none());
    assert_eq!(session.host().clicks(), vec![info]);
}

#[test]
fn test_missing_tab_is_a_notice() {
    let mut host = MemoryHost::new();
    add_dialog(&mut host, "Request");
    let mut session = mac_session(host);

    let d = session.dispatch(&shift("KeyI"));
    assert_eq!(d.verdict, Verdict::Handled(CommandId::InfoTab));
    assert_eq!(session.host().notices(), vec!["Info tab not found."]);
}

#[test]
fn test_shift_i_outside_dialog_types_normally() {
    let mut session = mac_session(MemoryHost::new().at_path("/work_orders/7"));
    assert_eq!(session.dispatch(&shift("KeyI")).verdict, Verdict::Ignored);
}

// ============================================================================
// Page sections
// ============================================================================

#[test]
fn test_shift_n_prefers_dialog_over_job_page() {
    let mut host = MemoryHost::new().at_path("/work_orders/7");
    add_card(&mut host, "Internal notes");
    let (_, notes, _) = dialog_with_tabs(&mut host);
    let mut session = mac_session(host);

    let d = session.dispatch(&shift("KeyN"));
    assert_eq!(d.verdict, Verdict::Handled(CommandId::NotesTab));
    assert_eq!(session.host().clicks(), vec![notes]);
}

#[test]
fn test_shift_n_scrolls_to_notes_on_detail_pages() {
    for path in ["/work_orders/7", "/invoices/31", "/quotes/4"] {
        let mut host = MemoryHost::new().at_path(path);
        add_card(&mut host, "Visits");
        let notes = add_card(&mut host, "  Internal Notes ");
        let mut session = mac_session(host);

        let d = session.dispatch(&shift("KeyN"));
        assert_eq!(d.verdict, Verdict::Handled(CommandId::ScrollToNotes), "{path}");
        assert_eq!(session.host().actions, vec![HostAction::ScrollIntoView(notes)]);
    }
}

#[test]
fn test_shift_n_ignored_on_other_pages() {
    let mut session = mac_session(MemoryHost::new().at_path("/clients/3"));
    assert_eq!(session.dispatch(&shift("KeyN")).verdict, Verdict::Ignored);
}

#[test]
fn test_shift_v_scrolls_to_visits_on_job_page_only() {
    let mut host = MemoryHost::new().at_path("/work_orders/7");
    let visits = add_card(&mut host, "Visits");
    let mut session = mac_session(host);

    let d = session.dispatch(&shift("KeyV"));
    assert_eq!(d.verdict, Verdict::Handled(CommandId::ScrollToVisits));
    assert_eq!(session.host().actions, vec![HostAction::ScrollIntoView(visits)]);

    let mut host = MemoryHost::new().at_path("/invoices/31");
    add_card(&mut host, "Visits");
    let mut session = mac_session(host);
    assert_eq!(session.dispatch(&shift("KeyV")).verdict, Verdict::Ignored);
}

#[test]
fn test_missing_section_is_a_notice() {
    let mut session = mac_session(MemoryHost::new().at_path("/work_orders/7"));

    let d = session.dispatch(&shift("KeyV"));
    assert_eq!(d.verdict, Verdict::Handled(CommandId::ScrollToVisits));
    assert_eq!(session.host().notices(), vec!["Visits card not found."]);
}

// ============================================================================
// Crew assignment
// ============================================================================

#[test]
fn test_assign_crew_prefers_labelled_button() {
    let mut host = MemoryHost::new();
    let (dialog, _) = add_dialog(&mut host, "Edit Visit");
    host.add(MemoryElement::new(&[Target::CrewButtonLoose]).child_of(dialog));
    let labelled = host.add(MemoryElement::new(&[Target::CrewButtonLabelled]).child_of(dialog));
    let mut session = mac_session(host);

    let d = session.dispatch(&cmd_ctrl("KeyA"));
    assert_eq!(d.verdict, Verdict::Handled(CommandId::AssignCrew));
    assert_eq!(session.host().clicks(), vec![labelled]);
}

#[test]
fn test_assign_crew_in_edit_form_searches_document() {
    let mut host = MemoryHost::new();
    host.add(MemoryElement::new(&[Target::EditTodoForm]));
    let crew = host.add(MemoryElement::new(&[Target::CrewButton]));
    let mut session = mac_session(host);

    session.dispatch(&cmd_ctrl("KeyA"));
    assert_eq!(session.host().clicks(), vec![crew]);
}

#[test]
fn test_assign_crew_outside_dialog_is_ignored() {
    let mut host = MemoryHost::new();
    host.add(MemoryElement::new(&[Target::CrewButton]));
    let mut session = mac_session(host);

    assert_eq!(session.dispatch(&cmd_ctrl("KeyA")).verdict, Verdict::Ignored);
    assert!(session.host().clicks().is_empty());
}

#[test]
fn test_assign_crew_missing_button_is_a_notice() {
    let mut host = MemoryHost::new();
    add_dialog(&mut host, "Visit");
    let mut session = mac_session(host);

    session.dispatch(&cmd_ctrl("KeyA"));
    assert_eq!(session.host().notices(), vec!["Assign Crew button not found."]);
}
