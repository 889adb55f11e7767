//! Generic save cascade behind primary+Enter.
//!
//! Search order, first hit wins:
//! 1. send button of a visible email compose dialog
//! 2. send button of a visible SMS compose dialog
//! 3. the to-do form's save button
//! 4. a note field paired with its save button, preferring one inside a
//!    visible dialog, then the focused one, then one with text, then the first
//!    visible one

use crate::host::{ElementRef, Host, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    EmailSend(ElementRef),
    SmsSend(ElementRef),
    TodoSave(ElementRef),
    Note { field: ElementRef, save: ElementRef },
}

/// Send control inside the first visible compose dialog of the given kind.
fn compose_send<H: Host + ?Sized>(host: &H, dialog: Target, send: Target) -> Option<ElementRef> {
    host.query_all(None, dialog)
        .into_iter()
        .filter(|d| host.is_displayed(*d))
        .find_map(|d| host.query(Some(d), send))
}

/// Pair a note field with the save button of its visible container.
fn note_pair<H: Host + ?Sized>(host: &H, field: ElementRef) -> Option<(ElementRef, ElementRef)> {
    let container = host.closest(field, Target::NoteContainer)?;
    if !host.is_displayed(container) {
        return None;
    }
    let save = host.query(Some(container), Target::NoteSave)?;
    Some((field, save))
}

fn note_in_visible_dialog<H: Host + ?Sized>(host: &H) -> Option<(ElementRef, ElementRef)> {
    host.query_all(None, Target::Dialog)
        .into_iter()
        .filter(|d| host.is_displayed(*d))
        .flat_map(|d| host.query_all(Some(d), Target::NoteContainer))
        .filter(|c| host.is_displayed(*c))
        .find_map(|c| {
            let field = host.query(Some(c), Target::NoteField)?;
            let save = host.query(Some(c), Target::NoteSave)?;
            Some((field, save))
        })
}

fn note_target<H: Host + ?Sized>(host: &H) -> Option<(ElementRef, ElementRef)> {
    if let Some(pair) = note_in_visible_dialog(host) {
        tracing::debug!(field = ?pair.0, "note field in dialog");
        return Some(pair);
    }

    let fields = host.query_all(None, Target::NoteField);
    let focused = host.focused();

    let by_focus = fields
        .iter()
        .filter(|f| Some(**f) == focused)
        .find_map(|f| note_pair(host, *f));
    if by_focus.is_some() {
        tracing::debug!("focused note field");
        return by_focus;
    }

    let with_text = fields
        .iter()
        .filter(|f| !host.value(**f).trim().is_empty())
        .find_map(|f| note_pair(host, *f));
    if with_text.is_some() {
        tracing::debug!("note field with content");
        return with_text;
    }

    let first_visible = fields.iter().find_map(|f| note_pair(host, *f));
    if first_visible.is_some() {
        tracing::debug!("first visible note field");
    }
    first_visible
}

/// Find what primary+Enter should save, if anything.
pub fn find_save_target<H: Host + ?Sized>(host: &H) -> Option<SaveTarget> {
    if let Some(send) = compose_send(host, Target::EmailDialog, Target::EmailSend) {
        return Some(SaveTarget::EmailSend(send));
    }
    if let Some(send) = compose_send(host, Target::SmsDialog, Target::SmsSend) {
        return Some(SaveTarget::SmsSend(send));
    }
    if let Some(save) = host.query(None, Target::TodoSave) {
        return Some(SaveTarget::TodoSave(save));
    }
    note_target(host).map(|(field, save)| SaveTarget::Note { field, save })
}
