//! Read-only probes against the host document.
//!
//! Every probe is idempotent and tolerates missing elements. [`Context::probe`]
//! takes one snapshot per classified key event; guards in the command registry
//! only ever look at that snapshot.

use crate::host::{ElementKind, ElementRef, Host, Target};
use once_cell::sync::Lazy;
use regex::Regex;

static JOB_ROUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/work_orders/\d+").unwrap());
static INVOICE_ROUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/invoices/\d+").unwrap());
static QUOTE_ROUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/quotes/\d+").unwrap());

/// Trim and lower-case text for comparison.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Which dialog, if any, is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogKind {
    #[default]
    None,
    Visit,
    Request,
    EditVisit,
    EditRequest,
    /// "Delete note?" confirmation
    DeleteConfirm,
}

impl DialogKind {
    fn from_title(title: &str) -> Self {
        match normalize_text(title).as_str() {
            "visit" => DialogKind::Visit,
            "request" => DialogKind::Request,
            "edit visit" => DialogKind::EditVisit,
            "edit request" => DialogKind::EditRequest,
            "delete note?" => DialogKind::DeleteConfirm,
            _ => DialogKind::None,
        }
    }
}

/// Snapshot of the open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialogContext {
    pub kind: DialogKind,
    /// Enclosing dialog element; `None` means lookups use the whole document
    pub scope: Option<ElementRef>,
}

impl DialogContext {
    /// Visit or Request dialog in view mode.
    pub fn is_visit_or_request(&self) -> bool {
        matches!(self.kind, DialogKind::Visit | DialogKind::Request)
    }

    /// Visit or Request dialog in view or edit mode.
    pub fn is_any_visit_or_request(&self) -> bool {
        matches!(
            self.kind,
            DialogKind::Visit | DialogKind::Request | DialogKind::EditVisit | DialogKind::EditRequest
        )
    }
}

/// Page type derived from the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageKind {
    #[default]
    Other,
    Job,
    Invoice,
    Quote,
}

impl PageKind {
    pub fn from_path(path: &str) -> Self {
        if JOB_ROUTE.is_match(path) {
            PageKind::Job
        } else if INVOICE_ROUTE.is_match(path) {
            PageKind::Invoice
        } else if QUOTE_ROUTE.is_match(path) {
            PageKind::Quote
        } else {
            PageKind::Other
        }
    }

    /// Detail pages that carry an "internal notes" card.
    pub fn has_notes_card(&self) -> bool {
        !matches!(self, PageKind::Other)
    }
}

/// Locate the open dialog by its title text.
pub fn dialog<H: Host + ?Sized>(host: &H) -> DialogContext {
    let Some(title) = host.query(None, Target::DialogTitle) else {
        return DialogContext::default();
    };
    let kind = DialogKind::from_title(&host.text(title));
    if kind == DialogKind::None {
        return DialogContext::default();
    }
    DialogContext {
        kind,
        scope: host.closest(title, Target::Dialog),
    }
}

/// True when focus is in a field that accepts typed characters.
pub fn is_user_typing<H: Host + ?Sized>(host: &H) -> bool {
    host.focused()
        .map(|el| host.kind(el).accepts_text())
        .unwrap_or(false)
}

pub fn current_page_kind<H: Host + ?Sized>(host: &H) -> PageKind {
    PageKind::from_path(&host.location_path())
}

pub fn is_edit_form_open<H: Host + ?Sized>(host: &H) -> bool {
    host.query(None, Target::EditTodoForm).is_some()
}

/// Whether `target` is a multi-line field on a page with a chat send control.
pub fn is_chat_field<H: Host + ?Sized>(host: &H, target: Option<ElementRef>) -> bool {
    target.map(|el| host.kind(el) == ElementKind::TextArea).unwrap_or(false)
        && host.query(None, Target::ChatSend).is_some()
}

/// Everything command guards may depend on, captured once per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Context {
    pub dialog: DialogContext,
    pub page: PageKind,
    pub typing: bool,
    pub edit_form_open: bool,
    pub overlay_visible: bool,
    pub in_chat_field: bool,
    pub delete_control: bool,
}

impl Context {
    pub fn probe<H: Host + ?Sized>(
        host: &H,
        event_target: Option<ElementRef>,
        overlay_visible: bool,
    ) -> Self {
        let ctx = Self {
            dialog: dialog(host),
            page: current_page_kind(host),
            typing: is_user_typing(host),
            edit_form_open: is_edit_form_open(host),
            overlay_visible,
            in_chat_field: is_chat_field(host, event_target),
            delete_control: host.query(None, Target::DeleteNoteButton).is_some(),
        };
        tracing::trace!(?ctx, "context probed");
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryElement, MemoryHost};

    fn host_with_title(title: &str) -> (MemoryHost, ElementRef) {
        let mut host = MemoryHost::new();
        let dialog = host.add(MemoryElement::new(&[Target::Dialog]));
        host.add(
            MemoryElement::new(&[Target::DialogTitle])
                .text(title)
                .child_of(dialog),
        );
        (host, dialog)
    }

    #[test]
    fn test_title_is_normalized() {
        let (host, dialog) = host_with_title("  Visit \n");
        let ctx = super::dialog(&host);
        assert_eq!(ctx.kind, DialogKind::Visit);
        assert_eq!(ctx.scope, Some(dialog));
    }

    #[test]
    fn test_edit_titles_are_recognized() {
        let (host, _) = host_with_title("Edit Request");
        assert_eq!(super::dialog(&host).kind, DialogKind::EditRequest);
        assert!(super::dialog(&host).is_any_visit_or_request());
        assert!(!super::dialog(&host).is_visit_or_request());
    }

    #[test]
    fn test_unknown_title_is_no_dialog() {
        let (host, _) = host_with_title("Client details");
        assert_eq!(super::dialog(&host), DialogContext::default());
        assert!(!super::dialog(&host).is_any_visit_or_request());
    }

    #[test]
    fn test_no_title_is_no_dialog() {
        let host = MemoryHost::new();
        assert_eq!(super::dialog(&host).kind, DialogKind::None);
    }

    #[test]
    fn test_page_routes_require_numeric_id() {
        assert_eq!(PageKind::from_path("/work_orders/123"), PageKind::Job);
        assert_eq!(PageKind::from_path("/invoices/9/edit"), PageKind::Invoice);
        assert_eq!(PageKind::from_path("/quotes/77"), PageKind::Quote);
        assert_eq!(PageKind::from_path("/work_orders/new"), PageKind::Other);
        assert_eq!(PageKind::from_path("/clients/5"), PageKind::Other);
    }

    #[test]
    fn test_typing_detection_by_focus_kind() {
        let mut host = MemoryHost::new();
        let input = host.add(MemoryElement::new(&[]).kind(ElementKind::Input));
        let editable = host.add(MemoryElement::new(&[]).kind(ElementKind::Editable));
        let button = host.add(MemoryElement::new(&[]));

        assert!(!is_user_typing(&host));
        host.focused = Some(input);
        assert!(is_user_typing(&host));
        host.focused = Some(editable);
        assert!(is_user_typing(&host));
        host.focused = Some(button);
        assert!(!is_user_typing(&host));
    }

    #[test]
    fn test_chat_field_requires_textarea_and_send_control() {
        let mut host = MemoryHost::new();
        let textarea = host.add(MemoryElement::new(&[]).kind(ElementKind::TextArea));
        assert!(!is_chat_field(&host, Some(textarea)));

        host.add(MemoryElement::new(&[Target::ChatSend]));
        assert!(is_chat_field(&host, Some(textarea)));
        assert!(!is_chat_field(&host, None));
    }
}
