//! The host page surface the dispatcher reads from and acts on.
//!
//! Everything page-specific lives behind [`Host`]: element lookups are phrased
//! as semantic [`Target`]s and the host decides how to find them. A browser
//! binding resolves each target with [`Target::selector`]; tests and the replay
//! binary use [`MemoryHost`].

mod memory;
mod target;

pub use memory::{HostAction, MemoryElement, MemoryHost};
pub use target::Target;

use crate::overlay::OverlayView;
use serde::{Deserialize, Serialize};

/// Opaque handle naming an element owned by the host document.
///
/// Handles are lookups, not ownership: they are only meaningful for the
/// duration of one command and the follow-up it schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(pub usize);

/// Coarse element classification used by the typing guard and chat detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Input,
    TextArea,
    Select,
    /// Any element with `contenteditable` set.
    Editable,
    #[default]
    Other,
}

impl ElementKind {
    /// Whether focus on this kind of element means the user is typing.
    pub fn accepts_text(&self) -> bool {
        !matches!(self, ElementKind::Other)
    }
}

/// Synthetic notifications dispatched on a note field before saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notification {
    Input,
    Change,
    KeyUp,
    Blur,
}

impl Notification {
    /// The order the host page's validators expect to see them in.
    pub const FLUSH_SEQUENCE: [Notification; 4] = [
        Notification::Input,
        Notification::Change,
        Notification::KeyUp,
        Notification::Blur,
    ];

    pub fn event_type(&self) -> &'static str {
        match self {
            Notification::Input => "input",
            Notification::Change => "change",
            Notification::KeyUp => "keyup",
            Notification::Blur => "blur",
        }
    }
}

/// Query and command surface of the live document.
///
/// Queries must tolerate absent elements by returning `None`, `false` or an
/// empty value; they never fail.
pub trait Host {
    /// Platform string reported by the host (`navigator.platform`).
    fn platform(&self) -> Option<String>;

    /// Path component of the current URL.
    fn location_path(&self) -> String;

    /// All elements matching `target`, in document order. `scope` restricts the
    /// search to descendants of that element; `None` searches the document.
    fn query_all(&self, scope: Option<ElementRef>, target: Target) -> Vec<ElementRef>;

    /// First element matching `target` within `scope`.
    fn query(&self, scope: Option<ElementRef>, target: Target) -> Option<ElementRef> {
        self.query_all(scope, target).into_iter().next()
    }

    /// Nearest inclusive ancestor of `element` matching `target`.
    fn closest(&self, element: ElementRef, target: Target) -> Option<ElementRef>;

    /// Text content of the element and its descendants.
    fn text(&self, element: ElementRef) -> String;

    /// Current value of a form control; empty for other elements.
    fn value(&self, element: ElementRef) -> String;

    fn attribute(&self, element: ElementRef, name: &str) -> Option<String>;

    fn kind(&self, element: ElementRef) -> ElementKind;

    /// False when the element or any ancestor is not rendered.
    fn is_displayed(&self, element: ElementRef) -> bool;

    fn focused(&self) -> Option<ElementRef>;

    /// Content of `<meta name="...">`.
    fn meta_content(&self, name: &str) -> Option<String>;

    /// Whether the page's own modal constructor is loaded, which fetched
    /// dialog scripts depend on.
    fn has_modal_constructor(&self) -> bool;

    /// Inline `overflow` style of the document body.
    fn body_overflow(&self) -> String;

    fn click(&mut self, element: ElementRef);

    fn focus(&mut self, element: ElementRef);

    /// Dispatch a bubbling synthetic event on the element.
    fn notify(&mut self, element: ElementRef, notification: Notification);

    /// Smooth-scroll the element to the top of the viewport.
    fn scroll_into_view(&mut self, element: ElementRef);

    /// Show a non-blocking, user-visible message.
    fn show_notice(&mut self, message: &str);

    fn navigate(&mut self, href: &str);

    /// Run a fetched script in the page's scripting context.
    fn execute_script(&mut self, script: &str) -> Result<(), String>;

    fn set_body_overflow(&mut self, value: &str);

    /// Attach the shortcuts overlay to the document. Called once per session.
    fn mount_overlay(&mut self, view: &OverlayView);

    fn set_overlay_visible(&mut self, visible: bool);

    fn focus_overlay(&mut self);
}
