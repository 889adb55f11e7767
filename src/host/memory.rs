//! In-memory document used by the replay binary and the test suite.
//!
//! Elements are stored flat, in document order, with parent links. Every
//! command the dispatcher issues is appended to [`MemoryHost::actions`].

use super::{ElementKind, ElementRef, Host, Notification, Target};
use crate::overlay::OverlayView;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single element of the in-memory document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryElement {
    /// Index of the parent element, if any
    #[serde(default)]
    pub parent: Option<ElementRef>,
    /// Locators this element answers to
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub kind: ElementKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default = "default_true")]
    pub displayed: bool,
}

fn default_true() -> bool {
    true
}

impl MemoryElement {
    pub fn new(targets: &[Target]) -> Self {
        Self {
            parent: None,
            targets: targets.to_vec(),
            kind: ElementKind::Other,
            text: String::new(),
            value: String::new(),
            attributes: BTreeMap::new(),
            displayed: true,
        }
    }

    pub fn child_of(mut self, parent: ElementRef) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }
}

/// Commands recorded by [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "detail")]
pub enum HostAction {
    Click(ElementRef),
    Focus(ElementRef),
    Notify(ElementRef, Notification),
    ScrollIntoView(ElementRef),
    Notice(String),
    Navigate(String),
    ExecuteScript(String),
    BodyOverflow(String),
    MountOverlay,
    OverlayVisible(bool),
    FocusOverlay,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryHost {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub elements: Vec<MemoryElement>,
    #[serde(default)]
    pub focused: Option<ElementRef>,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    /// Whether fetched dialog scripts can run
    #[serde(default)]
    pub modal_constructor: bool,
    /// When set, script execution fails with this message
    #[serde(default)]
    pub script_error: Option<String>,
    #[serde(default)]
    pub body_overflow: String,
    #[serde(skip)]
    pub overlay: Option<OverlayView>,
    #[serde(skip)]
    pub overlay_visible: bool,
    #[serde(skip)]
    pub actions: Vec<HostAction>,
}

fn default_path() -> String {
    "/".to_string()
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            path: default_path(),
            ..Default::default()
        }
    }

    pub fn with_platform(mut self, platform: &str) -> Self {
        self.platform = Some(platform.to_string());
        self
    }

    pub fn at_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Append an element and return its handle.
    pub fn add(&mut self, element: MemoryElement) -> ElementRef {
        self.elements.push(element);
        ElementRef(self.elements.len() - 1)
    }

    pub fn element(&self, element: ElementRef) -> Option<&MemoryElement> {
        self.elements.get(element.0)
    }

    /// Check that parent links form a forest in document order and that the
    /// focused handle exists.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (idx, element) in self.elements.iter().enumerate() {
            if let Some(parent) = element.parent {
                if parent.0 >= idx {
                    anyhow::bail!(
                        "Element {} has parent {}; parents must precede their children",
                        idx,
                        parent.0
                    );
                }
            }
        }
        if let Some(focused) = self.focused {
            if focused.0 >= self.elements.len() {
                anyhow::bail!("Focused element {} does not exist", focused.0);
            }
        }
        Ok(())
    }

    /// Drain the recorded actions.
    pub fn take_actions(&mut self) -> Vec<HostAction> {
        std::mem::take(&mut self.actions)
    }

    /// Elements clicked so far, in order.
    pub fn clicks(&self) -> Vec<ElementRef> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                HostAction::Click(el) => Some(*el),
                _ => None,
            })
            .collect()
    }

    /// Notices shown so far, in order.
    pub fn notices(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                HostAction::Notice(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    fn ancestors(&self, element: ElementRef) -> impl Iterator<Item = ElementRef> + '_ {
        // Bounded so a cyclic document cannot hang the walk
        std::iter::successors(Some(element), move |el| {
            self.element(*el).and_then(|e| e.parent)
        })
        .take(self.elements.len() + 1)
    }

    fn is_descendant(&self, element: ElementRef, scope: ElementRef) -> bool {
        element != scope && self.ancestors(element).any(|el| el == scope)
    }

    fn has_target(&self, element: ElementRef, target: Target) -> bool {
        self.element(element)
            .map(|e| e.targets.contains(&target))
            .unwrap_or(false)
    }
}

impl Host for MemoryHost {
    fn platform(&self) -> Option<String> {
        self.platform.clone()
    }

    fn location_path(&self) -> String {
        self.path.clone()
    }

    fn query_all(&self, scope: Option<ElementRef>, target: Target) -> Vec<ElementRef> {
        (0..self.elements.len())
            .map(ElementRef)
            .filter(|el| self.has_target(*el, target))
            .filter(|el| scope.map_or(true, |s| self.is_descendant(*el, s)))
            .collect()
    }

    fn closest(&self, element: ElementRef, target: Target) -> Option<ElementRef> {
        self.ancestors(element).find(|el| self.has_target(*el, target))
    }

    fn text(&self, element: ElementRef) -> String {
        let mut text = self
            .element(element)
            .map(|e| e.text.clone())
            .unwrap_or_default();
        for idx in 0..self.elements.len() {
            let child = ElementRef(idx);
            if self.is_descendant(child, element) {
                text.push_str(&self.elements[idx].text);
            }
        }
        text
    }

    fn value(&self, element: ElementRef) -> String {
        self.element(element)
            .map(|e| e.value.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, element: ElementRef, name: &str) -> Option<String> {
        self.element(element)
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn kind(&self, element: ElementRef) -> ElementKind {
        self.element(element).map(|e| e.kind).unwrap_or_default()
    }

    fn is_displayed(&self, element: ElementRef) -> bool {
        self.element(element).is_some()
            && self
                .ancestors(element)
                .all(|el| self.element(el).map(|e| e.displayed).unwrap_or(false))
    }

    fn focused(&self) -> Option<ElementRef> {
        self.focused
    }

    fn meta_content(&self, name: &str) -> Option<String> {
        self.meta.get(name).cloned()
    }

    fn has_modal_constructor(&self) -> bool {
        self.modal_constructor
    }

    fn body_overflow(&self) -> String {
        self.body_overflow.clone()
    }

    fn click(&mut self, element: ElementRef) {
        self.actions.push(HostAction::Click(element));
    }

    fn focus(&mut self, element: ElementRef) {
        self.focused = Some(element);
        self.actions.push(HostAction::Focus(element));
    }

    fn notify(&mut self, element: ElementRef, notification: Notification) {
        self.actions.push(HostAction::Notify(element, notification));
    }

    fn scroll_into_view(&mut self, element: ElementRef) {
        self.actions.push(HostAction::ScrollIntoView(element));
    }

    fn show_notice(&mut self, message: &str) {
        self.actions.push(HostAction::Notice(message.to_string()));
    }

    fn navigate(&mut self, href: &str) {
        self.actions.push(HostAction::Navigate(href.to_string()));
    }

    fn execute_script(&mut self, script: &str) -> Result<(), String> {
        self.actions.push(HostAction::ExecuteScript(script.to_string()));
        match &self.script_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn set_body_overflow(&mut self, value: &str) {
        self.body_overflow = value.to_string();
        self.actions.push(HostAction::BodyOverflow(value.to_string()));
    }

    fn mount_overlay(&mut self, view: &OverlayView) {
        self.overlay = Some(view.clone());
        self.actions.push(HostAction::MountOverlay);
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        self.overlay_visible = visible;
        self.actions.push(HostAction::OverlayVisible(visible));
    }

    fn focus_overlay(&mut self) {
        self.actions.push(HostAction::FocusOverlay);
    }
}
