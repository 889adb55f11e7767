//! Test utilities and fixtures for keyrelay tests

#![allow(dead_code)]

use keyrelay::config::Config;
use keyrelay::error::ShortcutError;
use keyrelay::fragment::{FragmentRequest, ACTIONS_ATTRIBUTE};
use keyrelay::host::{ElementKind, ElementRef, MemoryElement, MemoryHost, Target};
use keyrelay::keys::{KeyEvent, Modifiers};
use keyrelay::net::FragmentFetcher;
use keyrelay::session::Session;
use std::cell::RefCell;

/// Fetcher that records every request and answers with a canned result.
pub struct RecordingFetcher {
    pub requests: RefCell<Vec<FragmentRequest>>,
    pub response: Result<String, String>,
}

impl RecordingFetcher {
    pub fn ok(body: &str) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            response: Ok(body.to_string()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            response: Err(reason.to_string()),
        }
    }
}

impl FragmentFetcher for RecordingFetcher {
    async fn fetch(&self, request: &FragmentRequest) -> Result<String, ShortcutError> {
        self.requests.borrow_mut().push(request.clone());
        self.response.clone().map_err(|reason| ShortcutError::Remote {
            action: request.kind.label(),
            reason,
        })
    }
}

pub type TestSession = Session<MemoryHost, RecordingFetcher>;

pub fn mac_session(host: MemoryHost) -> TestSession {
    Session::new(host.with_platform("MacIntel"), RecordingFetcher::ok("dialogBox.open()"), &Config::default())
}

pub fn windows_session(host: MemoryHost) -> TestSession {
    Session::new(host.with_platform("Win32"), RecordingFetcher::ok("dialogBox.open()"), &Config::default())
}

pub fn session_with(host: MemoryHost, fetcher: RecordingFetcher) -> TestSession {
    Session::new(host.with_platform("MacIntel"), fetcher, &Config::default())
}

/// Keydown event with the given modifiers.
pub fn key(code: &str, modifiers: Modifiers) -> KeyEvent {
    KeyEvent::down(code, modifiers)
}

pub fn cmd(code: &str) -> KeyEvent {
    key(code, Modifiers::META)
}

pub fn cmd_ctrl(code: &str) -> KeyEvent {
    key(code, Modifiers::META | Modifiers::CTRL)
}

pub fn shift(code: &str) -> KeyEvent {
    key(code, Modifiers::SHIFT)
}

/// Dialog with a title; returns (dialog, title).
pub fn add_dialog(host: &mut MemoryHost, title: &str) -> (ElementRef, ElementRef) {
    let dialog = host.add(MemoryElement::new(&[Target::Dialog]));
    let title = host.add(
        MemoryElement::new(&[Target::DialogTitle])
            .text(title)
            .child_of(dialog),
    );
    (dialog, title)
}

/// Entity-escaped action list the way the page embeds it.
pub fn escaped_actions(snippets: &[&str]) -> String {
    let json = serde_json::to_string(snippets).unwrap();
    json.replace('&', "&amp;").replace('"', "&quot;")
}

/// More-actions button carrying the given action snippets.
pub fn add_actions_button(host: &mut MemoryHost, dialog: ElementRef, snippets: &[&str]) -> ElementRef {
    host.add(
        MemoryElement::new(&[Target::ActionButton])
            .attr(ACTIONS_ATTRIBUTE, escaped_actions(snippets))
            .child_of(dialog),
    )
}

/// Note container with field and save button; returns (field, save).
pub fn add_note_form(
    host: &mut MemoryHost,
    parent: Option<ElementRef>,
    value: &str,
) -> (ElementRef, ElementRef) {
    let mut container = MemoryElement::new(&[Target::NoteContainer]);
    if let Some(p) = parent {
        container = container.child_of(p);
    }
    let container = host.add(container);
    let field = host.add(
        MemoryElement::new(&[Target::NoteField])
            .kind(ElementKind::TextArea)
            .value(value)
            .child_of(container),
    );
    let save = host.add(MemoryElement::new(&[Target::NoteSave]).child_of(container));
    (field, save)
}

/// Text input, focused.
pub fn focus_text_input(host: &mut MemoryHost) -> ElementRef {
    let input = host.add(MemoryElement::new(&[]).kind(ElementKind::Input));
    host.focused = Some(input);
    input
}
