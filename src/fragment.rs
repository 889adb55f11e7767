//! Dialog-fragment commands (Edit, Text Reminder).
//!
//! The dialog's "more actions" control carries its menu as an entity-escaped
//! JSON array of HTML snippets. We decode it, pick the anchor for the
//! requested action and turn it into a [`FragmentRequest`] that
//! [`crate::followup`] fetches and runs.

use crate::context::normalize_text;
use crate::error::ShortcutError;
use crate::host::{ElementRef, Host, Target};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// Attribute holding the serialized action list.
pub const ACTIONS_ATTRIBUTE: &str = "data-action-button-actions";

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static EDIT_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"/edit\.dialog\b").unwrap());
static SMS_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"/comms/sms\.dialog\b").unwrap());

/// Which dialog a fragment command opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Edit,
    TextReminder,
}

impl FragmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            FragmentKind::Edit => "Edit",
            FragmentKind::TextReminder => "Text Reminder",
        }
    }

    fn missing_action(&self) -> ShortcutError {
        match self {
            FragmentKind::Edit => ShortcutError::TargetNotFound("Edit action"),
            FragmentKind::TextReminder => ShortcutError::TargetNotFound("Text Reminder action"),
        }
    }

    /// Whether an action link opens this kind of dialog.
    pub fn matches(&self, link: &ActionLink) -> bool {
        let href = link.href.as_deref().unwrap_or("");
        match self {
            FragmentKind::Edit => link.text.contains("edit") || EDIT_HREF.is_match(href),
            FragmentKind::TextReminder => {
                link.id.as_deref() == Some("sms")
                    || link.text.contains("text reminder")
                    || SMS_HREF.is_match(href)
            }
        }
    }
}

/// One entry of the more-actions menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLink {
    /// Normalized visible text of the whole snippet
    pub text: String,
    pub href: Option<String>,
    pub id: Option<String>,
}

/// A same-origin request for a dialog script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRequest {
    pub kind: FragmentKind,
    pub href: String,
    pub csrf_token: Option<String>,
}

/// Un-escape and parse the serialized action list.
pub fn decode_action_list(raw: &str) -> Result<Vec<String>, ShortcutError> {
    let unescaped = html_escape::decode_html_entities(raw);
    serde_json::from_str(&unescaped).map_err(|e| ShortcutError::Malformed {
        message: "Could not parse actions JSON.",
        detail: e.to_string(),
    })
}

/// Extract the anchor from an HTML snippet. Snippets without one yield `None`.
///
/// The text is that of the whole snippet, so labels outside the anchor still
/// count for matching. Comments never contribute.
pub fn parse_action(html: &str) -> Option<ActionLink> {
    let fragment = Html::parse_fragment(html);
    let anchor = fragment.select(&ANCHOR).next()?;
    let text: String = fragment.root_element().text().collect();

    Some(ActionLink {
        text: normalize_text(&text),
        href: anchor.value().attr("href").map(str::to_string),
        id: anchor.value().attr("id").map(str::to_string),
    })
}

/// The more-actions control inside `scope`, flagged button first.
fn actions_control<H: Host + ?Sized>(host: &H, scope: Option<ElementRef>) -> Option<ElementRef> {
    host.query(scope, Target::ActionButton)
        .or_else(|| host.query(scope, Target::DropdownButton))
}

/// Resolve the request for `kind` from the dialog rooted at `scope`.
pub fn locate<H: Host + ?Sized>(
    host: &H,
    scope: Option<ElementRef>,
    kind: FragmentKind,
) -> Result<FragmentRequest, ShortcutError> {
    let button =
        actions_control(host, scope).ok_or(ShortcutError::TargetNotFound("More Actions button"))?;
    let raw = host
        .attribute(button, ACTIONS_ATTRIBUTE)
        .filter(|raw| !raw.is_empty())
        .ok_or(ShortcutError::TargetNotFound("Actions list"))?;

    let snippets = decode_action_list(&raw)?;
    let links: Vec<ActionLink> = snippets.iter().filter_map(|s| parse_action(s)).collect();

    let Some(href) = links
        .iter()
        .find(|link| kind.matches(link))
        .and_then(|link| link.href.clone())
    else {
        tracing::debug!(action = kind.label(), ?links, "no matching action in menu");
        return Err(kind.missing_action());
    };

    let csrf_token = host
        .meta_content("csrf-token")
        .filter(|token| !token.is_empty());

    tracing::debug!(action = kind.label(), %href, "resolved dialog fragment");
    Ok(FragmentRequest {
        kind,
        href,
        csrf_token,
    })
}
