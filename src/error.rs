//! Failures a shortcut can report to the user.
//!
//! None of these are fatal: the dispatcher turns each into a notice on the
//! host page and keeps listening. `Display` is the text the user sees.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    /// The page is not in a state where the shortcut makes sense.
    #[error("{0}")]
    Precondition(&'static str),

    /// A control the shortcut needs is missing from the page.
    #[error("{0} not found.")]
    TargetNotFound(&'static str),

    /// Embedded page data could not be decoded. `detail` is logged only.
    #[error("{message}")]
    Malformed {
        message: &'static str,
        detail: String,
    },

    /// The fragment request or its execution failed.
    #[error("Could not open {action}: {reason}")]
    Remote { action: &'static str, reason: String },

    #[error("No save target found on this page.")]
    NoSaveTarget,
}

impl ShortcutError {
    pub const DIALOG_REQUIRED: ShortcutError =
        ShortcutError::Precondition("Open the Visit or Request modal first.");

    /// Diagnostic detail intended for the log rather than the user.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ShortcutError::Malformed { detail, .. } => Some(detail),
            _ => None,
        }
    }
}
