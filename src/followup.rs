//! Work a command leaves behind after its synchronous part.
//!
//! Two kinds exist: a fixed settle delay before touching the page again, and
//! the fetch of a dialog fragment. Neither is cancellable; pressing the same
//! combo twice inside the window simply runs the follow-up twice.

use crate::error::ShortcutError;
use crate::fragment::FragmentRequest;
use crate::host::{ElementRef, Host, Target};
use crate::net::FragmentFetcher;
use std::time::Duration;

/// What to do once a settle delay has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredStep {
    /// Focus the note field inside `scope` (after a tab switch renders it)
    FocusNoteField { scope: Option<ElementRef> },
    /// Click a control (a save button after its field was flushed)
    Click(ElementRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Followup {
    After { delay: Duration, step: DeferredStep },
    Fetch(FragmentRequest),
}

impl Followup {
    /// Run the follow-up to completion against the host.
    pub async fn complete<H, F>(self, host: &mut H, fetcher: &F)
    where
        H: Host + ?Sized,
        F: FragmentFetcher,
    {
        match self {
            Followup::After { delay, step } => {
                tokio::time::sleep(delay).await;
                apply(host, step);
            }
            Followup::Fetch(request) => match fetcher.fetch(&request).await {
                Ok(script) => run_fragment(host, &request, &script),
                Err(err) => report(host, &err),
            },
        }
    }
}

fn apply<H: Host + ?Sized>(host: &mut H, step: DeferredStep) {
    match step {
        DeferredStep::FocusNoteField { scope } => match host.query(scope, Target::NoteField) {
            Some(field) => {
                tracing::debug!("focusing notes field");
                host.focus(field);
            }
            None => tracing::warn!("notes field not found after tab switch"),
        },
        DeferredStep::Click(control) => {
            tracing::debug!(?control, "clicking deferred control");
            host.click(control);
        }
    }
}

/// Execute a fetched dialog script, navigating to the href instead when the
/// page cannot run it.
fn run_fragment<H: Host + ?Sized>(host: &mut H, request: &FragmentRequest, script: &str) {
    if !host.has_modal_constructor() {
        tracing::warn!(
            href = %request.href,
            "modal constructor not available, navigating instead"
        );
        host.navigate(&request.href);
        return;
    }
    if let Err(e) = host.execute_script(script) {
        tracing::warn!(href = %request.href, error = %e, "script execution failed, navigating instead");
        host.navigate(&request.href);
    }
}

/// Surface a failure to the user and log it.
pub fn report<H: Host + ?Sized>(host: &mut H, err: &ShortcutError) {
    match err.detail() {
        Some(detail) => tracing::warn!(error = %err, detail, "shortcut failed"),
        None => tracing::warn!(error = %err, "shortcut failed"),
    }
    host.show_notice(&err.to_string());
}
