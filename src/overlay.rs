//! Toggleable shortcuts reference overlay.
//!
//! The overlay is mounted lazily on first use and reused afterwards. Showing it
//! locks page scroll; hiding it restores whatever overflow style the body had
//! before.

use crate::host::Host;
use crate::platform::PlatformMode;
use crate::shortcuts::overlay_view;
use serde::Serialize;

/// Rendered overlay content handed to the host once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayView {
    pub title: String,
    pub subtitle: String,
    pub sections: Vec<OverlaySection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlaySection {
    pub title: String,
    pub entries: Vec<OverlayEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayEntry {
    pub combo: String,
    pub description: String,
}

/// Transient visibility state, created on first toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayState {
    pub visible: bool,
    /// Body overflow captured when the overlay was shown
    pub prior_body_overflow: Option<String>,
}

#[derive(Debug, Default)]
pub struct ShortcutsOverlay {
    state: Option<OverlayState>,
}

impl ShortcutsOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.state.as_ref().map(|s| s.visible).unwrap_or(false)
    }

    /// `None` until the overlay has been built.
    pub fn state(&self) -> Option<&OverlayState> {
        self.state.as_ref()
    }

    fn ensure_mounted<H: Host + ?Sized>(&mut self, host: &mut H, mode: PlatformMode) -> &mut OverlayState {
        self.state.get_or_insert_with(|| {
            tracing::debug!("mounting shortcuts overlay");
            host.mount_overlay(&overlay_view(mode));
            OverlayState::default()
        })
    }

    pub fn toggle<H: Host + ?Sized>(&mut self, host: &mut H, mode: PlatformMode) {
        if self.is_visible() {
            self.hide(host);
        } else {
            self.show(host, mode);
        }
    }

    pub fn show<H: Host + ?Sized>(&mut self, host: &mut H, mode: PlatformMode) {
        let state = self.ensure_mounted(host, mode);
        if state.visible {
            return;
        }
        state.prior_body_overflow = Some(host.body_overflow());
        state.visible = true;
        host.set_body_overflow("hidden");
        host.set_overlay_visible(true);
        host.focus_overlay();
    }

    /// Hide the overlay. A no-op if it was never built or is already hidden.
    pub fn hide<H: Host + ?Sized>(&mut self, host: &mut H) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !state.visible {
            return;
        }
        state.visible = false;
        host.set_overlay_visible(false);
        if let Some(prior) = state.prior_body_overflow.take() {
            host.set_body_overflow(&prior);
        }
    }
}
