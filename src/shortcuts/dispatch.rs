//! Dispatch logic using the shortcuts registry.
//!
//! Every key event goes through the same pipeline: classify it into a combo,
//! snapshot the page context, pick the first registry entry that applies and
//! run it. At most one command runs per event.

use super::registry::COMMANDS;
use super::{Command, CommandId};
use crate::config::TimingConfig;
use crate::context::Context;
use crate::executor::{Executor, Outcome};
use crate::followup::{report, Followup};
use crate::host::Host;
use crate::keys::{classify, Combo, KeyEvent, KeyPhase};
use crate::overlay::ShortcutsOverlay;
use crate::platform::PlatformMode;

/// What the host listener must do with the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Leave the event to the page.
    Ignored,
    /// Call `preventDefault`, `stopPropagation` and `stopImmediatePropagation`.
    Handled(CommandId),
}

impl Verdict {
    pub fn is_handled(&self) -> bool {
        matches!(self, Verdict::Handled(_))
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub verdict: Verdict,
    /// Asynchronous remainder of the command, if any
    pub followup: Option<Followup>,
}

impl Dispatch {
    fn ignored() -> Self {
        Self {
            verdict: Verdict::Ignored,
            followup: None,
        }
    }
}

/// First registry entry applying to the event, in priority order.
pub fn select(
    phase: KeyPhase,
    combo: &Combo,
    mode: PlatformMode,
    ctx: &Context,
) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.applies(phase, combo, mode, ctx))
}

/// Session-long dispatcher state: the platform convention and the overlay.
#[derive(Debug)]
pub struct Dispatcher {
    mode: PlatformMode,
    timing: TimingConfig,
    overlay: ShortcutsOverlay,
}

impl Dispatcher {
    pub fn new(mode: PlatformMode, timing: TimingConfig) -> Self {
        Self {
            mode,
            timing,
            overlay: ShortcutsOverlay::new(),
        }
    }

    pub fn mode(&self) -> PlatformMode {
        self.mode
    }

    pub fn overlay(&self) -> &ShortcutsOverlay {
        &self.overlay
    }

    /// Handle one key event from the capture-phase listener.
    pub fn handle<H: Host + ?Sized>(&mut self, host: &mut H, event: &KeyEvent) -> Dispatch {
        let Some(combo) = classify(event, self.mode) else {
            return Dispatch::ignored();
        };

        let ctx = Context::probe(host, event.target, self.overlay.is_visible());
        let Some(command) = select(event.phase, &combo, self.mode, &ctx) else {
            tracing::trace!(?combo, "no shortcut applies");
            return Dispatch::ignored();
        };
        tracing::debug!(command = ?command.id, phase = ?event.phase, "shortcut matched");

        let mut executor = Executor {
            host: &mut *host,
            ctx: &ctx,
            overlay: &mut self.overlay,
            mode: self.mode,
            timing: &self.timing,
        };
        let followup = match executor.run(command.id) {
            Ok(Outcome::Done) => None,
            Ok(Outcome::Pending(followup)) => Some(followup),
            Err(err) => {
                report(host, &err);
                None
            }
        };

        Dispatch {
            verdict: Verdict::Handled(command.id),
            followup,
        }
    }

    /// Close the overlay from one of its own controls (backdrop, close glyph).
    pub fn close_overlay<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.overlay.hide(host);
    }
}
