//! Side effects of the selected command.
//!
//! Each command runs synchronously against the host and either finishes or
//! hands back a [`Followup`]. Failures come back as [`ShortcutError`] for the
//! dispatcher to report.

mod save;

pub use save::{find_save_target, SaveTarget};

use crate::config::TimingConfig;
use crate::context::{normalize_text, Context};
use crate::error::ShortcutError;
use crate::followup::{DeferredStep, Followup};
use crate::fragment::{self, FragmentKind};
use crate::host::{ElementRef, Host, Notification, Target};
use crate::overlay::ShortcutsOverlay;
use crate::platform::PlatformMode;
use crate::shortcuts::CommandId;

/// Result of a command that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Pending(Followup),
}

/// Everything a command may touch while it runs.
pub struct Executor<'a, H: Host + ?Sized> {
    pub host: &'a mut H,
    pub ctx: &'a Context,
    pub overlay: &'a mut ShortcutsOverlay,
    pub mode: PlatformMode,
    pub timing: &'a TimingConfig,
}

impl<H: Host + ?Sized> Executor<'_, H> {
    pub fn run(&mut self, id: CommandId) -> Result<Outcome, ShortcutError> {
        match id {
            CommandId::ToggleHelp => {
                self.overlay.toggle(self.host, self.mode);
                Ok(Outcome::Done)
            }
            CommandId::CloseHelp => {
                self.overlay.hide(self.host);
                Ok(Outcome::Done)
            }
            CommandId::BlockEscapeInEditForm | CommandId::BlockChatEnter => {
                tracing::debug!(command = ?id, "suppressing host key handling");
                Ok(Outcome::Done)
            }
            CommandId::OpenEditDialog => self.open_fragment(FragmentKind::Edit),
            CommandId::OpenTextReminder => self.open_fragment(FragmentKind::TextReminder),
            CommandId::AssignCrew => self.assign_crew(),
            CommandId::ToggleMessages => {
                self.click_global(Target::MessageInboxButton, "Text message inbox button")
            }
            CommandId::ToggleActivityFeed => {
                self.click_global(Target::ActivityFeedButton, "Activity feed button")
            }
            CommandId::NotesTab => self.notes_tab(),
            CommandId::InfoTab => self.info_tab(),
            CommandId::ScrollToNotes => self.scroll_to_card("internal notes", "Internal notes card"),
            CommandId::ScrollToVisits => self.scroll_to_card("visits", "Visits card"),
            CommandId::ConfirmDeleteNote => {
                self.click_global(Target::DeleteNoteButton, "Delete button")
            }
            CommandId::SendChat => self.click_global(Target::ChatSend, "Send button"),
            CommandId::Save => self.save(),
        }
    }

    fn click_global(&mut self, target: Target, what: &'static str) -> Result<Outcome, ShortcutError> {
        let control = self
            .host
            .query(None, target)
            .ok_or(ShortcutError::TargetNotFound(what))?;
        tracing::debug!(?target, "clicking");
        self.host.click(control);
        Ok(Outcome::Done)
    }

    fn open_fragment(&mut self, kind: FragmentKind) -> Result<Outcome, ShortcutError> {
        if !self.ctx.dialog.is_visit_or_request() {
            return Err(ShortcutError::DIALOG_REQUIRED);
        }
        let request = fragment::locate(self.host, self.ctx.dialog.scope, kind)?;
        Ok(Outcome::Pending(Followup::Fetch(request)))
    }

    fn assign_crew(&mut self) -> Result<Outcome, ShortcutError> {
        let scope = self.ctx.dialog.scope;
        let button = Target::CREW_STRATEGIES
            .iter()
            .find_map(|t| self.host.query(scope, *t))
            .ok_or(ShortcutError::TargetNotFound("Assign Crew button"))?;
        self.host.click(button);
        Ok(Outcome::Done)
    }

    fn dialog_tab(&mut self, tab: Target, what: &'static str) -> Result<ElementRef, ShortcutError> {
        let tab = self
            .host
            .query(self.ctx.dialog.scope, tab)
            .ok_or(ShortcutError::TargetNotFound(what))?;
        self.host.click(tab);
        Ok(tab)
    }

    fn notes_tab(&mut self) -> Result<Outcome, ShortcutError> {
        self.dialog_tab(Target::NotesTab, "Notes tab")?;
        Ok(Outcome::Pending(Followup::After {
            delay: self.timing.tab_settle(),
            step: DeferredStep::FocusNoteField {
                scope: self.ctx.dialog.scope,
            },
        }))
    }

    fn info_tab(&mut self) -> Result<Outcome, ShortcutError> {
        self.dialog_tab(Target::InfoTab, "Info tab")?;
        Ok(Outcome::Done)
    }

    fn scroll_to_card(&mut self, title: &str, what: &'static str) -> Result<Outcome, ShortcutError> {
        let card = self
            .host
            .query_all(None, Target::CardTitle)
            .into_iter()
            .find(|t| normalize_text(&self.host.text(*t)) == title)
            .and_then(|t| self.host.closest(t, Target::Card))
            .ok_or(ShortcutError::TargetNotFound(what))?;
        self.host.scroll_into_view(card);
        Ok(Outcome::Done)
    }

    fn save(&mut self) -> Result<Outcome, ShortcutError> {
        let target = find_save_target(self.host).ok_or(ShortcutError::NoSaveTarget)?;
        tracing::debug!(?target, "save target");
        match target {
            SaveTarget::EmailSend(control)
            | SaveTarget::SmsSend(control)
            | SaveTarget::TodoSave(control) => {
                self.host.click(control);
                Ok(Outcome::Done)
            }
            SaveTarget::Note { field, save } => {
                self.host.focus(field);
                for notification in Notification::FLUSH_SEQUENCE {
                    tracing::trace!(
                        ?field,
                        event = notification.event_type(),
                        "flushing note field"
                    );
                    self.host.notify(field, notification);
                }
                Ok(Outcome::Pending(Followup::After {
                    delay: self.timing.save_settle(),
                    step: DeferredStep::Click(save),
                }))
            }
        }
    }
}
