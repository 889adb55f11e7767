use serde::{Deserialize, Serialize};

/// Every element the dispatcher ever needs to find on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Title element of the open dialog
    DialogTitle,
    /// Any open dialog or modal container
    Dialog,
    /// The flagged "more actions" dropdown carrying the action list
    ActionButton,
    /// Fallback dropdown trigger inside a dialog
    DropdownButton,
    NotesTab,
    InfoTab,
    /// Note-editing text field
    NoteField,
    /// Container pairing a note field with its save control
    NoteContainer,
    NoteSave,
    CrewButtonLabelled,
    CrewButtonSpotlight,
    CrewButton,
    CrewButtonLoose,
    /// Edit-mode form for a to-do (visit/request)
    EditTodoForm,
    TodoSave,
    EmailDialog,
    EmailSend,
    SmsDialog,
    SmsSend,
    DeleteNoteButton,
    ChatSend,
    MessageInboxButton,
    ActivityFeedButton,
    CardTitle,
    Card,
}

impl Target {
    /// Crew assignment lookups, most specific first.
    pub const CREW_STRATEGIES: [Target; 4] = [
        Target::CrewButtonLabelled,
        Target::CrewButtonSpotlight,
        Target::CrewButton,
        Target::CrewButtonLoose,
    ];

    /// CSS selector used on the live page.
    pub fn selector(&self) -> &'static str {
        match self {
            Target::DialogTitle => ".dialog-title.js-dialogTitle",
            Target::Dialog => "[role=\"dialog\"],.dialog-box,.modal",
            Target::ActionButton => {
                "button[data-action-button=\"true\"].js-dropdownButton,button.js-dropdownButton[data-action-button=\"true\"]"
            }
            Target::DropdownButton => "button.js-dropdownButton,button[aria-haspopup=\"true\"]",
            Target::NotesTab => "tab-bar-tab[data-target=\".js-notesSection\"]",
            Target::InfoTab => "tab-bar-tab[data-target=\".js-infoSection\"]",
            Target::NoteField => "textarea[name=\"note[message]\"]",
            Target::NoteContainer => ".js-noteContainer",
            Target::NoteSave => "button.js-saveNote",
            Target::CrewButtonLabelled => {
                "div.js-crewButton.js-spotlightCrew[aria-label=\"Assign Crew Button\"]"
            }
            Target::CrewButtonSpotlight => "div.js-crewButton.js-spotlightCrew",
            Target::CrewButton => ".js-crewButton",
            Target::CrewButtonLoose => "[class*=\"js-crewButton\"]",
            Target::EditTodoForm => "form.to_do[id^=\"edit_to_do_\"]",
            Target::TodoSave => {
                "a.button.button--green.js-spinOnClick.js-formSubmit[data-form=\"form.to_do\"],button.button.button--green.js-spinOnClick.js-formSubmit[data-form=\"form.to_do\"]"
            }
            Target::EmailDialog => ".js-sendToClientDialogEmail",
            Target::EmailSend => "button.js-formSubmit[data-form=\"form.sendToClientDialogEmail\"]",
            Target::SmsDialog => ".js-sendToClientDialogSms",
            Target::SmsSend => "button.js-formSubmit[data-form=\"form.sendToClientDialogSms\"]",
            Target::DeleteNoteButton => ".button.button--red.js-deleteNote",
            Target::ChatSend => "button[aria-label=\"send\"]",
            Target::MessageInboxButton => "button[aria-label=\"Open Text Message Inbox\"]",
            Target::ActivityFeedButton => "#js-openNotifications",
            Target::CardTitle => ".card-headerTitle",
            Target::Card => "div.card",
        }
    }
}
