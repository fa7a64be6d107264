//! Modal dialogs: confirmation, multi-choice, keypad entry, scrollable text.
//!
//! At most one modal is open at a time; opening freezes the motion
//! controller and the matching unfreeze happens in exactly one place, the
//! interaction system's close path. Completion callbacks are plain closures
//! captured at open time — no global callback registry.

use crate::interaction::GameRefs;
use crate::motion::Controller;
use crate::state::{CANCEL_KEY, CHOICE_KEYS, CONFIRM_KEY};

/// Runs when a confirmation dialog is confirmed. Cancelled dialogs drop it.
pub type ConfirmCallback = Box<dyn FnOnce(&mut GameRefs)>;
/// Runs with the chosen option index when a choice dialog is answered.
pub type ChoiceCallback = Box<dyn FnOnce(usize, &mut GameRefs)>;
/// Runs with the entered text when a text-entry dialog is submitted.
pub type SubmitCallback = Box<dyn FnOnce(&str, &mut GameRefs)>;

/// One open dialog and whatever it needs to resolve.
pub enum Modal {
    /// Yes/no question; Enter (or E) confirms, Escape cancels.
    Confirmation {
        text: String,
        on_confirm: ConfirmCallback,
    },
    /// Numbered options; digit keys choose, Escape cancels.
    Choice {
        title: String,
        options: Vec<String>,
        on_select: ChoiceCallback,
    },
    /// Digit entry (keypad safes); Enter submits once enough digits are in,
    /// Backspace deletes, Escape cancels.
    TextEntry {
        prompt: String,
        required_len: usize,
        buffer: String,
        on_submit: SubmitCallback,
    },
    /// Read-only pages (diaries, notes); Enter/E pages forward, Escape closes.
    Scroll {
        title: String,
        pages: Vec<String>,
        page: usize,
    },
}

impl Modal {
    /// Overlay line for the open dialog.
    pub fn display_text(&self) -> String {
        match self {
            Modal::Confirmation { text, .. } => {
                format!("{} [{} / {}]", text, CONFIRM_KEY, CANCEL_KEY)
            }
            Modal::Choice { title, options, .. } => {
                let mut line = format!("{} [{}]", title, CHOICE_KEYS);
                for (i, option) in options.iter().enumerate() {
                    line.push_str(&format!("  [{}] {}", i + 1, option));
                }
                line
            }
            Modal::TextEntry {
                prompt,
                buffer,
                required_len,
                ..
            } => format!("{}: {}{}", prompt, buffer, "_".repeat(required_len - buffer.len())),
            Modal::Scroll { title, pages, page } => {
                let body = pages.get(*page).map(String::as_str).unwrap_or("");
                format!("{} ({}/{}): {}", title, page + 1, pages.len(), body)
            }
        }
    }
}

/// Owner of the single open modal slot.
#[derive(Default)]
pub struct Modals {
    active: Option<Modal>,
}

impl Modals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&Modal> {
        self.active.as_ref()
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut Modal> {
        self.active.as_mut()
    }

    /// Take the open modal out for closing. The interaction system's close
    /// path is the only caller.
    pub(crate) fn take(&mut self) -> Option<Modal> {
        self.active.take()
    }

    /// Open a confirmation dialog. Returns false if another modal is open.
    pub fn show_confirmation(
        &mut self,
        controller: &mut Controller,
        text: impl Into<String>,
        on_confirm: ConfirmCallback,
    ) -> bool {
        self.open(
            controller,
            Modal::Confirmation {
                text: text.into(),
                on_confirm,
            },
        )
    }

    /// Open a multi-choice dialog. Returns false if another modal is open.
    pub fn show_choice(
        &mut self,
        controller: &mut Controller,
        title: impl Into<String>,
        options: Vec<String>,
        on_select: ChoiceCallback,
    ) -> bool {
        if options.is_empty() {
            log::warn!("Rejected choice dialog with no options");
            return false;
        }
        self.open(
            controller,
            Modal::Choice {
                title: title.into(),
                options,
                on_select,
            },
        )
    }

    /// Open a digit-entry dialog. Returns false if another modal is open.
    pub fn show_text_entry(
        &mut self,
        controller: &mut Controller,
        prompt: impl Into<String>,
        required_len: usize,
        on_submit: SubmitCallback,
    ) -> bool {
        self.open(
            controller,
            Modal::TextEntry {
                prompt: prompt.into(),
                required_len: required_len.max(1),
                buffer: String::new(),
                on_submit,
            },
        )
    }

    /// Open a scrollable text dialog. Returns false if another modal is open.
    pub fn show_scroll(
        &mut self,
        controller: &mut Controller,
        title: impl Into<String>,
        pages: Vec<String>,
    ) -> bool {
        let pages = if pages.is_empty() {
            vec![String::new()]
        } else {
            pages
        };
        self.open(
            controller,
            Modal::Scroll {
                title: title.into(),
                pages,
                page: 0,
            },
        )
    }

    fn open(&mut self, controller: &mut Controller, modal: Modal) -> bool {
        if self.active.is_some() {
            // Stacked modals are a bug in a handler; refuse rather than
            // orphan the first dialog's freeze.
            log::warn!("Rejected modal while another is open");
            return false;
        }
        controller.freeze();
        self.active = Some(modal);
        true
    }
}
