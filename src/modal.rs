//! Modal dialogs with a focus trap.
//!
//! At most one dialog is open. While it is, Tab and Shift+Tab cycle through
//! the dialog's own focusable elements and never leave it; closing returns
//! focus to whatever held it before the dialog opened.

use serde::Serialize;
use tracing::debug;

use crate::document::ModalMarkup;

#[derive(Debug, Clone)]
pub struct ModalDialogs {
    modals: Vec<ModalMarkup>,
    open: Option<OpenModal>,
    print_requests: usize,
}

#[derive(Debug, Clone)]
struct OpenModal {
    index: usize,
    /// Position in the dialog's focusables; `None` when it has none.
    focus: Option<usize>,
    restore_focus: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalState {
    pub open: Option<String>,
    pub focused: Option<String>,
    pub print_requests: usize,
}

impl ModalDialogs {
    pub fn new(modals: &[ModalMarkup]) -> Self {
        Self {
            modals: modals.to_vec(),
            open: None,
            print_requests: 0,
        }
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open
            .as_ref()
            .map(|open| self.modals[open.index].id.as_str())
    }

    /// Element currently focused inside the open dialog.
    pub fn focused(&self) -> Option<&str> {
        let open = self.open.as_ref()?;
        let focus = open.focus?;
        Some(self.modals[open.index].focusables[focus].as_str())
    }

    pub fn print_requests(&self) -> usize {
        self.print_requests
    }

    /// Open the dialog with `id`. Unknown ids are ignored. Opening while
    /// another dialog is open replaces it but keeps the original focus to
    /// restore.
    pub fn open(&mut self, id: &str, previously_focused: Option<&str>) -> bool {
        let Some(index) = self.modals.iter().position(|m| m.id == id) else {
            return false;
        };
        let restore_focus = match self.open.take() {
            Some(previous) => previous.restore_focus,
            None => previously_focused.map(str::to_string),
        };
        let focus = (!self.modals[index].focusables.is_empty()).then_some(0);
        self.open = Some(OpenModal {
            index,
            focus,
            restore_focus,
        });
        debug!(modal = id, "modal opened");
        true
    }

    /// Close the open dialog. Returns the element that should get focus back.
    pub fn close(&mut self) -> Option<String> {
        let open = self.open.take()?;
        debug!(modal = %self.modals[open.index].id, "modal closed");
        open.restore_focus
    }

    /// Document key handler. Returns `true` when the key was consumed.
    pub fn key_down(&mut self, key: &str, shift: bool) -> bool {
        let Some(open) = self.open.as_mut() else {
            return false;
        };
        match key {
            "Escape" => {
                self.close();
                true
            }
            "Tab" => {
                let count = self.modals[open.index].focusables.len();
                if let Some(focus) = open.focus {
                    open.focus = Some(if shift {
                        (focus + count - 1) % count
                    } else {
                        (focus + 1) % count
                    });
                }
                true
            }
            _ => false,
        }
    }

    /// Print the open dialog, if it allows printing.
    pub fn print(&mut self) -> bool {
        let printable = self
            .open
            .as_ref()
            .is_some_and(|open| self.modals[open.index].printable);
        if printable {
            self.print_requests += 1;
        }
        printable
    }

    pub fn state(&self) -> ModalState {
        ModalState {
            open: self.open_id().map(str::to_string),
            focused: self.focused().map(str::to_string),
            print_requests: self.print_requests,
        }
    }
}
