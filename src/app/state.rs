//! Dialog state management
//!
//! Tracks which author dialog is open and which module it targets. Only one
//! dialog is open at a time; saving or closing returns to `Closed`.

use crate::domain::content::{ItemKind, ModuleId};

/// Entries of the header's add menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddKind {
    Module,
    Link,
    Upload,
}

/// Which dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    /// Module name dialog; `editing` is set when renaming
    Module { editing: Option<ModuleId> },
    /// Link dialog; new items go to `module_id`, or stay unassigned
    Link { module_id: Option<ModuleId> },
    /// Upload dialog; new items go to `module_id`, or stay unassigned
    Upload { module_id: Option<ModuleId> },
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }
}

/// Possible dialog transition events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// An entry of the header's add menu was picked
    HeaderAdd(AddKind),
    /// "Edit module name" on a module card
    EditModule(ModuleId),
    /// "Add item" on a module card
    AddToModule(ModuleId, ItemKind),
    /// Dialog dismissed without saving
    Close,
    /// Dialog contents were saved
    Saved,
}

/// State machine for dialog transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes a dialog event and returns the new state
    ///
    /// Opening a dialog replaces whatever was open before.
    pub fn process_event(current: DialogState, event: DialogEvent) -> DialogState {
        match event {
            DialogEvent::HeaderAdd(AddKind::Module) => DialogState::Module { editing: None },
            DialogEvent::HeaderAdd(AddKind::Link) => DialogState::Link { module_id: None },
            DialogEvent::HeaderAdd(AddKind::Upload) => DialogState::Upload { module_id: None },
            DialogEvent::EditModule(id) => DialogState::Module { editing: Some(id) },
            DialogEvent::AddToModule(id, ItemKind::Link) => {
                DialogState::Link { module_id: Some(id) }
            }
            DialogEvent::AddToModule(id, ItemKind::File) => {
                DialogState::Upload { module_id: Some(id) }
            }
            DialogEvent::Close | DialogEvent::Saved => {
                if current.is_open() {
                    tracing::trace!(?current, "dialog closed");
                }
                DialogState::Closed
            }
        }
    }
}
