// Single in-flight edit session over the todo collection

use crate::list::TodoList;
use crate::model::Todo;

/// Tracks which todo, if any, is currently being text-edited.
///
/// At most one session is ever in flight per owner: beginning a new edit
/// silently discards the previous draft. Completed todos are not editable.
/// A presentation layer that commits on focus loss simply calls
/// [`commit`](Self::commit) from its blur handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { id: String, draft: String },
}

impl EditSession {
    /// Start editing `todo`, seeding the draft with its current text and
    /// discarding any session already in flight. Returns false (and stays
    /// in the current state) when the todo is completed.
    pub fn begin(&mut self, todo: &Todo) -> bool {
        if todo.completed {
            return false;
        }
        *self = EditSession::Editing {
            id: todo.id.clone(),
            draft: todo.text.clone(),
        };
        true
    }

    /// Replace the draft text. Returns false when no session is in flight.
    pub fn set_draft(&mut self, text: &str) -> bool {
        match self {
            EditSession::Editing { draft, .. } => {
                *draft = text.to_string();
                true
            }
            EditSession::Idle => false,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    /// Id of the todo being edited, if any.
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            EditSession::Editing { id, .. } => Some(id),
            EditSession::Idle => None,
        }
    }

    /// Current draft text, if a session is in flight.
    pub fn draft(&self) -> Option<&str> {
        match self {
            EditSession::Editing { draft, .. } => Some(draft),
            EditSession::Idle => None,
        }
    }

    /// Apply the draft to the list and return to idle. An empty or
    /// whitespace-only draft discards the edit, leaving the todo untouched;
    /// the return value reports whether the text actually changed hands.
    pub fn commit(&mut self, list: &mut TodoList) -> bool {
        let EditSession::Editing { id, draft } = std::mem::take(self) else {
            return false;
        };
        list.edit(&id, &draft)
    }

    /// Drop the draft unconditionally and return to idle.
    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }
}
