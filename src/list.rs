// Todo collection with persistence on every mutation

use crate::model::Todo;
use crate::storage::Storage;
use tracing::debug;

/// Storage key holding the persisted collection.
pub const TODOS_KEY: &str = "todos";

/// The ordered todo collection.
///
/// Owns the only mutable copy of the list; consumers read it through
/// [`todos`](Self::todos) and mutate it through the operations below. Every
/// accepted mutation writes the full collection back to storage after the
/// in-memory update, so the persisted document always mirrors the latest
/// state the storage layer could accept.
pub struct TodoList {
    storage: Storage,
    todos: Vec<Todo>,
}

impl TodoList {
    /// Load the collection from storage. An absent or undecodable document
    /// yields an empty list.
    pub fn load(storage: Storage) -> Self {
        let todos: Vec<Todo> = storage.load(TODOS_KEY, Vec::new());
        debug!(count = todos.len(), "Loaded todo collection");
        Self { storage, todos }
    }

    /// The collection in display order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Look up a todo by id.
    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Add a new todo at the front of the list (newest first) and return its
    /// id. Empty or whitespace-only text is rejected and leaves the
    /// collection untouched.
    pub fn add(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let todo = Todo::new(text);
        let id = todo.id.clone();
        self.todos.insert(0, todo);
        self.persist();
        Some(id)
    }

    /// Remove the todo with the given id. Returns false when no todo
    /// matches.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        if self.todos.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Flip completion on the todo with the given id. Returns false when no
    /// todo matches.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        todo.completed = !todo.completed;
        self.persist();
        true
    }

    /// Replace the text of the todo with the given id. Empty or
    /// whitespace-only replacements are discarded; the stored text is the
    /// trimmed input.
    pub fn edit(&mut self, id: &str, new_text: &str) -> bool {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return false;
        }
        let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        todo.text = new_text.to_string();
        self.persist();
        true
    }

    /// Remove every completed todo, returning how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        let removed = before - self.todos.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Move the todo with the given id so it ends up at `index`, preserving
    /// the relative order of everything else. Indexes past the end clamp to
    /// the tail. Returns false when no todo matches.
    pub fn move_to(&mut self, id: &str, index: usize) -> bool {
        let Some(from) = self.todos.iter().position(|t| t.id == id) else {
            return false;
        };

        let todo = self.todos.remove(from);
        let to = index.min(self.todos.len());
        self.todos.insert(to, todo);

        if to != from {
            self.persist();
        }
        true
    }

    /// Drag-and-drop reorder: drop the todo with id `id` onto the todo with
    /// id `over_id`, landing at the target's position in the full
    /// collection. Dropping a todo onto itself, or naming a missing id on
    /// either side, leaves the collection untouched.
    pub fn move_over(&mut self, id: &str, over_id: &str) -> bool {
        if id == over_id {
            return false;
        }
        let Some(to) = self.todos.iter().position(|t| t.id == over_id) else {
            return false;
        };
        self.move_to(id, to)
    }

    fn persist(&self) {
        self.storage.save(TODOS_KEY, &self.todos);
    }
}
