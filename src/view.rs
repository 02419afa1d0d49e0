// Derived read-only views over the todo collection

use crate::model::Todo;
use serde::{Deserialize, Serialize};

/// Which todos a view shows. Transient presentation state; never persisted
/// alongside the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "all"),
            Filter::Active => write!(f, "active"),
            Filter::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(format!(
                "Unknown filter: {other} (expected all, active, or completed)"
            )),
        }
    }
}

/// Completion tallies for the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}

/// Todos visible under `filter`, in collection order.
pub fn filtered(todos: &[Todo], filter: Filter) -> Vec<&Todo> {
    todos.iter().filter(|t| filter.matches(t)).collect()
}

/// Tally the collection. `active + completed == total` by construction.
pub fn counts(todos: &[Todo]) -> Counts {
    let completed = todos.iter().filter(|t| t.completed).count();
    Counts {
        active: todos.len() - completed,
        completed,
        total: todos.len(),
    }
}
