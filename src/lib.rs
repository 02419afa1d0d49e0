// todolist - persistent todo list with filtering and manual ordering

pub mod config;
pub mod edit;
pub mod list;
pub mod model;
pub mod storage;
pub mod view;

// Re-export main types for convenience
pub use config::Config;
pub use edit::EditSession;
pub use list::{TODOS_KEY, TodoList};
pub use model::{Todo, now_ms};
pub use storage::Storage;
pub use view::{Counts, Filter, counts, filtered};
