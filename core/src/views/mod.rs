//! View-models: the state a UI renders, and the operations it triggers.
//!
//! # Design
//! - Each view owns its collections exclusively and mutates them through
//!   `&mut self`.
//! - Views are the single recovery point for service errors: failures are
//!   logged and turned into snackbar notifications, never returned.
//! - Cards report changes to their parent list over a channel instead of
//!   touching the parent's collection.

pub mod category_list;
pub mod forms;
pub mod todo_card;
pub mod todo_list;

pub use category_list::CategoryListView;
pub use forms::{CategoryForm, TodoForm};
pub use todo_card::{TodoCard, TodoEvent};
pub use todo_list::TodoListView;

/// Blocking yes/no prompt shown before destructive actions.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
