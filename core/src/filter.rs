//! Client-side todo filtering.

use std::fmt;
use std::str::FromStr;

use crate::types::{Priority, TodoEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterSelection {
    #[default]
    All,
    HighPriority,
    Done,
    Pending,
}

impl FilterSelection {
    pub const ALL: [FilterSelection; 4] = [
        FilterSelection::All,
        FilterSelection::HighPriority,
        FilterSelection::Done,
        FilterSelection::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterSelection::All => "all",
            FilterSelection::HighPriority => "high",
            FilterSelection::Done => "done",
            FilterSelection::Pending => "pending",
        }
    }

    pub fn matches(&self, todo: &TodoEntry) -> bool {
        match self {
            FilterSelection::All => true,
            FilterSelection::HighPriority => todo.priority == Some(Priority::High),
            FilterSelection::Done => todo.done,
            FilterSelection::Pending => !todo.done,
        }
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterSelection::ALL
            .into_iter()
            .find(|selection| selection.as_str() == s)
            .ok_or_else(|| format!("unknown filter: {s}"))
    }
}

/// Active filter: a selection plus an optional category restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoFilter {
    pub selection: FilterSelection,
    pub category_id: Option<i64>,
}

impl TodoFilter {
    pub fn matches(&self, todo: &TodoEntry) -> bool {
        let category_ok = match self.category_id {
            Some(id) => todo.category_id() == Some(id),
            None => true,
        };
        category_ok && self.selection.matches(todo)
    }

    /// Matching entries in their original order. Does not touch `todos`.
    pub fn apply(&self, todos: &[TodoEntry]) -> Vec<TodoEntry> {
        todos.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
