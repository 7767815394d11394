//! Editable drafts behind the category and todo dialogs.
//!
//! Forms hold raw user input. Converting a form into a payload trims text,
//! applies the backend's field limits and returns `ApiError::Validation`
//! for anything the server would reject, so no request is sent.

use chrono::NaiveDate;

use crate::error::ApiError;
use crate::types::{Category, Priority, TodoEntry};

pub const MAX_TITLE_LEN: usize = 25;
pub const MAX_DESCRIPTION_LEN: usize = 200;
pub const MAX_CATEGORY_NAME_LEN: usize = 25;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub color_hex: String,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            color_hex: category.color_hex.clone(),
        }
    }

    /// Trimmed, validated payload. `id` is `None` for a create.
    pub fn to_category(&self, id: Option<i64>) -> Result<Category, ApiError> {
        let name = self.name.trim();
        let color_hex = self.color_hex.trim();

        if name.is_empty() {
            return Err(ApiError::validation("Category name is required"));
        }
        if name.chars().count() > MAX_CATEGORY_NAME_LEN {
            return Err(ApiError::validation(format!(
                "Category name must be at most {MAX_CATEGORY_NAME_LEN} characters"
            )));
        }
        if !is_hex_color(color_hex) {
            return Err(ApiError::validation(format!(
                "Color must have the form #RRGGBB, got {color_hex:?}"
            )));
        }

        Ok(Category {
            id,
            name: name.to_string(),
            color_hex: color_hex.to_string(),
        })
    }
}

pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
}

impl TodoForm {
    pub fn from_entry(todo: &TodoEntry) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            due_date: todo.due_date,
            priority: todo.priority,
            category: todo.category.clone(),
        }
    }

    /// New unpersisted entry built from the form.
    pub fn to_draft(&self) -> Result<TodoEntry, ApiError> {
        self.apply_to(&TodoEntry::new(""))
    }

    /// Copy of `todo` with the form's fields written over it. Fields the form
    /// does not edit (`id`, `done`, `createdAt`) are kept, and text the user
    /// left unchanged is sent back as stored, untrimmed.
    pub fn apply_to(&self, todo: &TodoEntry) -> Result<TodoEntry, ApiError> {
        let title = self.title.trim();
        let description = self.description.trim();

        if title.is_empty() {
            return Err(ApiError::validation("Title is required"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ApiError::validation(format!(
                "Title must be at most {MAX_TITLE_LEN} characters"
            )));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ApiError::validation(format!(
                "Description must be at most {MAX_DESCRIPTION_LEN} characters"
            )));
        }

        let mut entry = todo.clone();
        if self.title != todo.title {
            entry.title = title.to_string();
        }
        if self.description != todo.description.as_deref().unwrap_or_default() {
            entry.description = (!description.is_empty()).then(|| description.to_string());
        }
        entry.due_date = self.due_date;
        entry.priority = self.priority;
        entry.category = self.category.clone();
        Ok(entry)
    }
}
