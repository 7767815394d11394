//! Category management: list, create/edit form, delete with confirmation.

use crate::service::CategoryService;
use crate::snackbar::Snackbar;
use crate::transport::Transport;
use crate::types::Category;

use super::forms::CategoryForm;
use super::Confirm;

pub struct CategoryListView<T> {
    service: CategoryService<T>,
    snackbar: Snackbar,
    pub categories: Vec<Category>,
    pub form: CategoryForm,
    pub is_editing: bool,
    pub editing_id: Option<i64>,
}

impl<T: Transport> CategoryListView<T> {
    pub fn new(service: CategoryService<T>, snackbar: Snackbar) -> Self {
        Self {
            service,
            snackbar,
            categories: Vec::new(),
            form: CategoryForm::default(),
            is_editing: false,
            editing_id: None,
        }
    }

    pub async fn activate(&mut self) {
        match self.service.list().await {
            Ok(categories) => self.categories = categories,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load categories");
                self.categories.clear();
                self.snackbar
                    .show_error(format!("Failed to load categories: {err}"));
            }
        }
    }

    pub async fn save_category(&mut self) {
        let id = if self.is_editing { self.editing_id } else { None };
        let payload = match self.form.to_category(id) {
            Ok(payload) => payload,
            Err(err) => {
                self.snackbar.show_error(err.to_string());
                return;
            }
        };

        let result = if self.is_editing {
            self.service.update(&payload).await
        } else {
            self.service.create(&payload).await
        };

        match result {
            Ok(saved) => {
                let message = if self.is_editing {
                    "Category updated"
                } else {
                    "Category created"
                };
                self.merge(saved);
                self.reset_form();
                self.snackbar.show_success(message);
            }
            Err(err) => {
                tracing::warn!(error = %err, editing = self.is_editing, "failed to save category");
                self.snackbar
                    .show_error(format!("Failed to save category: {err}"));
            }
        }
    }

    pub fn edit_category(&mut self, category: &Category) {
        self.form = CategoryForm::from_category(category);
        self.is_editing = true;
        self.editing_id = category.id;
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    pub async fn remove_category(&mut self, category: &Category, confirm: &impl Confirm) {
        let Some(id) = category.id else {
            self.snackbar
                .show_error("Category id is required for delete");
            return;
        };
        if !confirm.confirm(&format!("Delete category \"{}\"?", category.name)) {
            tracing::debug!(id, "category delete declined");
            return;
        }

        match self.service.delete(id).await {
            Ok(()) => {
                self.categories.retain(|c| c.id != Some(id));
                if self.editing_id == Some(id) {
                    self.reset_form();
                }
                self.snackbar.show_success("Category deleted");
            }
            Err(err) => {
                tracing::warn!(error = %err, id, "failed to delete category");
                self.snackbar
                    .show_error(format!("Failed to delete category: {err}"));
            }
        }
    }

    /// Newly created categories go first, matching the server's newest-first
    /// order; updated ones replace the entry with the same id.
    fn merge(&mut self, saved: Category) {
        let existing = saved
            .id
            .and_then(|id| self.categories.iter().position(|c| c.id == Some(id)));
        match existing {
            Some(index) => self.categories[index] = saved,
            None => self.categories.insert(0, saved),
        }
    }

    fn reset_form(&mut self) {
        self.form = CategoryForm::default();
        self.is_editing = false;
        self.editing_id = None;
    }
}
