//! Todo management: loading, filtering, creation, and the card event sink.

use tokio::sync::mpsc;

use crate::filter::{FilterSelection, TodoFilter};
use crate::service::{CategoryService, TodoService};
use crate::snackbar::Snackbar;
use crate::transport::Transport;
use crate::types::{Category, TodoEntry};

use super::forms::TodoForm;
use super::todo_card::{TodoCard, TodoEvent};
use super::Confirm;

pub struct TodoListView<T> {
    todo_service: TodoService<T>,
    category_service: CategoryService<T>,
    snackbar: Snackbar,
    events_tx: mpsc::UnboundedSender<TodoEvent>,
    events_rx: mpsc::UnboundedReceiver<TodoEvent>,
    pub todos: Vec<TodoEntry>,
    pub categories: Vec<Category>,
    pub filter: TodoFilter,
    pub filtered_todos: Vec<TodoEntry>,
    pub draft: TodoForm,
}

impl<T: Transport> TodoListView<T> {
    pub fn new(
        todo_service: TodoService<T>,
        category_service: CategoryService<T>,
        snackbar: Snackbar,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            todo_service,
            category_service,
            snackbar,
            events_tx,
            events_rx,
            todos: Vec::new(),
            categories: Vec::new(),
            filter: TodoFilter::default(),
            filtered_todos: Vec::new(),
            draft: TodoForm::default(),
        }
    }

    /// Loads todos and categories concurrently. A failure on one side is
    /// reported without discarding the other.
    pub async fn activate(&mut self) {
        let (todos, categories) =
            tokio::join!(self.todo_service.list(), self.category_service.list());

        match todos {
            Ok(todos) => self.todos = todos,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load todos");
                self.snackbar.show_error(format!("Failed to load todos: {err}"));
            }
        }
        match categories {
            Ok(categories) => self.categories = categories,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load categories");
                self.snackbar
                    .show_error(format!("Failed to load categories: {err}"));
            }
        }
        self.apply_filters();
    }

    pub fn apply_filters(&mut self) {
        self.filtered_todos = self.filter.apply(&self.todos);
    }

    pub fn set_filter(&mut self, selection: FilterSelection) {
        self.filter.selection = selection;
        self.apply_filters();
    }

    pub fn set_category_filter(&mut self, category_id: Option<i64>) {
        self.filter.category_id = category_id;
        self.apply_filters();
    }

    pub async fn create_todo(&mut self) {
        let draft = match self.draft.to_draft() {
            Ok(draft) => draft,
            Err(err) => {
                self.snackbar.show_error(err.to_string());
                return;
            }
        };

        match self.todo_service.create(&draft).await {
            Ok(created) => {
                self.todos.push(created);
                self.draft = TodoForm::default();
                self.apply_filters();
                self.snackbar.show_success("Todo created");
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to create todo");
                self.snackbar.show_error(format!("Failed to create todo: {err}"));
            }
        }
    }

    pub async fn remove_todo(&mut self, todo: &TodoEntry, confirm: &impl Confirm) {
        let Some(id) = todo.id else {
            self.snackbar.show_error("Todo id is required for delete");
            return;
        };
        if !confirm.confirm(&format!("Delete todo \"{}\"?", todo.title)) {
            tracing::debug!(id, "todo delete declined");
            return;
        }

        match self.todo_service.delete(id).await {
            Ok(()) => {
                self.apply_event(TodoEvent::Deleted(id));
                self.snackbar.show_success("Todo deleted");
            }
            Err(err) => {
                tracing::warn!(error = %err, id, "failed to delete todo");
                self.snackbar.show_error(format!("Failed to delete todo: {err}"));
            }
        }
    }

    pub fn card(&self, todo: &TodoEntry) -> TodoCard<T> {
        TodoCard::new(
            self.todo_service.clone(),
            self.snackbar.clone(),
            self.events_tx.clone(),
            todo.clone(),
            self.categories.clone(),
        )
    }

    /// One card per visible entry.
    pub fn cards(&self) -> Vec<TodoCard<T>> {
        self.filtered_todos.iter().map(|todo| self.card(todo)).collect()
    }

    /// Applies every event the cards have posted so far. Returns how many
    /// were applied.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    // Sole writer of `todos` after activation.
    fn apply_event(&mut self, event: TodoEvent) {
        match event {
            TodoEvent::Updated(updated) => {
                match self.todos.iter_mut().find(|t| t.id.is_some() && t.id == updated.id) {
                    Some(slot) => *slot = updated,
                    None => tracing::debug!(id = ?updated.id, "update for unknown todo ignored"),
                }
            }
            TodoEvent::Deleted(id) => self.todos.retain(|t| t.id != Some(id)),
        }
        self.apply_filters();
    }
}
