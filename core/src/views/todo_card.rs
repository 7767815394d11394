//! A single todo entry with its private edit dialog.

use tokio::sync::mpsc;

use crate::error::ApiError;
use crate::service::TodoService;
use crate::snackbar::Snackbar;
use crate::transport::Transport;
use crate::types::{Category, TodoEntry};

use super::forms::TodoForm;

/// Change reported to the owning `TodoListView`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoEvent {
    Updated(TodoEntry),
    Deleted(i64),
}

pub struct TodoCard<T> {
    service: TodoService<T>,
    snackbar: Snackbar,
    events: mpsc::UnboundedSender<TodoEvent>,
    pub todo: TodoEntry,
    pub categories: Vec<Category>,
    pub dialog: bool,
    pub form: TodoForm,
}

impl<T: Transport> TodoCard<T> {
    pub fn new(
        service: TodoService<T>,
        snackbar: Snackbar,
        events: mpsc::UnboundedSender<TodoEvent>,
        todo: TodoEntry,
        categories: Vec<Category>,
    ) -> Self {
        let form = TodoForm::from_entry(&todo);
        Self {
            service,
            snackbar,
            events,
            todo,
            categories,
            dialog: false,
            form,
        }
    }

    pub fn open_edit_dialog(&mut self) {
        self.form = TodoForm::from_entry(&self.todo);
        self.dialog = true;
    }

    pub fn close_dialog(&mut self) {
        self.dialog = false;
    }

    /// Saves the dialog's form over this card's todo.
    pub async fn todo_update(&mut self) {
        let result = match self.form.apply_to(&self.todo) {
            Ok(entry) => self.service.update(&entry).await,
            Err(err) => Err(err),
        };
        self.finish_update(result, "Todo updated");
    }

    pub async fn toggle_done(&mut self) {
        let mut entry = self.todo.clone();
        entry.done = !entry.done;
        let result = self.service.update(&entry).await;
        self.finish_update(result, "Todo updated");
    }

    fn finish_update(&mut self, result: Result<TodoEntry, ApiError>, message: &str) {
        match result {
            Ok(updated) => {
                self.todo = updated.clone();
                self.form = TodoForm::from_entry(&self.todo);
                self.dialog = false;
                if self.events.send(TodoEvent::Updated(updated)).is_err() {
                    tracing::debug!(id = ?self.todo.id, "todo list dropped before update arrived");
                }
                self.snackbar.show_success(message);
            }
            Err(err) => {
                tracing::warn!(error = %err, id = ?self.todo.id, "failed to update todo");
                self.snackbar.show_error(format!("Failed to update todo: {err}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::http::HttpMethod;
    use crate::test_support::{FakeTransport, BASE_URL};
    use crate::types::Priority;

    fn card(
        transport: &Arc<FakeTransport>,
        todo: TodoEntry,
        categories: Vec<Category>,
    ) -> (TodoCard<FakeTransport>, mpsc::UnboundedReceiver<TodoEvent>, Snackbar) {
        let (tx, rx) = mpsc::unbounded_channel();
        let snackbar = Snackbar::new();
        let service = TodoService::new(BASE_URL, Arc::clone(transport));
        (TodoCard::new(service, snackbar.clone(), tx, todo, categories), rx, snackbar)
    }

    fn ship_release() -> TodoEntry {
        let mut todo = TodoEntry::new("Ship release");
        todo.id = Some(3);
        todo.priority = Some(Priority::Medium);
        todo
    }

    #[tokio::test]
    async fn open_edit_dialog_copies_fields() {
        let mut todo = TodoEntry::new("Review PR");
        todo.id = Some(2);
        todo.description = Some("Check updates".to_string());
        todo.due_date = NaiveDate::from_ymd_opt(2025, 2, 10);
        todo.priority = Some(Priority::High);
        let work = Category::new("Work", "#000000").with_id(7);
        todo.category = Some(work.clone());
        let transport = Arc::new(FakeTransport::new());
        let (mut card, _rx, _) = card(&transport, todo, vec![work.clone()]);
        card.form.title = "stale".to_string();

        card.open_edit_dialog();

        assert!(card.dialog);
        assert_eq!(card.form.title, "Review PR");
        assert_eq!(card.form.priority, Some(Priority::High));
        assert_eq!(card.form.category, Some(work));
        assert_eq!(card.form.due_date, NaiveDate::from_ymd_opt(2025, 2, 10));
    }

    #[tokio::test]
    async fn update_sends_exact_todo_and_emits_once() {
        let todo = ship_release();
        let body = serde_json::to_string(&todo).unwrap();
        let transport = Arc::new(FakeTransport::new().on(HttpMethod::Put, "/todos/3", 200, &body));
        let (mut card, mut rx, _) = card(&transport, todo.clone(), Vec::new());
        card.open_edit_dialog();

        card.todo_update().await;

        assert_eq!(
            transport.last_body(HttpMethod::Put, "/todos/3").unwrap(),
            serde_json::to_value(&todo).unwrap()
        );
        assert_eq!(rx.try_recv().unwrap(), TodoEvent::Updated(todo));
        assert!(rx.try_recv().is_err());
        assert!(!card.dialog);
    }

    #[tokio::test]
    async fn update_keeps_empty_description_verbatim() {
        let mut todo = ship_release();
        todo.description = Some(String::new());
        let body = serde_json::to_string(&todo).unwrap();
        let transport = Arc::new(FakeTransport::new().on(HttpMethod::Put, "/todos/3", 200, &body));
        let (mut card, _rx, _) = card(&transport, todo, Vec::new());
        card.open_edit_dialog();

        card.todo_update().await;

        assert_eq!(transport.last_body(HttpMethod::Put, "/todos/3").unwrap()["description"], "");
    }

    #[tokio::test]
    async fn failed_update_keeps_dialog_open() {
        let transport = Arc::new(FakeTransport::new().on(HttpMethod::Put, "/todos/3", 500, "down"));
        let (mut card, mut rx, snackbar) = card(&transport, ship_release(), Vec::new());
        card.open_edit_dialog();
        card.form.title = "Ship it".to_string();

        card.todo_update().await;

        assert!(card.dialog);
        assert_eq!(card.form.title, "Ship it");
        assert_eq!(card.todo.title, "Ship release");
        assert!(rx.try_recv().is_err());
        assert_eq!(snackbar.state().color, "error");
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        let transport = Arc::new(FakeTransport::new());
        let (mut card, _rx, _) = card(&transport, ship_release(), Vec::new());
        card.open_edit_dialog();
        card.form.title = "  ".to_string();

        card.todo_update().await;

        assert!(transport.requests().is_empty());
        assert!(card.dialog);
    }

    #[tokio::test]
    async fn toggle_done_flips_flag() {
        let mut done = ship_release();
        done.done = true;
        let body = serde_json::to_string(&done).unwrap();
        let transport = Arc::new(FakeTransport::new().on(HttpMethod::Put, "/todos/3", 200, &body));
        let (mut card, mut rx, _) = card(&transport, ship_release(), Vec::new());

        card.toggle_done().await;

        assert_eq!(transport.last_body(HttpMethod::Put, "/todos/3").unwrap()["done"], true);
        assert!(card.todo.done);
        assert_eq!(rx.try_recv().unwrap(), TodoEvent::Updated(done));
    }

    #[tokio::test]
    async fn failed_toggle_leaves_todo_unchanged() {
        let transport = Arc::new(FakeTransport::new().on(HttpMethod::Put, "/todos/3", 500, "down"));
        let (mut card, mut rx, snackbar) = card(&transport, ship_release(), Vec::new());

        card.toggle_done().await;

        assert_eq!(transport.last_body(HttpMethod::Put, "/todos/3").unwrap()["done"], true);
        assert!(!card.todo.done);
        assert!(rx.try_recv().is_err());
        let state = snackbar.state();
        assert!(state.open);
        assert_eq!(state.color, "error");
        assert!(state.message.starts_with("Failed to update todo"));
    }
}
