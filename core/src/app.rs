//! Composition root: one transport and one snackbar shared by every view.

use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::service::{CategoryService, TodoService};
use crate::snackbar::Snackbar;
use crate::transport::{Transport, UreqTransport};
use crate::views::{CategoryListView, TodoListView};

pub struct App<T> {
    config: Config,
    transport: Arc<T>,
    snackbar: Snackbar,
}

impl App<UreqTransport> {
    /// Reads `Config` from the environment and wires the HTTP transport.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_env()?))
    }

    pub fn new(config: Config) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> App<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        tracing::info!(base_url = %config.api_base_url, "todo app initialized");
        Self {
            config,
            transport: Arc::new(transport),
            snackbar: Snackbar::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snackbar(&self) -> &Snackbar {
        &self.snackbar
    }

    pub fn todo_service(&self) -> TodoService<T> {
        TodoService::new(&self.config.api_base_url, Arc::clone(&self.transport))
    }

    pub fn category_service(&self) -> CategoryService<T> {
        CategoryService::new(&self.config.api_base_url, Arc::clone(&self.transport))
    }

    pub fn todo_view(&self) -> TodoListView<T> {
        TodoListView::new(self.todo_service(), self.category_service(), self.snackbar.clone())
    }

    pub fn category_view(&self) -> CategoryListView<T> {
        CategoryListView::new(self.category_service(), self.snackbar.clone())
    }
}
