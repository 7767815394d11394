//! Remote-access services: one network round-trip per operation.
//!
//! Each method builds a request with the matching client, runs it through the
//! shared transport and parses the response. Errors propagate unmodified;
//! views decide how to surface them.

use std::sync::Arc;

use crate::client::{CategoryClient, TodoClient};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Category, TodoEntry};

pub struct TodoService<T> {
    client: TodoClient,
    transport: Arc<T>,
}

impl<T> Clone for TodoService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> TodoService<T> {
    pub fn new(base_url: &str, transport: Arc<T>) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    pub async fn list(&self) -> Result<Vec<TodoEntry>, ApiError> {
        let response = self.transport.execute(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    pub async fn get(&self, id: i64) -> Result<TodoEntry, ApiError> {
        let response = self.transport.execute(self.client.build_get_todo(id)).await?;
        self.client.parse_get_todo(response)
    }

    pub async fn create(&self, todo: &TodoEntry) -> Result<TodoEntry, ApiError> {
        let request = self.client.build_create_todo(todo)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    /// Replaces the whole record identified by `todo.id`.
    pub async fn update(&self, todo: &TodoEntry) -> Result<TodoEntry, ApiError> {
        let request = self.client.build_update_todo(todo)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_todo(id)).await?;
        self.client.parse_delete_todo(response)
    }
}

pub struct CategoryService<T> {
    client: CategoryClient,
    transport: Arc<T>,
}

impl<T> Clone for CategoryService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> CategoryService<T> {
    pub fn new(base_url: &str, transport: Arc<T>) -> Self {
        Self {
            client: CategoryClient::new(base_url),
            transport,
        }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let response = self
            .transport
            .execute(self.client.build_list_categories())
            .await?;
        self.client.parse_list_categories(response)
    }

    pub async fn get(&self, id: i64) -> Result<Category, ApiError> {
        let response = self
            .transport
            .execute(self.client.build_get_category(id))
            .await?;
        self.client.parse_get_category(response)
    }

    pub async fn create(&self, category: &Category) -> Result<Category, ApiError> {
        let request = self.client.build_create_category(category)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_category(response)
    }

    /// Fails with `ApiError::Validation` before any I/O when `category.id`
    /// is `None`.
    pub async fn update(&self, category: &Category) -> Result<Category, ApiError> {
        let request = self.client.build_update_category(category)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_category(response)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .transport
            .execute(self.client.build_delete_category(id))
            .await?;
        self.client.parse_delete_category(response)
    }
}
