//! Client core for the todo app: todos, categories and the state of the views
//! that manage them.
//!
//! # Overview
//! Requests are built and responses parsed as plain data (host-does-IO
//! pattern); a `Transport` performs the round-trip. Services pair the two,
//! one network call per operation. View-models own the collections a UI
//! renders and report outcomes through a shared `Snackbar`.
//!
//! # Design
//! - `TodoClient` / `CategoryClient` are stateless; they hold only `base_url`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//! - `App` is the composition root: one transport, one snackbar, any number
//!   of views.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod service;
pub mod snackbar;
pub mod transport;
pub mod types;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::App;
pub use client::{CategoryClient, TodoClient};
pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use filter::{FilterSelection, TodoFilter};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{CategoryService, TodoService};
pub use snackbar::{Snackbar, SnackbarState};
pub use transport::{Transport, UreqTransport};
pub use types::{Category, Priority, TodoEntry};
pub use views::{CategoryListView, Confirm, TodoCard, TodoEvent, TodoListView};
