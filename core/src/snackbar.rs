//! Shared notification ("snackbar") state.
//!
//! # Design
//! One `Snackbar` is created by the composition root and cloned into every
//! view; clones share the same state. The state lives in a `watch` channel so
//! a renderer can `subscribe()` and redraw on change. A new notification
//! replaces the current one; there is no queue. Hiding after `timeout` is the
//! renderer's job (via `close()`).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

pub const SUCCESS_COLOR: &str = "success";
pub const ERROR_COLOR: &str = "error";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);
pub const ERROR_TIMEOUT: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnackbarState {
    pub open: bool,
    pub message: String,
    pub color: String,
    pub timeout: Duration,
}

impl Default for SnackbarState {
    fn default() -> Self {
        Self {
            open: false,
            message: String::new(),
            color: SUCCESS_COLOR.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Cloneable handle to the application's notification state.
#[derive(Debug, Clone)]
pub struct Snackbar {
    tx: Arc<watch::Sender<SnackbarState>>,
}

impl Snackbar {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SnackbarState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn show(&self, message: impl Into<String>, color: impl Into<String>, timeout: Duration) {
        let state = SnackbarState {
            open: true,
            message: message.into(),
            color: color.into(),
            timeout,
        };
        self.tx.send_replace(state);
    }

    pub fn show_success(&self, message: impl Into<String>) {
        self.show(message, SUCCESS_COLOR, DEFAULT_TIMEOUT);
    }

    pub fn show_error(&self, message: impl Into<String>) {
        self.show_error_for(message, ERROR_TIMEOUT);
    }

    pub fn show_error_for(&self, message: impl Into<String>, timeout: Duration) {
        self.show(message, ERROR_COLOR, timeout);
    }

    pub fn close(&self) {
        self.tx.send_modify(|state| state.open = false);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SnackbarState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SnackbarState> {
        self.tx.subscribe()
    }
}

impl Default for Snackbar {
    fn default() -> Self {
        Self::new()
    }
}
