//! Test doubles shared by unit tests.

use std::sync::Mutex;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

pub const BASE_URL: &str = "http://api.test";

/// Route-table transport that records every request it receives.
///
/// Routes match on method and path (relative to `BASE_URL`); the first
/// matching route answers. Unrouted requests fail as transport errors.
#[derive(Default)]
pub struct FakeTransport {
    routes: Vec<(HttpMethod, String, u16, String)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
        self.routes
            .push((method, format!("{BASE_URL}{path}"), status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        let full = format!("{BASE_URL}{path}");
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == full)
            .count()
    }

    /// JSON body of the most recent request to `path`.
    pub fn last_body(&self, method: HttpMethod, path: &str) -> Option<serde_json::Value> {
        let full = format!("{BASE_URL}{path}");
        self.requests()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == full)
            .and_then(|r| r.body.as_deref())
            .map(|body| serde_json::from_str(body).unwrap())
    }
}

impl Transport for FakeTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.routes
            .iter()
            .find(|(method, path, _, _)| *method == request.method && *path == request.path)
            .map(|(_, _, status, body)| HttpResponse::new(*status, body.as_str()))
            .ok_or_else(|| {
                ApiError::Transport(format!("no route for {} {}", request.method.as_str(), request.path))
            })
    }
}
