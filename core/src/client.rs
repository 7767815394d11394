//! Stateless HTTP request builders and response parsers for the todo API.
//!
//! # Design
//! `TodoClient` and `CategoryClient` hold only a `base_url` and carry no
//! mutable state between calls. Each CRUD operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. A `Transport` executes the round-trip in between,
//! keeping this module deterministic and free of I/O.
//!
//! Updates require an id on both resources and fail with
//! `ApiError::Validation` before a request is built.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Category, TodoEntry};

/// Request builder / response parser for `/todos`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        empty_request(HttpMethod::Get, format!("{}/todos", self.base_url))
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        empty_request(HttpMethod::Get, format!("{}/todos/{id}", self.base_url))
    }

    pub fn build_create_todo(&self, todo: &TodoEntry) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}/todos", self.base_url), todo)
    }

    pub fn build_update_todo(&self, todo: &TodoEntry) -> Result<HttpRequest, ApiError> {
        let id = todo
            .id
            .ok_or_else(|| ApiError::validation("Todo id is required for update"))?;
        json_request(HttpMethod::Put, format!("{}/todos/{id}", self.base_url), todo)
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        empty_request(HttpMethod::Delete, format!("{}/todos/{id}", self.base_url))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<TodoEntry>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<TodoEntry, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<TodoEntry, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<TodoEntry, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Request builder / response parser for `/categories`.
#[derive(Debug, Clone)]
pub struct CategoryClient {
    base_url: String,
}

impl CategoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_categories(&self) -> HttpRequest {
        empty_request(HttpMethod::Get, format!("{}/categories", self.base_url))
    }

    pub fn build_get_category(&self, id: i64) -> HttpRequest {
        empty_request(HttpMethod::Get, format!("{}/categories/{id}", self.base_url))
    }

    pub fn build_create_category(&self, category: &Category) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}/categories", self.base_url), category)
    }

    pub fn build_update_category(&self, category: &Category) -> Result<HttpRequest, ApiError> {
        let id = category
            .id
            .ok_or_else(|| ApiError::validation("Category id is required for update"))?;
        json_request(
            HttpMethod::Put,
            format!("{}/categories/{id}", self.base_url),
            category,
        )
    }

    pub fn build_delete_category(&self, id: i64) -> HttpRequest {
        empty_request(HttpMethod::Delete, format!("{}/categories/{id}", self.base_url))
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<Category>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_category(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn empty_request(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<B: Serialize>(
    method: HttpMethod,
    path: String,
    input: &B,
) -> Result<HttpRequest, ApiError> {
    let body =
        serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    fn todos() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn categories() -> CategoryClient {
        CategoryClient::new("http://localhost:3000")
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = todos().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_todo_produces_correct_request() {
        let req = todos().build_get_todo(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos/42");
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let mut input = TodoEntry::new("Buy milk");
        input.priority = Some(Priority::Low);
        let req = todos().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["done"], false);
        assert_eq!(body["priority"], "LOW");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_todo_targets_id_with_whole_object() {
        let mut input = TodoEntry::new("Updated");
        input.id = Some(3);
        input.done = true;
        let req = todos().build_update_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/todos/3");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 3);
        assert_eq!(body["title"], "Updated");
        assert_eq!(body["done"], true);
        assert_eq!(body["dueDate"], serde_json::Value::Null);
    }

    #[test]
    fn build_update_todo_without_id_fails() {
        let err = todos().build_update_todo(&TodoEntry::new("No id")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Todo id is required for update");
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = todos().build_delete_todo(5);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todos/5");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_category_sends_exact_payload() {
        let req = categories()
            .build_create_category(&Category::new("Home", "#123456"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/categories");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Home", "colorHex": "#123456"}));
    }

    #[test]
    fn build_update_category_without_id_fails() {
        let err = categories()
            .build_update_category(&Category::new("Oops", "#000000"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Category id is required for update");
    }

    #[test]
    fn build_update_category_targets_id() {
        let req = categories()
            .build_update_category(&Category::new("Work", "#000000").with_id(5))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/categories/5");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 5);
    }

    #[test]
    fn build_delete_category_produces_correct_request() {
        let req = categories().build_delete_category(4);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/categories/4");
    }

    #[test]
    fn parse_list_todos_success() {
        let response = HttpResponse::new(200, r#"[{"id":1,"title":"Test","done":false}]"#);
        let todos = todos().parse_list_todos(response).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Test");
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = todos().parse_get_todo(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_accepts_any_2xx() {
        for status in [200, 201] {
            let response = HttpResponse::new(status, r#"{"id":1,"title":"New","done":false}"#);
            let todo = todos().parse_create_todo(response).unwrap();
            assert_eq!(todo.id, Some(1));
        }
    }

    #[test]
    fn parse_create_category_wrong_status() {
        let response = HttpResponse::new(500, "internal error");
        let err = categories().parse_create_category(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_delete_accepts_empty_200_and_204() {
        assert!(todos().parse_delete_todo(HttpResponse::new(200, "")).is_ok());
        assert!(categories().parse_delete_category(HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_category_not_found() {
        let err = categories()
            .parse_delete_category(HttpResponse::new(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CategoryClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_categories().path, "http://localhost:3000/categories");
    }

    #[test]
    fn parse_list_categories_bad_json() {
        let err = categories()
            .parse_list_categories(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
