//! In-memory implementation of the todo REST API.
//!
//! Ids are sequential per resource and lists come back newest first. PUT
//! replaces the whole record (only `createdAt` survives). Deleting a category
//! clears it from every todo that referenced it.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const MAX_TITLE_LEN: usize = 25;
pub const MAX_DESCRIPTION_LEN: usize = 200;
pub const MAX_NAME_LEN: usize = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color_hex: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub color_hex: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoEntry {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
    pub created_at: NaiveDateTime,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
}

/// Only the category's id is read; the rest of the embedded object is
/// resolved from the store.
#[derive(Deserialize)]
pub struct CategoryRef {
    pub id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

struct StoredTodo {
    title: String,
    description: Option<String>,
    done: bool,
    created_at: NaiveDateTime,
    due_date: Option<NaiveDate>,
    priority: Option<Priority>,
    category_id: Option<i64>,
}

#[derive(Default)]
pub struct Store {
    next_todo_id: i64,
    next_category_id: i64,
    todos: BTreeMap<i64, StoredTodo>,
    categories: BTreeMap<i64, Category>,
}

impl Store {
    fn render(&self, id: i64, todo: &StoredTodo) -> TodoEntry {
        TodoEntry {
            id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            done: todo.done,
            created_at: todo.created_at,
            due_date: todo.due_date,
            priority: todo.priority,
            category: todo
                .category_id
                .and_then(|cid| self.categories.get(&cid).cloned()),
        }
    }

    fn stored(&self, input: TodoInput, created_at: NaiveDateTime) -> Result<StoredTodo, StatusCode> {
        let title = input.title.trim().to_string();
        if title.is_empty() || title.chars().count() > MAX_TITLE_LEN {
            return Err(StatusCode::BAD_REQUEST);
        }
        if input
            .description
            .as_ref()
            .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
        {
            return Err(StatusCode::BAD_REQUEST);
        }
        let category_id = input.category.map(|c| c.id);
        if let Some(cid) = category_id {
            if !self.categories.contains_key(&cid) {
                return Err(StatusCode::BAD_REQUEST);
            }
        }
        Ok(StoredTodo {
            title,
            description: input.description,
            done: input.done,
            created_at,
            due_date: input.due_date,
            priority: input.priority,
            category_id,
        })
    }
}

fn validate_category(input: &CategoryInput) -> Result<(), StatusCode> {
    let name = input.name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN || !is_hex_color(input.color_hex.trim()) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(())
}

/// `#RRGGBB`, either case.
fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()))
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- todos ---

async fn list_todos(State(db): State<Db>) -> Json<Vec<TodoEntry>> {
    let store = db.read().await;
    Json(
        store
            .todos
            .iter()
            .rev()
            .map(|(id, todo)| store.render(*id, todo))
            .collect(),
    )
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> Result<(StatusCode, Json<TodoEntry>), StatusCode> {
    let mut store = db.write().await;
    let todo = store.stored(input, Utc::now().naive_utc())?;
    store.next_todo_id += 1;
    let id = store.next_todo_id;
    let rendered = store.render(id, &todo);
    store.todos.insert(id, todo);
    tracing::debug!(id, "todo created");
    Ok((StatusCode::CREATED, Json(rendered)))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<TodoEntry>, StatusCode> {
    let store = db.read().await;
    store
        .todos
        .get(&id)
        .map(|todo| Json(store.render(id, todo)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<TodoEntry>, StatusCode> {
    let mut store = db.write().await;
    let created_at = store
        .todos
        .get(&id)
        .map(|todo| todo.created_at)
        .ok_or(StatusCode::NOT_FOUND)?;
    let todo = store.stored(input, created_at)?;
    let rendered = store.render(id, &todo);
    store.todos.insert(id, todo);
    Ok(Json(rendered))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- categories ---

async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    let store = db.read().await;
    Json(store.categories.values().rev().cloned().collect())
}

async fn create_category(
    State(db): State<Db>,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), StatusCode> {
    validate_category(&input)?;
    let mut store = db.write().await;
    store.next_category_id += 1;
    let category = Category {
        id: store.next_category_id,
        name: input.name.trim().to_string(),
        color_hex: input.color_hex.trim().to_string(),
    };
    store.categories.insert(category.id, category.clone());
    tracing::debug!(id = category.id, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

async fn get_category(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Category>, StatusCode> {
    let store = db.read().await;
    store.categories.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_category(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>, StatusCode> {
    validate_category(&input)?;
    let mut store = db.write().await;
    let category = store.categories.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    category.name = input.name.trim().to_string();
    category.color_hex = input.color_hex.trim().to_string();
    Ok(Json(category.clone()))
}

async fn delete_category(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.categories.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    let mut cleared = 0;
    for todo in store.todos.values_mut() {
        if todo.category_id == Some(id) {
            todo.category_id = None;
            cleared += 1;
        }
    }
    tracing::debug!(id, cleared, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}
