use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    todos: BTreeMap<i64, Todo>,
}

#[derive(Clone)]
pub struct AppState {
    db: Arc<RwLock<Store>>,
    token: Option<Arc<str>>,
}

type ApiError = (StatusCode, Json<Value>);

/// Open server: no credential required.
pub fn app() -> Router {
    router(None)
}

/// Server that answers 401 unless the `authorization` header carries `token`,
/// raw or with a `Bearer ` prefix.
pub fn app_with_token(token: &str) -> Router {
    router(Some(Arc::from(token)))
}

fn router(token: Option<Arc<str>>) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        token,
    };
    Router::new()
        .route("/login", get(login_page))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(state)
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("listening on {addr}");
    }
    axum::serve(listener, app).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = state.token.as_deref() else {
        return Ok(());
    };
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value));
    if presented == Some(expected) {
        Ok(())
    } else {
        Err(detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }
}

fn detail(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "detail": message })))
}

fn not_found() -> ApiError {
    detail(StatusCode::NOT_FOUND, "Todo not found")
}

fn now() -> String {
    chrono::Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

async fn login_page() -> Html<&'static str> {
    Html("<!DOCTYPE html><html><body><h1>Login</h1></body></html>")
}

async fn list_todos(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Todo>>, ApiError> {
    authorize(&state, &headers)?;
    let store = state.db.read().await;
    Ok(Json(store.todos.values().cloned().collect()))
}

async fn create_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateTodo>,
) -> Result<Json<Todo>, ApiError> {
    authorize(&state, &headers)?;
    let mut store = state.db.write().await;
    store.next_id += 1;
    let todo = Todo {
        id: store.next_id,
        title: input.title,
        description: input.description,
        completed: false,
        created_at: now(),
    };
    store.todos.insert(todo.id, todo.clone());
    Ok(Json(todo))
}

async fn get_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    authorize(&state, &headers)?;
    let store = state.db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    authorize(&state, &headers)?;
    let mut store = state.db.write().await;
    let todo = store.todos.get_mut(&id).ok_or_else(not_found)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = Some(description);
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers)?;
    let mut store = state.db.write().await;
    store.todos.remove(&id).ok_or_else(not_found)?;
    Ok(Json(json!({ "message": "Todo deleted successfully" })))
}
