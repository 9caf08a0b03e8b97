use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, app_with_token, Todo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Routers share their state across clones, so a clone per request sees the
/// same store.
async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = send(&app(), empty_request("GET", "/todos")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_todo_assigns_sequential_ids() {
    let app = app();
    let first = send(&app, json_request("POST", "/todos", r#"{"title":"Buy milk"}"#)).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first: Todo = body_json(first).await;

    let second = send(
        &app,
        json_request("POST", "/todos", r#"{"title":"Walk dog","description":"twice"}"#),
    )
    .await;
    let second: Todo = body_json(second).await;

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.title, "Buy milk");
    assert!(first.description.is_none());
    assert_eq!(second.description.as_deref(), Some("twice"));
    assert!(!second.completed);
    assert!(!second.created_at.is_empty());
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let resp = send(&app(), json_request("POST", "/todos", r#"{"not_title":1}"#)).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = send(&app(), empty_request("GET", "/todos/99")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"], "Todo not found");
}

#[tokio::test]
async fn get_todo_bad_id_returns_400() {
    let resp = send(&app(), empty_request("GET", "/todos/not-a-number")).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update / delete ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = send(&app(), json_request("PUT", "/todos/5", r#"{"completed":true}"#)).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = send(&app(), empty_request("DELETE", "/todos/5")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- auth ---

#[tokio::test]
async fn token_server_rejects_missing_credential() {
    let app = app_with_token("secret");
    for request in [
        empty_request("GET", "/todos"),
        json_request("POST", "/todos", r#"{"title":"x"}"#),
        json_request("PUT", "/todos/1", r#"{"completed":true}"#),
        empty_request("DELETE", "/todos/1"),
    ] {
        let resp = send(&app, request).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn token_server_accepts_raw_credential() {
    let app = app_with_token("secret");
    let request = Request::builder()
        .uri("/todos")
        .header(http::header::AUTHORIZATION, "secret")
        .body(String::new())
        .unwrap();
    let resp = send(&app, request).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_page_is_public() {
    let resp = send(&app_with_token("secret"), empty_request("GET", "/login")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Login"));
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let app = app();

    // create
    let resp = send(&app, json_request("POST", "/todos", r#"{"title":"Walk dog"}"#)).await;
    let created: Todo = body_json(resp).await;
    let id = created.id;

    // list — should contain the one todo
    let resp = send(&app, empty_request("GET", "/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, id);

    // update — partial: only completed
    let resp = send(
        &app,
        json_request("PUT", &format!("/todos/{id}"), r#"{"completed":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "Walk dog"); // unchanged
    assert!(updated.completed);

    // update — partial: only title
    let resp = send(
        &app,
        json_request("PUT", &format!("/todos/{id}"), r#"{"title":"Walk cat"}"#),
    )
    .await;
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "Walk cat");
    assert!(updated.completed); // unchanged from previous update

    // delete
    let resp = send(&app, empty_request("DELETE", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Todo deleted successfully");

    // get after delete — 404
    let resp = send(&app, empty_request("GET", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete — empty
    let resp = send(&app, empty_request("GET", "/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}
