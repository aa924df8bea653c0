//! Todo HTTP Routes
//!
//! CRUD endpoints over the shared [`TodoStore`]. Each handler runs exactly
//! one store operation and maps the outcome to a status code.
//!
//! | Method | Path         | Success                 |
//! |--------|--------------|-------------------------|
//! | GET    | `/todo`      | 200, array of todos     |
//! | GET    | `/todo/{id}` | 200, todo (204 if none) |
//! | POST   | `/todo`      | 200, new id as a string |
//! | PUT    | `/todo/{id}` | 200, empty              |
//! | DELETE | `/todo/{id}` | 200, empty              |

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use crate::observability::MetricsRegistry;
use crate::store::{Todo, TodoStore};

// ==================
// Shared State
// ==================

/// State shared across todo handlers
#[derive(Debug, Default)]
pub struct TodoState {
    pub store: Arc<TodoStore>,
    pub metrics: Arc<MetricsRegistry>,
}

impl TodoState {
    pub fn new(store: Arc<TodoStore>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    fn reject(&self, err: ApiError) -> ApiError {
        self.metrics.increment_rejected();
        err
    }

    fn not_found(&self, id: &str) -> ApiError {
        self.metrics.increment_lookups_missed();
        ApiError::NotFound(id.to_string())
    }
}

// ==================
// Todo Routes
// ==================

/// Create todo routes
pub fn todo_routes(state: Arc<TodoState>) -> Router {
    Router::new()
        .route("/todo", get(list_todos_handler).post(create_todo_handler))
        // `{id}` never matches an empty segment; answer those explicitly
        .route(
            "/todo/",
            get(missing_id_handler)
                .put(missing_id_handler)
                .delete(missing_id_handler),
        )
        .route(
            "/todo/{id}",
            get(get_todo_handler)
                .put(update_todo_handler)
                .delete(delete_todo_handler),
        )
        .with_state(state)
}

// ==================
// Helpers
// ==================

/// Encode `value` as a JSON response body
fn json_response<T: Serialize + ?Sized>(value: &T) -> ApiResult<Response> {
    let body = serde_json::to_vec(value)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// 200 with no body
fn empty_json_response() -> Response {
    [(header::CONTENT_TYPE, "application/json")].into_response()
}

/// Decode a request body into a todo. Only a JSON object is accepted; serde
/// would otherwise also take a positional array for the struct.
fn decode_todo(state: &TodoState, body: &[u8]) -> ApiResult<Todo> {
    let malformed = |msg: String| state.reject(ApiError::MalformedInput(msg));

    let value: Value = serde_json::from_slice(body).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed(format!("expected a JSON object, got {}", value)));
    }

    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

fn require_id(state: &TodoState, id: &str) -> ApiResult<()> {
    if id.is_empty() {
        return Err(state.reject(ApiError::MissingId));
    }
    Ok(())
}

// ==================
// Handlers
// ==================

async fn list_todos_handler(State(state): State<Arc<TodoState>>) -> ApiResult<Response> {
    json_response(&state.store.list())
}

async fn get_todo_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require_id(&state, &id)?;

    match state.store.get(&id) {
        Ok(todo) => json_response(&todo),
        Err(_) => {
            state.metrics.increment_lookups_missed();
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

async fn create_todo_handler(
    State(state): State<Arc<TodoState>>,
    body: Bytes,
) -> ApiResult<Response> {
    let todo = decode_todo(&state, &body)?;

    let stored = state.store.add(todo);
    if stored.id.is_empty() {
        return Err(ApiError::MissingAssignedId);
    }
    state.metrics.increment_created();

    json_response(&stored.id)
}

async fn update_todo_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    require_id(&state, &id)?;

    let mut todo = decode_todo(&state, &body)?;
    todo.id = id.clone();

    state.store.update(todo).map_err(|_| state.not_found(&id))?;
    state.metrics.increment_updated();

    Ok(empty_json_response())
}

async fn delete_todo_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require_id(&state, &id)?;

    state.store.delete(&id).map_err(|_| state.not_found(&id))?;
    state.metrics.increment_deleted();

    Ok(empty_json_response())
}

async fn missing_id_handler(State(state): State<Arc<TodoState>>) -> ApiError {
    state.reject(ApiError::MissingId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::store::{IdGenerator, ID_LENGTH};

    fn create_test_state() -> Arc<TodoState> {
        let store = TodoStore::with_generator(IdGenerator::from_seed(11));
        Arc::new(TodoState::new(
            Arc::new(store),
            Arc::new(MetricsRegistry::new()),
        ))
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let app = todo_routes(create_test_state());

        let response = app.oneshot(request("GET", "/todo", "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(&body_bytes(response).await[..], b"[]");
    }

    #[tokio::test]
    async fn test_create_returns_id_string() {
        let state = create_test_state();
        let app = todo_routes(state.clone());

        let response = app
            .oneshot(request(
                "POST",
                "/todo",
                r#"{"id":"mine","title":"Buy food","msg":"Out of pasta.","done":false}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let id: String = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(id.len(), ID_LENGTH);
        assert_ne!(id, "mine");

        let stored = state.store.get(&id).unwrap();
        assert_eq!(stored.title, "Buy food");
        assert_eq!(state.metrics.snapshot().todos_created, 1);
    }

    #[tokio::test]
    async fn test_create_malformed_body() {
        let state = create_test_state();
        let app = todo_routes(state.clone());

        let response = app
            .oneshot(request("POST", "/todo", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(response).await.is_empty());
        assert_eq!(state.store.count(), 0);
        assert_eq!(state.metrics.snapshot().requests_rejected, 1);
    }

    #[tokio::test]
    async fn test_create_empty_body() {
        let app = todo_routes(create_test_state());

        let response = app.oneshot(request("POST", "/todo", "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_returns_no_content() {
        let app = todo_routes(create_test_state());

        let response = app
            .oneshot(request("GET", "/todo/abcdefghij", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_get_existing() {
        let state = create_test_state();
        let stored = state.store.add(Todo::new("Pay bills", "Better get it done."));
        let app = todo_routes(state);

        let response = app
            .oneshot(request("GET", &format!("/todo/{}", stored.id), ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let todo: Todo = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(todo, stored);
    }

    #[tokio::test]
    async fn test_empty_id_segment_is_bad_request() {
        for method in ["GET", "PUT", "DELETE"] {
            let app = todo_routes(create_test_state());
            let response = app.oneshot(request(method, "/todo/", "{}")).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", method);
        }
    }

    #[tokio::test]
    async fn test_update_path_id_wins() {
        let state = create_test_state();
        let stored = state.store.add(Todo::new("Water flowers", "dry"));
        let app = todo_routes(state.clone());

        let response = app
            .oneshot(request(
                "PUT",
                &format!("/todo/{}", stored.id),
                r#"{"id":"other","title":"Water plants","done":true}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let updated = state.store.get(&stored.id).unwrap();
        assert_eq!(updated.title, "Water plants");
        assert_eq!(updated.message, "");
        assert!(updated.done);
        assert!(state.store.get("other").is_err());
    }

    #[tokio::test]
    async fn test_update_missing() {
        let state = create_test_state();
        let app = todo_routes(state.clone());

        let response = app
            .oneshot(request("PUT", "/todo/missing", r#"{"done":true}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.metrics.snapshot().lookups_missed, 1);
    }

    #[tokio::test]
    async fn test_update_malformed() {
        let state = create_test_state();
        let stored = state.store.add(Todo::new("a", "b"));
        let app = todo_routes(state.clone());

        let response = app
            .oneshot(request("PUT", &format!("/todo/{}", stored.id), "[1,2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.store.get(&stored.id).unwrap(), stored);
    }

    #[tokio::test]
    async fn test_delete() {
        let state = create_test_state();
        let stored = state.store.add(Todo::new("a", "b"));

        let response = todo_routes(state.clone())
            .oneshot(request("DELETE", &format!("/todo/{}", stored.id), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.store.count(), 0);

        let response = todo_routes(state.clone())
            .oneshot(request("DELETE", &format!("/todo/{}", stored.id), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_array_bodies_rejected() {
        let state = create_test_state();
        let stored = state.store.add(Todo::new("Pay bills", "Better get it done.").with_done(true));

        for body in ["[]", r#"["x","t","m",true]"#, "\"title\"", "null"] {
            let response = todo_routes(state.clone())
                .oneshot(request("POST", "/todo", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "POST {}", body);

            let response = todo_routes(state.clone())
                .oneshot(request("PUT", &format!("/todo/{}", stored.id), body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "PUT {}", body);
        }

        assert_eq!(state.store.list(), vec![stored]);
        assert_eq!(state.metrics.snapshot().requests_rejected, 8);
    }

    #[tokio::test]
    async fn test_null_fields_take_defaults() {
        let state = create_test_state();
        let app = todo_routes(state.clone());

        let response = app
            .oneshot(request("POST", "/todo", r#"{"title":null,"msg":"m","done":null}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let id: String = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(state.store.get(&id).unwrap(), Todo::new("", "m").with_id(id));
    }
}
