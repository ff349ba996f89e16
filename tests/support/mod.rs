use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use todo_desk::api::{ApiClient, ApiEndpoints};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn new(method: &'static str, path: &str, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.to_owned(),
            body,
        }
    }
}

#[derive(Debug, Default)]
struct BackendData {
    todos: Vec<Value>,
    requests: Vec<RecordedRequest>,
    fail_with: Option<StatusCode>,
    next_id: u64,
}

type SharedData = Arc<Mutex<BackendData>>;

/// In-process stand-in for the machine-info and todos backend.
pub struct MockBackend {
    pub origin: String,
    data: SharedData,
    task: JoinHandle<()>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl MockBackend {
    /// Returns `None` when binding a local port is not permitted.
    pub async fn start(todos: Value) -> Option<Self> {
        let todos = match todos {
            Value::Array(items) => items,
            other => panic!("seed todos must be an array, got {other}"),
        };
        let next_id = todos
            .iter()
            .filter_map(|todo| todo.get("id").and_then(Value::as_u64))
            .max()
            .unwrap_or(0);
        let data = Arc::new(Mutex::new(BackendData {
            todos,
            next_id,
            ..BackendData::default()
        }));

        let app = Router::new()
            .route("/api/machine-info", get(handle_machine_info))
            .route("/api/todos", get(handle_list).post(handle_create))
            .route(
                "/api/todos/:id",
                axum::routing::patch(handle_update).delete(handle_delete),
            )
            .with_state(data.clone());

        let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
            Ok(listener) => listener,
            Err(error) if error.kind() == std::io::ErrorKind::PermissionDenied => return None,
            Err(error) => panic!("ephemeral port should be available for bind: {error}"),
        };
        let addr: SocketAddr = listener
            .local_addr()
            .expect("listener should have local address");
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock backend should serve");
        });

        Some(Self {
            origin: format!("http://{addr}"),
            data,
            task,
        })
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(ApiEndpoints::new(
            Some(self.origin.as_str()),
            &self.origin,
            "haproxy",
        ))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.data).requests.clone()
    }

    pub fn clear_requests(&self) {
        lock(&self.data).requests.clear();
    }

    pub fn fail_with(&self, status: StatusCode) {
        lock(&self.data).fail_with = Some(status);
    }
}

fn lock(data: &SharedData) -> MutexGuard<'_, BackendData> {
    data.lock().expect("mock backend lock should not be poisoned")
}

fn record(data: &mut BackendData, request: RecordedRequest) -> Option<Response> {
    data.requests.push(request);
    data.fail_with
        .map(|status| (status, Json(json!({"detail": "forced failure"}))).into_response())
}

async fn handle_machine_info(State(data): State<SharedData>) -> Response {
    let mut data = lock(&data);
    if let Some(failure) = record(
        &mut data,
        RecordedRequest::new("GET", "/api/machine-info", None),
    ) {
        return failure;
    }
    Json(json!({"application": "machine-info-app", "hostname": "mock-host"})).into_response()
}

async fn handle_list(State(data): State<SharedData>) -> Response {
    let mut data = lock(&data);
    if let Some(failure) = record(&mut data, RecordedRequest::new("GET", "/api/todos", None)) {
        return failure;
    }
    Json(Value::Array(data.todos.clone())).into_response()
}

async fn handle_create(State(data): State<SharedData>, Json(body): Json<Value>) -> Response {
    let mut data = lock(&data);
    if let Some(failure) = record(
        &mut data,
        RecordedRequest::new("POST", "/api/todos", Some(body.clone())),
    ) {
        return failure;
    }

    data.next_id += 1;
    let todo = json!({
        "id": data.next_id,
        "title": body.get("title").cloned().unwrap_or(Value::Null),
        "description": body.get("description").cloned().unwrap_or(Value::Null),
        "done": false,
    });
    data.todos.push(todo.clone());
    (StatusCode::CREATED, Json(todo)).into_response()
}

async fn handle_update(
    State(data): State<SharedData>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = lock(&data);
    if let Some(failure) = record(
        &mut data,
        RecordedRequest::new("PATCH", &format!("/api/todos/{id}"), Some(body.clone())),
    ) {
        return failure;
    }

    let Some(todo) = data.todos.iter_mut().find(|todo| id_matches(todo, &id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let (Some(target), Value::Object(changes)) = (todo.as_object_mut(), body) {
        for (key, value) in changes {
            target.insert(key, value);
        }
    }
    Json(todo.clone()).into_response()
}

async fn handle_delete(State(data): State<SharedData>, Path(id): Path<String>) -> Response {
    let mut data = lock(&data);
    if let Some(failure) = record(
        &mut data,
        RecordedRequest::new("DELETE", &format!("/api/todos/{id}"), None),
    ) {
        return failure;
    }

    let before = data.todos.len();
    data.todos.retain(|todo| !id_matches(todo, &id));
    if data.todos.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

fn id_matches(todo: &Value, id: &str) -> bool {
    match todo.get("id") {
        Some(Value::Number(number)) => number.to_string() == id,
        Some(Value::String(text)) => text == id,
        _ => false,
    }
}
