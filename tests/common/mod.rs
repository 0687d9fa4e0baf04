//! Shared utilities for integration testing.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use client_records::AppConfig;

/// Calls received by the mock backend, per method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hits {
    pub get: usize,
    pub post: usize,
    pub put: usize,
    pub delete: usize,
}

#[derive(Default)]
struct Store {
    records: Vec<Value>,
    next_id: u64,
    hits: Hits,
    fail_status: Option<u16>,
    request_ids: Vec<String>,
}

/// Handle on a running in-memory `/clientes` resource.
#[derive(Clone, Default)]
pub struct MockBackend {
    store: Arc<Mutex<Store>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn hits(&self) -> Hits {
        self.store.lock().unwrap().hits
    }

    pub fn records(&self) -> Vec<Value> {
        self.store.lock().unwrap().records.clone()
    }

    /// Answer every mutation with this status until cleared.
    pub fn fail_mutations(&self, status: Option<u16>) {
        self.store.lock().unwrap().fail_status = status;
    }

    pub fn request_ids(&self) -> Vec<String> {
        self.store.lock().unwrap().request_ids.clone()
    }

    /// Store a record directly, bypassing the hit counters.
    pub fn seed(&self, mut record: Value) -> Value {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        record["id"] = Value::from(store.next_id);
        store.records.push(record.clone());
        record
    }
}

fn record_request(store: &mut Store, headers: &HeaderMap) {
    if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        store.request_ids.push(id.to_string());
    }
}

fn injected_failure(store: &Store) -> Option<Response> {
    store.fail_status.map(|status| {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, "injected failure").into_response()
    })
}

fn matches_id(record: &Value, id: &str) -> bool {
    match &record["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

async fn list(State(state): State<MockBackend>, headers: HeaderMap) -> Json<Vec<Value>> {
    let mut store = state.store.lock().unwrap();
    store.hits.get += 1;
    record_request(&mut store, &headers);
    Json(store.records.clone())
}

async fn create(
    State(state): State<MockBackend>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut store = state.store.lock().unwrap();
    store.hits.post += 1;
    record_request(&mut store, &headers);
    if let Some(failure) = injected_failure(&store) {
        return failure;
    }
    store.next_id += 1;
    body["id"] = Value::from(store.next_id);
    store.records.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn replace(
    State(state): State<MockBackend>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut store = state.store.lock().unwrap();
    store.hits.put += 1;
    record_request(&mut store, &headers);
    if let Some(failure) = injected_failure(&store) {
        return failure;
    }
    match store.records.iter_mut().find(|r| matches_id(r, &id)) {
        Some(slot) => {
            let stored_id = slot["id"].clone();
            *slot = body;
            slot["id"] = stored_id;
            Json(slot.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

async fn remove(
    State(state): State<MockBackend>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut store = state.store.lock().unwrap();
    store.hits.delete += 1;
    record_request(&mut store, &headers);
    if let Some(failure) = injected_failure(&store) {
        return failure;
    }
    let before = store.records.len();
    store.records.retain(|r| !matches_id(r, &id));
    if store.records.len() == before {
        (StatusCode::NOT_FOUND, "not found").into_response()
    } else {
        Json(Value::Object(Default::default())).into_response()
    }
}

/// Start a mock `/clientes` resource on an ephemeral port.
pub async fn start_mock_backend() -> (SocketAddr, MockBackend) {
    let state = MockBackend::default();
    let app = Router::new()
        .route("/clientes", get(list).post(create))
        .route("/clientes/{id}", axum::routing::put(replace).delete(remove))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, state)
}

/// Configuration pointing at `addr`, with short notice lifetimes.
#[allow(dead_code)]
pub fn config_for(addr: SocketAddr) -> AppConfig {
    let mut config = AppConfig::default();
    config.backend.base_url = format!("http://{}", addr);
    config.backend.request_timeout_secs = 5;
    let notices = &mut config.notifications;
    notices.create_success_ms = 150;
    notices.create_error_ms = 150;
    notices.update_success_ms = 150;
    notices.update_error_ms = 150;
    notices.delete_success_ms = 150;
    notices.delete_error_ms = 150;
    notices.list_error_ms = 150;
    config
}

#[allow(dead_code)]
pub fn ana() -> Value {
    serde_json::json!({
        "nombre": "Ana",
        "apellido1": "Ruiz",
        "apellido2": "Gil",
        "direccion": "Calle 1",
        "telefono": "600112233",
        "sexo": "mujer"
    })
}
