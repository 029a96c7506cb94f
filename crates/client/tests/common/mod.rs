//! In-process fake of the school API used by the client integration tests.
//!
//! Serves `/api/colegio/` and `/api/eventos/` from memory on an ephemeral
//! localhost port. Failure modes (forced status codes, malformed bodies)
//! are toggled through [`FakeState`].

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use torreblanca_core::record::{NewRecord, Record, RecordPatch};
use torreblanca_core::types::DbId;

/// Headers captured from one incoming request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub accept: Option<String>,
}

#[derive(Default)]
struct Inner {
    records: Vec<Record>,
    next_id: DbId,
    fail_with: Option<u16>,
    malformed: bool,
    events_body: Value,
    seen: Vec<SeenRequest>,
}

/// Shared, mutable state behind the fake API.
#[derive(Clone, Default)]
pub struct FakeState {
    inner: Arc<Mutex<Inner>>,
}

impl FakeState {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("fake state poisoned")
    }

    /// Seed the collection. Ids continue after the largest seeded id.
    pub fn seed(&self, records: Vec<Record>) {
        let mut inner = self.lock();
        inner.next_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        inner.records = records;
    }

    /// Answer every request with `status` and an empty body.
    pub fn fail_with(&self, status: u16) {
        self.lock().fail_with = Some(status);
    }

    /// Answer every request with 200 and a body that is not JSON.
    pub fn serve_malformed(&self) {
        self.lock().malformed = true;
    }

    /// Body returned by the events endpoint.
    pub fn set_events_body(&self, body: Value) {
        self.lock().events_body = body;
    }

    pub fn records(&self) -> Vec<Record> {
        self.lock().records.clone()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.lock().seen.clone()
    }

    /// Record the request and return a short-circuit response when a
    /// failure mode is active.
    fn observe(&self, method: &str, path: String, headers: &HeaderMap) -> Option<Response> {
        let mut inner = self.lock();
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        inner.seen.push(SeenRequest {
            method: method.to_string(),
            path,
            content_type: header("content-type"),
            accept: header("accept"),
        });

        if let Some(code) = inner.fail_with {
            let status = StatusCode::from_u16(code).expect("valid status code");
            return Some(status.into_response());
        }
        if inner.malformed {
            return Some((StatusCode::OK, "<html>not json</html>").into_response());
        }
        None
    }
}

/// A running fake API.
pub struct FakeApi {
    pub addr: SocketAddr,
    pub state: FakeState,
}

impl FakeApi {
    /// API root, e.g. `http://127.0.0.1:PORT/api`.
    pub fn root(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn records_url(&self) -> String {
        format!("{}/colegio/", self.root())
    }

    pub fn events_url(&self) -> String {
        format!("{}/eventos/", self.root())
    }
}

/// Start the fake API on an ephemeral port.
pub async fn spawn(state: FakeState) -> FakeApi {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    let app = Router::new()
        .route("/api/colegio/", get(list_records).post(create_record))
        .route(
            "/api/colegio/{id}/",
            get(get_record).put(update_record).delete(delete_record),
        )
        .route("/api/eventos/", get(list_events))
        .with_state(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake api server");
    });

    FakeApi { addr, state }
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}

/// A fully populated record for seeding.
pub fn school(id: DbId, name: &str) -> Record {
    Record {
        id,
        name: name.to_string(),
        address: "Av. Principal 100".to_string(),
        email: format!("contacto{id}@escuela.cl"),
        phone: "+56 2 2000 0000".to_string(),
        country: "Chile".to_string(),
        region: Some("Metropolitana".to_string()),
        logo: format!("logos/{id}.png"),
        logo_url: format!("http://fake/media/logos/{id}.png"),
        schedule: None,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn list_records(State(state): State<FakeState>, headers: HeaderMap) -> Response {
    if let Some(short) = state.observe("GET", "/api/colegio/".into(), &headers) {
        return short;
    }
    let records = state.records();
    Json(json!({
        "count": records.len(),
        "next": null,
        "previous": null,
        "results": records,
    }))
    .into_response()
}

async fn get_record(
    State(state): State<FakeState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> Response {
    if let Some(short) = state.observe("GET", format!("/api/colegio/{id}/"), &headers) {
        return short;
    }
    match state.records().into_iter().find(|r| r.id == id) {
        Some(record) => Json(record).into_response(),
        None => not_found(),
    }
}

async fn create_record(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(payload): Json<NewRecord>,
) -> Response {
    if let Some(short) = state.observe("POST", "/api/colegio/".into(), &headers) {
        return short;
    }
    let mut inner = state.lock();
    inner.next_id += 1;
    let id = inner.next_id;
    let record = Record {
        id,
        logo_url: format!("http://fake/media/{}", payload.logo),
        name: payload.name,
        address: payload.address,
        email: payload.email,
        phone: payload.phone,
        country: payload.country,
        region: payload.region,
        logo: payload.logo,
        schedule: payload.schedule,
    };
    inner.records.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update_record(
    State(state): State<FakeState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(patch): Json<RecordPatch>,
) -> Response {
    if let Some(short) = state.observe("PUT", format!("/api/colegio/{id}/"), &headers) {
        return short;
    }
    let mut inner = state.lock();
    let Some(record) = inner.records.iter_mut().find(|r| r.id == id) else {
        return not_found();
    };
    let mut merged = RecordPatch::from(&*record);
    merged.apply(patch);
    record.name = merged.name.unwrap_or_default();
    record.address = merged.address.unwrap_or_default();
    record.email = merged.email.unwrap_or_default();
    record.phone = merged.phone.unwrap_or_default();
    record.country = merged.country.unwrap_or_default();
    record.region = merged.region;
    record.logo = merged.logo.unwrap_or_default();
    record.logo_url = merged.logo_url.unwrap_or_default();
    record.schedule = merged.schedule;
    Json(record.clone()).into_response()
}

async fn delete_record(
    State(state): State<FakeState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> Response {
    if let Some(short) = state.observe("DELETE", format!("/api/colegio/{id}/"), &headers) {
        return short;
    }
    let mut inner = state.lock();
    let before = inner.records.len();
    inner.records.retain(|r| r.id != id);
    if inner.records.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_events(State(state): State<FakeState>, headers: HeaderMap) -> Response {
    if let Some(short) = state.observe("GET", "/api/eventos/".into(), &headers) {
        return short;
    }
    let body = state.lock().events_body.clone();
    Json(body).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
}
