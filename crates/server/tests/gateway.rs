use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes;
use server::state::AppState;
use service::{Record, Resource, ServiceError, SheetStore};

/// Store double that records every call and answers from canned data.
#[derive(Default)]
struct RecordingStore {
    rows: Mutex<Vec<Record>>,
    appends: Mutex<Vec<(Resource, Record)>>,
    lists: Mutex<Vec<Resource>>,
    fail: bool,
}

#[async_trait]
impl SheetStore for RecordingStore {
    async fn list(&self, resource: Resource) -> Result<Vec<Record>, ServiceError> {
        self.lists.lock().unwrap().push(resource);
        if self.fail {
            return Err(ServiceError::Auth("invalid_grant".into()));
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn append(&self, resource: Resource, record: Record) -> Result<Record, ServiceError> {
        self.appends.lock().unwrap().push((resource, record.clone()));
        if self.fail {
            return Err(ServiceError::Upstream { status: 429, body: "quota exceeded".into() });
        }
        let mut stored = record;
        stored.insert("rowNumber".into(), json!(42));
        Ok(stored)
    }
}

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn app(store: Arc<RecordingStore>) -> Router {
    routes::build_router(AppState::new(store), cors(), "target/no-frontend")
}

fn record(v: Value) -> Record {
    v.as_object().cloned().unwrap_or_default()
}

async fn send(app: Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().method("GET").uri(uri).body(Body::empty())?)
}

fn post(uri: &str, body: impl Into<Body>) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())?)
}

#[tokio::test]
async fn post_forwards_body_once_and_returns_stored_record() -> anyhow::Result<()> {
    let store = Arc::new(RecordingStore::default());
    let body = json!({"name": "Alice", "email": "a@x.com"});

    let (status, resp) = send(app(store.clone()), post("/api/users", serde_json::to_vec(&body)?)?).await?;

    assert_eq!(status, StatusCode::OK);
    let appends = store.appends.lock().unwrap();
    assert_eq!(appends.len(), 1);
    assert_eq!(appends[0], (Resource::Users, record(body.clone())));
    assert_eq!(resp, json!({"name": "Alice", "email": "a@x.com", "rowNumber": 42}));
    Ok(())
}

#[tokio::test]
async fn get_returns_store_rows_in_order() -> anyhow::Result<()> {
    let rows = vec![
        record(json!({"tenant": "Unit 4", "amount": "1200"})),
        record(json!({"tenant": "Unit 1", "amount": "950"})),
        record(json!({"tenant": "Unit 9"})),
    ];
    let store = Arc::new(RecordingStore { rows: Mutex::new(rows.clone()), ..Default::default() });

    let (status, resp) = send(app(store.clone()), get("/api/agreements?page=2&sort=amount")?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, serde_json::to_value(&rows)?);
    assert_eq!(*store.lists.lock().unwrap(), vec![Resource::Agreements]);
    Ok(())
}

#[tokio::test]
async fn empty_store_lists_as_empty_array() -> anyhow::Result<()> {
    let store = Arc::new(RecordingStore::default());
    let (status, resp) = send(app(store), get("/api/bills")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!([]));
    Ok(())
}

#[tokio::test]
async fn every_resource_is_routed_to_its_own_name() -> anyhow::Result<()> {
    let store = Arc::new(RecordingStore::default());
    for resource in Resource::ALL {
        let uri = format!("/api/{}", resource);
        let (status, _) = send(app(store.clone()), post(&uri, "{}")?).await?;
        assert_eq!(status, StatusCode::OK, "POST {uri}");
        let (status, _) = send(app(store.clone()), get(&uri)?).await?;
        assert_eq!(status, StatusCode::OK, "GET {uri}");
    }
    let appended: Vec<Resource> = store.appends.lock().unwrap().iter().map(|(r, _)| *r).collect();
    assert_eq!(appended, Resource::ALL.to_vec());
    assert_eq!(*store.lists.lock().unwrap(), Resource::ALL.to_vec());
    Ok(())
}

#[tokio::test]
async fn unparseable_body_never_reaches_store() -> anyhow::Result<()> {
    let store = Arc::new(RecordingStore::default());
    for bad in ["{\"name\": ", "not json", ""] {
        let (status, resp) = send(app(store.clone()), post("/api/users", bad)?).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body {bad:?}");
        assert!(resp["error"].as_str().unwrap_or_default().contains("malformed"));
    }
    assert!(store.appends.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn non_object_json_is_rejected_before_store() -> anyhow::Result<()> {
    let store = Arc::new(RecordingStore::default());
    for body in ["[{\"name\":\"A\"}]", "[1,2,3]", "\"Alice\"", "42", "null"] {
        let (status, resp) = send(app(store.clone()), post("/api/users", body)?).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body {body:?}");
        assert_eq!(resp["error"], "request body must be a JSON object", "body {body:?}");
    }
    assert!(store.appends.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn store_failures_surface_as_500() -> anyhow::Result<()> {
    let store = Arc::new(RecordingStore { fail: true, ..Default::default() });

    let (status, resp) = send(app(store.clone()), get("/api/utilities")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp["error"].as_str().unwrap_or_default().contains("authentication failed"));

    let (status, _) = send(app(store.clone()), post("/api/templates", "{\"title\":\"Lease\"}")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // one attempt, no retry
    assert_eq!(store.appends.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn health_is_ok_even_when_store_is_down() -> anyhow::Result<()> {
    let store = Arc::new(RecordingStore { fail: true, ..Default::default() });
    let (status, resp) = send(app(store.clone()), get("/api/health")?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["ok"], true);
    assert!(resp["message"].is_string());
    let ts = resp["timestamp"].as_str().unwrap_or_default();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok(), "timestamp {ts}");
    assert!(store.lists.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn dashboard_stats_are_fixed() -> anyhow::Result<()> {
    let store = Arc::new(RecordingStore::default());

    let (status, admin) = send(app(store.clone()), get("/api/admin/stats")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin["revenueTrend"].as_array().map(Vec::len), Some(5));
    assert!(admin["totalProperties"].is_number());

    let (status, manager) = send(app(store.clone()), get("/api/manager/stats")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(manager["weeklyTrend"].as_array().map(Vec::len), Some(5));
    assert!(manager["assignedProperties"].is_number());

    let (_, again) = send(app(store), get("/api/admin/stats")?).await?;
    assert_eq!(admin, again);
    Ok(())
}

#[tokio::test]
async fn unknown_api_path_is_404() -> anyhow::Result<()> {
    let store = Arc::new(RecordingStore::default());
    let (status, _) = send(app(store.clone()), get("/api/invoices")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(store.lists.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_routes() -> anyhow::Result<()> {
    let store = Arc::new(RecordingStore::default());
    let (status, doc) = send(app(store), get("/api-docs/openapi.json")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/health").is_some());
    assert!(doc["paths"].get("/api/{resource}").is_some());
    Ok(())
}
