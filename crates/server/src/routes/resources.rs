//! Generic list/create gateway, mounted once per `Resource`.
//!
//! Bodies go to the store untouched and the store's answer comes back
//! untouched. No validation, filtering, paging or caching happens here.

use axum::{body::Bytes, extract::State, routing::get, Json, Router};
use serde_json::Value;
use tracing::info;

use service::{Record, Resource};

use crate::errors::ApiError;
use crate::state::AppState;

/// `GET /{resource}` and `POST /{resource}` for one resource.
pub fn resource_routes(resource: Resource) -> Router<AppState> {
    Router::new().route(
        &format!("/{}", resource.as_str()),
        get(move |State(state): State<AppState>| list_records(state, resource))
            .post(move |State(state): State<AppState>, body: Bytes| create_record(state, resource, body)),
    )
}

/// List every record of a resource in store order.
#[utoipa::path(
    get,
    path = "/api/{resource}",
    tag = "resources",
    params(("resource" = String, Path, description = "agreements | bills | templates | users | utilities")),
    responses((status = 200, description = "All records"), (status = 500, description = "Store failure"))
)]
pub async fn list_records(state: AppState, resource: Resource) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.store.list(resource).await?;
    info!(%resource, count = records.len(), "listed records");
    Ok(Json(records))
}

/// Append the request body as a new record.
///
/// The body must be a JSON object; anything else fails before the store
/// is touched.
#[utoipa::path(
    post,
    path = "/api/{resource}",
    tag = "resources",
    params(("resource" = String, Path, description = "agreements | bills | templates | users | utilities")),
    responses((status = 200, description = "Record as stored"), (status = 500, description = "Malformed or non-object body, or store failure"))
)]
pub async fn create_record(state: AppState, resource: Resource, body: Bytes) -> Result<Json<Record>, ApiError> {
    let record: Record = match serde_json::from_slice(&body).map_err(ApiError::MalformedBody)? {
        Value::Object(record) => record,
        _ => return Err(ApiError::NotAnObject),
    };
    let stored = state.store.append(resource, record).await?;
    info!(%resource, "created record");
    Ok(Json(stored))
}
