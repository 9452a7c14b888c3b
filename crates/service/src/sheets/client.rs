use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use configs::SheetsConfig;

use crate::errors::ServiceError;
use crate::resource::Resource;
use crate::sheets::auth::{ServiceAccountTokenSource, TokenSource};
use crate::sheets::rows;
use crate::store::{with_row_number, Record, SheetStore};

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    updates: UpdatedValues,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedValues {
    updated_range: String,
}

/// `SheetStore` over the Sheets v4 `values` API.
///
/// Every call goes to the remote service; nothing is cached except the
/// access token held by the token source. Failures are returned unchanged
/// and never retried.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    tokens: Arc<dyn TokenSource>,
}

impl SheetsClient {
    pub fn new(
        http: reqwest::Client,
        api_base: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            tokens,
        }
    }

    /// Client authenticated as the configured service account.
    pub fn from_config(cfg: &SheetsConfig) -> Self {
        let http = reqwest::Client::new();
        let tokens = Arc::new(ServiceAccountTokenSource::new(http.clone(), cfg));
        Self::new(http, &cfg.api_base, &cfg.spreadsheet_id, tokens)
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/v4/spreadsheets/{}/values/{}", self.api_base, self.spreadsheet_id, range)
    }

    async fn get_values(&self, range: &str) -> Result<ValueRange, ServiceError> {
        let token = self.tokens.access_token().await?;
        let resp = self.http.get(self.values_url(range)).bearer_auth(token).send().await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json::<ValueRange>().await?)
    }

    async fn header_row(&self, sheet: &str) -> Result<Vec<String>, ServiceError> {
        let range = self.get_values(&format!("{sheet}!1:1")).await?;
        let header: Vec<String> = range
            .values
            .into_iter()
            .next()
            .unwrap_or_default()
            .iter()
            .map(rows::cell_text)
            .collect();
        if header.iter().all(String::is_empty) {
            return Err(ServiceError::MissingHeader(sheet.to_string()));
        }
        Ok(header)
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ServiceError::Upstream { status: status.as_u16(), body })
}

#[async_trait]
impl SheetStore for SheetsClient {
    #[instrument(skip(self), fields(resource = %resource))]
    async fn list(&self, resource: Resource) -> Result<Vec<Record>, ServiceError> {
        let range = self.get_values(resource.sheet_name()).await?;
        let records = rows::grid_to_records(range.values);
        debug!(count = records.len(), "read sheet rows");
        Ok(records)
    }

    #[instrument(skip(self, record), fields(resource = %resource))]
    async fn append(&self, resource: Resource, record: Record) -> Result<Record, ServiceError> {
        let sheet = resource.sheet_name();
        let header = self.header_row(sheet).await?;

        let unmapped = rows::unmapped_fields(&header, &record);
        if !unmapped.is_empty() {
            debug!(?unmapped, "fields without a header column are not written");
        }
        let row = rows::record_to_row(&header, &record);

        let token = self.tokens.access_token().await?;
        let url = format!("{}:append", self.values_url(&format!("{sheet}!A1")));
        let resp = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "USER_ENTERED"), ("insertDataOption", "INSERT_ROWS")])
            .json(&json!({ "majorDimension": "ROWS", "values": [row] }))
            .send()
            .await?;
        let appended: AppendResponse = ensure_success(resp).await?.json().await?;

        let row_number = rows::row_of_range(&appended.updates.updated_range).ok_or_else(|| {
            ServiceError::Decode(format!("unexpected updatedRange `{}`", appended.updates.updated_range))
        })?;
        debug!(row = row_number, "appended sheet row");
        Ok(with_row_number(record, row_number))
    }
}
