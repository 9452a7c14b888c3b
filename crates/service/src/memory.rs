use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::resource::Resource;
use crate::store::{with_row_number, Record, SheetStore};

/// In-process `SheetStore` for local development and tests.
///
/// Rows are numbered like a worksheet with one header row, so the first
/// appended record gets `rowNumber = 2`. Nothing is persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<Resource, Vec<Record>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a resource with rows; each gets its row number assigned.
    pub async fn seed(&self, resource: Resource, rows: impl IntoIterator<Item = Record>) {
        let mut map = self.inner.write().await;
        let sheet = map.entry(resource).or_default();
        for row in rows {
            let n = sheet.len() as u64 + 2;
            sheet.push(with_row_number(row, n));
        }
    }
}

#[async_trait]
impl SheetStore for MemoryStore {
    async fn list(&self, resource: Resource) -> Result<Vec<Record>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(&resource).cloned().unwrap_or_default())
    }

    async fn append(&self, resource: Resource, record: Record) -> Result<Record, ServiceError> {
        let mut map = self.inner.write().await;
        let sheet = map.entry(resource).or_default();
        let stored = with_row_number(record, sheet.len() as u64 + 2);
        sheet.push(stored.clone());
        Ok(stored)
    }
}
