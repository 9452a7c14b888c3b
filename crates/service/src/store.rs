use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::ServiceError;
use crate::resource::Resource;

/// One untyped row of business data: field name to value.
pub type Record = Map<String, Value>;

/// Field added to every record read from or written to a store.
///
/// Holds the 1-based sheet row; the header occupies row 1.
pub const ROW_NUMBER_FIELD: &str = "rowNumber";

/// Capability shared by every resource route.
///
/// Implementations pass records through without validation. `append` is not
/// idempotent: calling it twice stores two rows.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// All rows for `resource`, in store order.
    async fn list(&self, resource: Resource) -> Result<Vec<Record>, ServiceError>;

    /// Append `record` as a new row and return it as stored.
    async fn append(&self, resource: Resource, record: Record) -> Result<Record, ServiceError>;
}

pub(crate) fn with_row_number(mut record: Record, row: u64) -> Record {
    record.insert(ROW_NUMBER_FIELD.to_string(), Value::from(row));
    record
}
