use std::sync::Arc;

use configs::{AppConfig, StoreBackend};
use service::memory::MemoryStore;
use service::observability::InstrumentedStore;
use service::sheets::SheetsClient;
use service::SheetStore;

/// Shared handler state.
///
/// The store is built once at startup and handed to every request; tests
/// swap in their own implementation.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SheetStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// Pick the backend named in config and wrap it with metrics.
    pub fn from_config(cfg: &AppConfig) -> Self {
        let backend: Arc<dyn SheetStore> = match cfg.store.backend {
            StoreBackend::Sheets => Arc::new(SheetsClient::from_config(&cfg.sheets)),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };
        Self::new(Arc::new(InstrumentedStore::new(backend)))
    }
}
