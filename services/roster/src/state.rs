//! Application state shared across request handlers.

use std::sync::Arc;

use crate::persist::JsonFile;
use crate::service::AllocationService;

/// Shared application state.
///
/// This is passed to all request handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: AllocationService,
    snapshot_file: JsonFile,
}

impl AppState {
    /// Create a new application state.
    pub fn new(service: AllocationService, snapshot_file: JsonFile) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service,
                snapshot_file,
            }),
        }
    }

    /// Get a reference to the allocation service.
    pub fn service(&self) -> &AllocationService {
        &self.inner.service
    }

    /// Get a reference to the snapshot file handle.
    pub fn snapshot_file(&self) -> &JsonFile {
        &self.inner.snapshot_file
    }
}
