use std::sync::Arc;

use crate::store::MedicalStore;

/// Shared by every handler; cloned per worker.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MedicalStore>,
    pub page_size: i64,
}

impl AppState {
    pub fn new(store: Arc<dyn MedicalStore>, page_size: i64) -> Self {
        Self { store, page_size }
    }
}
