//! Shared handler state.

use crate::provider::{DatasetSource, LoadedDataset};
use diseasedx_core::{Dataset, DiseaseService, ServiceConfig};
use std::sync::Arc;

/// Cloned into every handler; the dataset itself is shared, never copied.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DiseaseService<Arc<Dataset>>>,
    pub source: Arc<DatasetSource>,
}

impl AppState {
    pub fn new(loaded: LoadedDataset, config: ServiceConfig) -> Self {
        let service = DiseaseService::with_config(Arc::new(loaded.dataset), config);
        Self {
            service: Arc::new(service),
            source: Arc::new(loaded.source),
        }
    }
}
