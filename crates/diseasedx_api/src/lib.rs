//! HTTP adapter for the diseasedx query service.
//!
//! # Responsibility
//! - Load the serving dataset once, preferring SQLite over the JSON document.
//! - Expose list/detail/symptom-checker/stats over a JSON REST surface.
//!
//! # Invariants
//! - Handlers never mutate the dataset; state is shared read-only.
//! - Core errors map to 404/400 with a `{"error": {...}}` body.

pub mod config;
pub mod error;
pub mod handlers;
pub mod provider;
pub mod router;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use provider::{load_dataset, DatasetSource, LoadError, LoadedDataset};
pub use router::api_router;
pub use state::AppState;
