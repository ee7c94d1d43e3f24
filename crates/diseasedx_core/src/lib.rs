//! Core domain logic for diseasedx.
//! Dataset building, storage and the read-only query service live here.

pub mod dataset;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use dataset::builder::{
    build_from_csv_path, build_from_csv_reader, BuildReport, DatasetBuild, DatasetBuilder,
    RowOutcome, SkipReason, SkippedRow, SourceRow,
};
pub use dataset::document::{
    load_document, read_document, save_document, write_document, DatasetDocument,
};
pub use dataset::{Dataset, DatasetError, DatasetResult, DiseaseProvider};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::disease::{
    parse_flag, split_comma_list, DatasetStatistics, DiseaseId, DiseaseRecord,
    DiseaseValidationError, NewDisease,
};
pub use repo::disease_repo::{DiseaseRepository, RepoError, RepoResult, SqliteDiseaseRepository};
pub use search::filter::DiseaseFilter;
pub use search::symptoms::{
    match_percentage, SymptomCheckResult, SymptomMatch, SymptomQuery, MAX_SYMPTOM_RESULTS,
};
pub use service::disease_service::{
    DiseaseListQuery, DiseasePage, DiseaseService, DiseaseSummary, QueryError, QueryResult,
    ServiceConfig, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
