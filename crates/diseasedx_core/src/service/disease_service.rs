//! Disease query service.
//!
//! # Responsibility
//! - List with conjunctive filters and 1-based pagination.
//! - Fetch one record by identifier.
//! - Rank diseases for a symptom list.
//! - Expose dataset statistics.
//!
//! # Invariants
//! - Every operation is a pure read of the provider snapshot.
//! - `DiseasePage::count` does not depend on the requested page.
//! - A page past the end is empty with no next/previous link.

use crate::dataset::DiseaseProvider;
use crate::model::disease::{DatasetStatistics, DiseaseId, DiseaseRecord};
use crate::search::filter::DiseaseFilter;
use crate::search::symptoms::{
    rank_symptom_matches, EmptySymptomInput, SymptomCheckResult, SymptomQuery,
    MAX_SYMPTOM_RESULTS,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

pub type QueryResult<T> = Result<T, QueryError>;

/// Errors surfaced to query callers. Nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    NotFound(DiseaseId),
    InvalidInput(String),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "disease not found: {id}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl Error for QueryError {}

impl From<EmptySymptomInput> for QueryError {
    fn from(value: EmptySymptomInput) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

/// Tunables for [`DiseaseService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub page_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ServiceConfig {
    /// `0` falls back to the default; values above the cap are clamped.
    pub fn with_page_size(page_size: usize) -> Self {
        let page_size = match page_size {
            0 => DEFAULT_PAGE_SIZE,
            value => value.min(MAX_PAGE_SIZE),
        };
        Self { page_size }
    }
}

/// List request: filters plus an optional 1-based page (`None` or `0` = 1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiseaseListQuery {
    pub filter: DiseaseFilter,
    pub page: Option<usize>,
}

/// Summary projection used by list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseSummary {
    pub id: DiseaseId,
    pub name: String,
    pub disease_code: String,
    pub contagious: bool,
    pub chronic: bool,
    pub symptoms_count: usize,
}

impl From<&DiseaseRecord> for DiseaseSummary {
    fn from(record: &DiseaseRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            disease_code: record.disease_code.clone(),
            contagious: record.contagious,
            chronic: record.chronic,
            symptoms_count: record.symptom_count(),
        }
    }
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseasePage {
    /// Records matching the filter across all pages.
    pub count: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub results: Vec<DiseaseSummary>,
}

impl DiseasePage {
    pub fn total_pages(&self) -> usize {
        self.count.div_ceil(self.page_size)
    }
}

/// Query facade over a shared, immutable dataset.
pub struct DiseaseService<P: DiseaseProvider> {
    provider: P,
    config: ServiceConfig,
}

impl<P: DiseaseProvider> DiseaseService<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, ServiceConfig::default())
    }

    pub fn with_config(provider: P, config: ServiceConfig) -> Self {
        let config = ServiceConfig::with_page_size(config.page_size);
        Self { provider, config }
    }

    pub fn config(&self) -> ServiceConfig {
        self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Filters in stored order and returns the requested page.
    pub fn list(&self, query: &DiseaseListQuery) -> DiseasePage {
        let page_size = self.config.page_size;
        let page = query.page.filter(|&page| page > 0).unwrap_or(1);
        let filter = query.filter.compile();

        let matching = self
            .provider
            .records()
            .iter()
            .filter(|record| filter.matches(record))
            .collect::<Vec<_>>();
        let count = matching.len();
        let total_pages = count.div_ceil(page_size);

        let results = matching
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .map(DiseaseSummary::from)
            .collect::<Vec<_>>();

        debug!(
            "event=disease_list module=service count={} page={} returned={}",
            count,
            page,
            results.len()
        );

        DiseasePage {
            count,
            page,
            page_size,
            has_next: page < total_pages,
            has_previous: page > 1 && page <= total_pages,
            results,
        }
    }

    /// Returns the full record for `id`.
    ///
    /// # Errors
    /// - `NotFound` when no record carries `id`.
    pub fn get_by_id(&self, id: DiseaseId) -> QueryResult<DiseaseRecord> {
        self.provider
            .find(id)
            .cloned()
            .ok_or(QueryError::NotFound(id))
    }

    /// Normalizes raw symptom strings and ranks matching diseases.
    ///
    /// # Errors
    /// - `InvalidInput` when nothing usable remains after trimming.
    pub fn check_symptoms<I, S>(&self, symptoms: I) -> QueryResult<SymptomCheckResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let query = SymptomQuery::new(symptoms)?;
        Ok(self.check_symptom_query(&query))
    }

    /// Ranks diseases for an already-normalized query.
    pub fn check_symptom_query(&self, query: &SymptomQuery) -> SymptomCheckResult {
        let result = rank_symptom_matches(self.provider.records(), query, MAX_SYMPTOM_RESULTS);
        debug!(
            "event=symptom_check module=service inputs={} total_matches={} returned={}",
            query.len(),
            result.total_matches,
            result.results.len()
        );
        result
    }

    pub fn statistics(&self) -> DatasetStatistics {
        self.provider.statistics()
    }
}
