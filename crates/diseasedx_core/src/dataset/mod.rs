//! In-memory dataset snapshot and its loaders.
//!
//! # Responsibility
//! - Hold the immutable record collection every query runs against.
//! - Build snapshots from CSV tables, JSON documents or the SQLite store.
//!
//! # Invariants
//! - Record identifiers are unique within a snapshot.
//! - A snapshot is never mutated after construction; share it via `Arc`.
//! - Statistics always reflect the held records.

use crate::db::DbError;
use crate::model::disease::{DatasetStatistics, DiseaseId, DiseaseRecord, DiseaseValidationError};
use crate::repo::disease_repo::{DiseaseRepository, RepoError};
use log::info;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub mod builder;
pub mod document;

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Failures while building, reading or writing a dataset.
#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidRecord(DiseaseValidationError),
    DuplicateId(DiseaseId),
    Repo(RepoError),
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "dataset io error: {err}"),
            Self::Csv(err) => write!(f, "dataset csv error: {err}"),
            Self::Json(err) => write!(f, "dataset json error: {err}"),
            Self::InvalidRecord(err) => write!(f, "invalid dataset record: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate disease id {id} in dataset"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidRecord(err) => Some(err),
            Self::DuplicateId(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<DiseaseValidationError> for DatasetError {
    fn from(value: DiseaseValidationError) -> Self {
        Self::InvalidRecord(value)
    }
}

impl From<RepoError> for DatasetError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for DatasetError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Read-only access to a loaded record collection.
///
/// Query services are generic over this trait so tests can inject fixtures.
pub trait DiseaseProvider {
    /// All records in stored (identifier) order.
    fn records(&self) -> &[DiseaseRecord];
    /// Record with the given identifier, if present.
    fn find(&self, id: DiseaseId) -> Option<&DiseaseRecord>;
    /// Statistics snapshot for [`DiseaseProvider::records`].
    fn statistics(&self) -> DatasetStatistics;
}

/// Immutable, validated record collection with an id index.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<DiseaseRecord>,
    index: HashMap<DiseaseId, usize>,
    stats: DatasetStatistics,
}

impl Dataset {
    /// Validates records and builds the id index.
    ///
    /// Records keep the given order.
    ///
    /// # Errors
    /// - `InvalidRecord` when any record fails [`DiseaseRecord::validate`].
    /// - `DuplicateId` when two records share an identifier.
    pub fn new(records: Vec<DiseaseRecord>) -> DatasetResult<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            record.validate()?;
            if index.insert(record.id, position).is_some() {
                return Err(DatasetError::DuplicateId(record.id));
            }
        }
        let stats = DatasetStatistics::compute(&records);
        Ok(Self {
            records,
            index,
            stats,
        })
    }

    /// Loads every stored record through a repository.
    pub fn from_repository(repo: &impl DiseaseRepository) -> DatasetResult<Self> {
        let records = repo.load_all()?;
        let dataset = Self::new(records)?;
        info!(
            "event=dataset_load module=dataset status=ok source=repository records={}",
            dataset.len()
        );
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the snapshot and returns its records.
    pub fn into_records(self) -> Vec<DiseaseRecord> {
        self.records
    }
}

impl DiseaseProvider for Dataset {
    fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    fn find(&self, id: DiseaseId) -> Option<&DiseaseRecord> {
        self.index.get(&id).map(|&position| &self.records[position])
    }

    fn statistics(&self) -> DatasetStatistics {
        self.stats
    }
}

impl<P: DiseaseProvider + ?Sized> DiseaseProvider for Arc<P> {
    fn records(&self) -> &[DiseaseRecord] {
        (**self).records()
    }

    fn find(&self, id: DiseaseId) -> Option<&DiseaseRecord> {
        (**self).find(id)
    }

    fn statistics(&self) -> DatasetStatistics {
        (**self).statistics()
    }
}

impl<P: DiseaseProvider + ?Sized> DiseaseProvider for &P {
    fn records(&self) -> &[DiseaseRecord] {
        (**self).records()
    }

    fn find(&self, id: DiseaseId) -> Option<&DiseaseRecord> {
        (**self).find(id)
    }

    fn statistics(&self) -> DatasetStatistics {
        (**self).statistics()
    }
}
