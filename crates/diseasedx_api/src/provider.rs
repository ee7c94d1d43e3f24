//! Startup dataset loading.
//!
//! The SQLite store is preferred when configured. Any failure there falls
//! back to the JSON document; only failure of both aborts startup.

use crate::config::ApiConfig;
use diseasedx_core::db::open_db;
use diseasedx_core::{load_document, Dataset, DatasetError, SqliteDiseaseRepository};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Where the serving snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Database(PathBuf),
    Document(PathBuf),
}

impl DatasetSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::Document(_) => "document",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("no dataset could be loaded from `{}`: {source}", .path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: DatasetError,
}

pub struct LoadedDataset {
    pub dataset: Dataset,
    pub source: DatasetSource,
}

pub fn load_dataset(config: &ApiConfig) -> Result<LoadedDataset, LoadError> {
    if let Some(db_path) = &config.db_path {
        match load_from_database(db_path) {
            Ok(dataset) => {
                info!(
                    "event=dataset_ready module=api source=database path={} records={}",
                    db_path.display(),
                    dataset.len()
                );
                return Ok(LoadedDataset {
                    dataset,
                    source: DatasetSource::Database(db_path.clone()),
                });
            }
            Err(err) => warn!(
                "event=dataset_fallback module=api from=database to=document path={} error={}",
                db_path.display(),
                err
            ),
        }
    }

    let dataset = load_document(&config.data_path).map_err(|source| LoadError {
        path: config.data_path.clone(),
        source,
    })?;
    info!(
        "event=dataset_ready module=api source=document path={} records={}",
        config.data_path.display(),
        dataset.len()
    );
    Ok(LoadedDataset {
        dataset,
        source: DatasetSource::Document(config.data_path.clone()),
    })
}

fn load_from_database(path: &Path) -> Result<Dataset, DatasetError> {
    // `open_db` would create an empty file; a missing store should fall back.
    if !path.exists() {
        return Err(DatasetError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "dataset database does not exist",
        )));
    }
    let conn = open_db(path)?;
    let dataset = Dataset::from_repository(&SqliteDiseaseRepository::new(&conn))?;
    Ok(dataset)
}
