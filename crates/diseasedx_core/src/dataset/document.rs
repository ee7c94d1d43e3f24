//! JSON dataset document (`{"diseases": [...], "stats": {...}}`).
//!
//! # Invariants
//! - Stored `stats` are informational; loading always recomputes them.
//! - Written documents are pretty-printed and end with a newline.

use super::{Dataset, DatasetResult};
use crate::dataset::DiseaseProvider;
use crate::model::disease::{DatasetStatistics, DiseaseRecord};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Serialized form of a dataset snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDocument {
    pub diseases: Vec<DiseaseRecord>,
    #[serde(default)]
    pub stats: Option<DatasetStatistics>,
}

impl DatasetDocument {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            diseases: dataset.records().to_vec(),
            stats: Some(dataset.statistics()),
        }
    }

    /// Validates the records and builds a snapshot.
    pub fn into_dataset(self) -> DatasetResult<Dataset> {
        let stored = self.stats;
        let dataset = Dataset::new(self.diseases)?;
        if let Some(stored) = stored {
            if stored != dataset.statistics() {
                warn!(
                    "event=dataset_stats_mismatch module=dataset stored_total={} actual_total={}",
                    stored.total_diseases,
                    dataset.statistics().total_diseases
                );
            }
        }
        Ok(dataset)
    }
}

/// Reads and validates a document.
pub fn read_document(reader: impl Read) -> DatasetResult<Dataset> {
    let document: DatasetDocument = serde_json::from_reader(reader)?;
    document.into_dataset()
}

/// Loads a document from disk.
pub fn load_document(path: impl AsRef<Path>) -> DatasetResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = read_document(BufReader::new(file))?;
    info!(
        "event=dataset_load module=dataset status=ok source=document path={} records={}",
        path.display(),
        dataset.len()
    );
    Ok(dataset)
}

/// Writes a dataset as a pretty-printed document.
pub fn write_document(dataset: &Dataset, mut writer: impl Write) -> DatasetResult<()> {
    let document = DatasetDocument::from_dataset(dataset);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes a document to disk, creating parent directories as needed.
pub fn save_document(dataset: &Dataset, path: impl AsRef<Path>) -> DatasetResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_document(dataset, BufWriter::new(file))?;
    info!(
        "event=dataset_save module=dataset status=ok path={} records={}",
        path.display(),
        dataset.len()
    );
    Ok(())
}
