//! Batch conversion from a disease CSV table into a dataset snapshot.
//!
//! # Responsibility
//! - Map source rows (`Name`, `Symptoms`, `Treatments`, `Disease_Code`,
//!   `Contagious`, `Chronic`) to canonical records.
//! - Report every skipped row with its reason instead of dropping it silently.
//!
//! # Invariants
//! - Identifiers are assigned densely from 1 in the order rows are kept.
//! - All records of one build share the same timestamp.

use super::{Dataset, DatasetResult};
use crate::model::disease::{parse_flag, DiseaseId, DiseaseRecord, NewDisease};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

/// One row of the source table. Missing columns read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourceRow {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Symptoms", default)]
    pub symptoms: Option<String>,
    #[serde(rename = "Treatments", default)]
    pub treatments: Option<String>,
    #[serde(rename = "Disease_Code", default)]
    pub disease_code: Option<String>,
    #[serde(rename = "Contagious", default)]
    pub contagious: Option<String>,
    #[serde(rename = "Chronic", default)]
    pub chronic: Option<String>,
}

/// Why a source row produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    MissingCode,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingName => "missing_name",
            Self::MissingCode => "missing_code",
        }
    }
}

/// Outcome of feeding one row to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Kept(DiseaseId),
    Skipped(SkipReason),
}

/// Skipped row with its 1-based record index.
///
/// Counts CSV records after the header, not file lines: a quoted field
/// spanning lines is still one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRow {
    pub record: usize,
    pub reason: SkipReason,
}

/// Validation summary of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub kept: usize,
    pub skipped: Vec<SkippedRow>,
}

impl BuildReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn rows_seen(&self) -> usize {
        self.kept + self.skipped.len()
    }
}

/// Finished build: the snapshot plus its validation report.
#[derive(Debug, Clone)]
pub struct DatasetBuild {
    pub dataset: Dataset,
    pub report: BuildReport,
}

/// Incremental builder; feed rows in source order, then [`finish`](Self::finish).
pub struct DatasetBuilder {
    built_at: DateTime<Utc>,
    records: Vec<DiseaseRecord>,
    report: BuildReport,
}

impl DatasetBuilder {
    pub fn new(built_at: DateTime<Utc>) -> Self {
        Self {
            built_at,
            records: Vec::new(),
            report: BuildReport::default(),
        }
    }

    /// Converts one source row, keeping it when name and code are present.
    pub fn push_row(&mut self, row: &SourceRow) -> RowOutcome {
        let record_index = self.report.rows_seen() + 1;
        let name = non_blank(row.name.as_deref());
        let code = non_blank(row.disease_code.as_deref());

        let (name, code) = match (name, code) {
            (None, _) => return self.skip(record_index, SkipReason::MissingName),
            (_, None) => return self.skip(record_index, SkipReason::MissingCode),
            (Some(name), Some(code)) => (name, code),
        };

        let id = DiseaseId::try_from(self.records.len() + 1).unwrap_or(DiseaseId::MAX);
        let input = NewDisease {
            name: name.to_string(),
            disease_code: code.to_string(),
            symptoms_text: trimmed_or_empty(row.symptoms.as_deref()),
            treatments_text: trimmed_or_empty(row.treatments.as_deref()),
            contagious: row.contagious.as_deref().is_some_and(parse_flag),
            chronic: row.chronic.as_deref().is_some_and(parse_flag),
        };
        self.records.push(DiseaseRecord::new(id, input, self.built_at));
        self.report.kept += 1;
        RowOutcome::Kept(id)
    }

    /// Validates the collected records and returns the snapshot.
    pub fn finish(self) -> DatasetResult<DatasetBuild> {
        let dataset = Dataset::new(self.records)?;
        Ok(DatasetBuild {
            dataset,
            report: self.report,
        })
    }

    fn skip(&mut self, record: usize, reason: SkipReason) -> RowOutcome {
        debug!(
            "event=dataset_row_skipped module=dataset record={} reason={}",
            record,
            reason.as_str()
        );
        self.report.skipped.push(SkippedRow { record, reason });
        RowOutcome::Skipped(reason)
    }
}

/// Builds a snapshot from CSV data with a header row.
///
/// # Errors
/// - Returns `Csv` when the table cannot be read or decoded.
pub fn build_from_csv_reader(
    reader: impl Read,
    built_at: DateTime<Utc>,
) -> DatasetResult<DatasetBuild> {
    let started_at = Instant::now();
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut builder = DatasetBuilder::new(built_at);
    for row in csv_reader.deserialize::<SourceRow>() {
        builder.push_row(&row?);
    }

    let build = builder.finish()?;
    info!(
        "event=dataset_build module=dataset status=ok kept={} skipped={} duration_ms={}",
        build.report.kept,
        build.report.skipped_count(),
        started_at.elapsed().as_millis()
    );
    Ok(build)
}

/// Builds a snapshot from a CSV file on disk.
pub fn build_from_csv_path(
    path: impl AsRef<Path>,
    built_at: DateTime<Utc>,
) -> DatasetResult<DatasetBuild> {
    let file = File::open(path.as_ref())?;
    build_from_csv_reader(file, built_at)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn trimmed_or_empty(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}
