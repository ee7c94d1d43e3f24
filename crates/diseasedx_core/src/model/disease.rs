//! Disease domain model.
//!
//! # Responsibility
//! - Define the canonical disease record served by every query path.
//! - Derive list projections (`symptoms`, `treatments`) from their text fields.
//! - Compute aggregate dataset statistics.
//!
//! # Invariants
//! - `id` is positive and never reused for another record.
//! - `symptoms`/`treatments` always equal the split of their text fields.
//! - Statistics are recomputed from records, never stored independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable dataset identifier, assigned in build order starting at 1.
pub type DiseaseId = u32;

/// Flag texts accepted as `true` when parsing source tables or query params.
const TRUTHY_FLAGS: [&str; 3] = ["true", "1", "yes"];

/// Canonical disease record.
///
/// Serialized field names follow the published dataset document, so the
/// text fields appear as `symptoms`/`treatments` and the derived lists as
/// `symptoms_list`/`treatments_list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub id: DiseaseId,
    pub name: String,
    pub disease_code: String,
    /// Raw comma-separated symptom text, used verbatim by symptom matching.
    #[serde(rename = "symptoms", default)]
    pub symptoms_text: String,
    #[serde(rename = "treatments", default)]
    pub treatments_text: String,
    pub contagious: bool,
    pub chronic: bool,
    #[serde(rename = "symptoms_list", default)]
    pub symptoms: Vec<String>,
    #[serde(rename = "treatments_list", default)]
    pub treatments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`DiseaseRecord::new`]; list projections are derived, not passed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewDisease {
    pub name: String,
    pub disease_code: String,
    pub symptoms_text: String,
    pub treatments_text: String,
    pub contagious: bool,
    pub chronic: bool,
}

/// Validation failures for [`DiseaseRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiseaseValidationError {
    ZeroId,
    EmptyName(DiseaseId),
    EmptyCode(DiseaseId),
    SymptomsOutOfSync(DiseaseId),
    TreatmentsOutOfSync(DiseaseId),
}

impl Display for DiseaseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroId => write!(f, "disease id must be positive"),
            Self::EmptyName(id) => write!(f, "disease {id} has an empty name"),
            Self::EmptyCode(id) => write!(f, "disease {id} has an empty disease_code"),
            Self::SymptomsOutOfSync(id) => {
                write!(f, "disease {id} symptoms_list does not match symptoms text")
            }
            Self::TreatmentsOutOfSync(id) => {
                write!(f, "disease {id} treatments_list does not match treatments text")
            }
        }
    }
}

impl Error for DiseaseValidationError {}

impl DiseaseRecord {
    /// Creates a record and derives its list projections.
    ///
    /// Both timestamps are set to `built_at`.
    pub fn new(id: DiseaseId, input: NewDisease, built_at: DateTime<Utc>) -> Self {
        let symptoms = split_comma_list(&input.symptoms_text);
        let treatments = split_comma_list(&input.treatments_text);
        Self {
            id,
            name: input.name,
            disease_code: input.disease_code,
            symptoms_text: input.symptoms_text,
            treatments_text: input.treatments_text,
            contagious: input.contagious,
            chronic: input.chronic,
            symptoms,
            treatments,
            created_at: built_at,
            updated_at: built_at,
        }
    }

    /// Checks identity, required text and list/text consistency.
    pub fn validate(&self) -> Result<(), DiseaseValidationError> {
        if self.id == 0 {
            return Err(DiseaseValidationError::ZeroId);
        }
        if self.name.trim().is_empty() {
            return Err(DiseaseValidationError::EmptyName(self.id));
        }
        if self.disease_code.trim().is_empty() {
            return Err(DiseaseValidationError::EmptyCode(self.id));
        }
        if self.symptoms != split_comma_list(&self.symptoms_text) {
            return Err(DiseaseValidationError::SymptomsOutOfSync(self.id));
        }
        if self.treatments != split_comma_list(&self.treatments_text) {
            return Err(DiseaseValidationError::TreatmentsOutOfSync(self.id));
        }
        Ok(())
    }

    /// Number of entries in the parsed symptom list.
    pub fn symptom_count(&self) -> usize {
        self.symptoms.len()
    }
}

/// Aggregate counts over a record collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub total_diseases: usize,
    pub contagious_diseases: usize,
    pub chronic_diseases: usize,
    pub non_contagious_diseases: usize,
    pub non_chronic_diseases: usize,
}

impl DatasetStatistics {
    /// Computes statistics from the given records.
    pub fn compute(records: &[DiseaseRecord]) -> Self {
        let total = records.len();
        let contagious = records.iter().filter(|record| record.contagious).count();
        let chronic = records.iter().filter(|record| record.chronic).count();
        Self {
            total_diseases: total,
            contagious_diseases: contagious,
            chronic_diseases: chronic,
            non_contagious_diseases: total - contagious,
            non_chronic_diseases: total - chronic,
        }
    }
}

/// Splits comma-separated text into trimmed entries.
///
/// Empty text yields an empty list. Inner empty segments (`"a,,b"`) are kept
/// as empty strings so the list length mirrors the source text.
pub fn split_comma_list(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',').map(|part| part.trim().to_string()).collect()
}

/// Parses a source flag; `true|1|yes` (any case, surrounding space ignored).
pub fn parse_flag(value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    TRUTHY_FLAGS.contains(&normalized.as_str())
}
