//! Symptom-to-disease matching.
//!
//! # Responsibility
//! - Normalize caller symptom input.
//! - Score every record by how many input symptoms its raw symptom text
//!   contains, then rank and truncate.
//!
//! # Invariants
//! - Scoring is containment against `symptoms_text`, not the parsed list.
//! - Only records with at least one matched input symptom qualify.
//! - Ranking is a stable descending sort by match count.
//! - `total_matches` counts qualifying records before truncation.

use crate::model::disease::{DiseaseId, DiseaseRecord};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of ranked entries returned by a symptom check.
pub const MAX_SYMPTOM_RESULTS: usize = 10;

/// Raised when no usable symptom remains after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptySymptomInput;

impl Display for EmptySymptomInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "at least one non-empty symptom is required")
    }
}

impl Error for EmptySymptomInput {}

/// Trimmed, non-empty symptom list in caller order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomQuery {
    symptoms: Vec<String>,
    lowered: Vec<String>,
}

impl SymptomQuery {
    /// Trims every entry and drops empty ones.
    ///
    /// Duplicates are kept; each occurrence is scored on its own.
    pub fn new<I, S>(raw: I) -> Result<Self, EmptySymptomInput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symptoms = raw
            .into_iter()
            .map(|symptom| symptom.as_ref().trim().to_string())
            .filter(|symptom| !symptom.is_empty())
            .collect::<Vec<_>>();
        if symptoms.is_empty() {
            return Err(EmptySymptomInput);
        }
        let lowered = symptoms.iter().map(|symptom| symptom.to_lowercase()).collect();
        Ok(Self { symptoms, lowered })
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Number of input symptoms found in `symptoms_text`.
    pub fn match_count(&self, record: &DiseaseRecord) -> usize {
        if record.symptoms_text.is_empty() {
            return 0;
        }
        let haystack = record.symptoms_text.to_lowercase();
        self.lowered
            .iter()
            .filter(|needle| haystack.contains(needle.as_str()))
            .count()
    }
}

/// One ranked symptom-check entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomMatch {
    pub id: DiseaseId,
    pub name: String,
    pub disease_code: String,
    pub contagious: bool,
    pub chronic: bool,
    #[serde(rename = "match_score")]
    pub match_count: usize,
    pub match_percentage: u32,
    #[serde(rename = "symptoms_list")]
    pub symptoms: Vec<String>,
}

/// Full symptom-check answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomCheckResult {
    pub input_symptoms: Vec<String>,
    /// Qualifying records before truncation.
    pub total_matches: usize,
    pub results: Vec<SymptomMatch>,
}

/// Scores `records` against `query` and keeps the best `limit` entries.
pub fn rank_symptom_matches(
    records: &[DiseaseRecord],
    query: &SymptomQuery,
    limit: usize,
) -> SymptomCheckResult {
    let mut scored = records
        .iter()
        .filter_map(|record| {
            let count = query.match_count(record);
            (count > 0).then_some((record, count))
        })
        .collect::<Vec<_>>();

    // `sort_by` is stable, so equal counts keep dataset order.
    scored.sort_by(|(_, left), (_, right)| right.cmp(left));
    let total_matches = scored.len();

    let results = scored
        .into_iter()
        .take(limit)
        .map(|(record, count)| SymptomMatch {
            id: record.id,
            name: record.name.clone(),
            disease_code: record.disease_code.clone(),
            contagious: record.contagious,
            chronic: record.chronic,
            match_count: count,
            match_percentage: match_percentage(count, query.len()),
            symptoms: record.symptoms.clone(),
        })
        .collect();

    SymptomCheckResult {
        input_symptoms: query.symptoms().to_vec(),
        total_matches,
        results,
    }
}

/// `round(matched / total * 100)` with halves rounded up.
pub fn match_percentage(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (matched * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
