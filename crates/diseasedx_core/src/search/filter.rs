//! List filters: case-insensitive text search plus exact flag filters.

use crate::model::disease::DiseaseRecord;

/// Conjunctive filter for list queries. `None` fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiseaseFilter {
    /// Substring matched against name or raw symptom text, ignoring case.
    pub search: Option<String>,
    pub contagious: Option<bool>,
    pub chronic: Option<bool>,
}

impl DiseaseFilter {
    /// Returns a matcher with the search text normalized once.
    ///
    /// Blank search text is treated as no search.
    pub fn compile(&self) -> CompiledFilter {
        CompiledFilter {
            needle: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_lowercase),
            contagious: self.contagious,
            chronic: self.chronic,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.compile().is_unconstrained()
    }
}

/// Filter ready for repeated evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFilter {
    needle: Option<String>,
    contagious: Option<bool>,
    chronic: Option<bool>,
}

impl CompiledFilter {
    pub fn matches(&self, record: &DiseaseRecord) -> bool {
        if self.contagious.is_some_and(|wanted| record.contagious != wanted) {
            return false;
        }
        if self.chronic.is_some_and(|wanted| record.chronic != wanted) {
            return false;
        }
        match &self.needle {
            Some(needle) => {
                contains_ignore_case(&record.name, needle)
                    || contains_ignore_case(&record.symptoms_text, needle)
            }
            None => true,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.needle.is_none() && self.contagious.is_none() && self.chronic.is_none()
    }
}

/// `needle` must already be lowercase.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
