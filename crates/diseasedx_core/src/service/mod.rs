//! Read-only query services.
//!
//! # Responsibility
//! - Turn list/detail/symptom/statistics requests into results over an
//!   injected [`DiseaseProvider`](crate::dataset::DiseaseProvider).
//! - Keep HTTP and CLI layers free of filtering and paging rules.

pub mod disease_service;
