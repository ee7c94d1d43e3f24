//! Domain model for the disease dataset.
//!
//! # Invariants
//! - Every record is identified by a stable, positive `DiseaseId`.
//! - Derived projections are computed from text fields, never edited.

pub mod disease;
