//! Persistence contracts for the dataset store.
//!
//! # Responsibility
//! - Keep SQL behind a repository trait so loaders stay storage-agnostic.
//!
//! # Invariants
//! - Writes validate records before touching SQL.
//! - Reads reject persisted rows that fail validation.

pub mod disease_repo;
