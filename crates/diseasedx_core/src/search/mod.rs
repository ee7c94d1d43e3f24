//! Record matching over in-memory snapshots.
//!
//! # Responsibility
//! - Filter predicates for list/search queries.
//! - Substring-based symptom scoring and ranking.
//!
//! Both run as linear scans over the stored record order.

pub mod filter;
pub mod symptoms;
