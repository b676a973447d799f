//! Persisting analysis results

pub mod report;
