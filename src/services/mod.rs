//! Core services: guarding, classification, extraction, scanning, and walking

pub mod aggregate;
pub mod extract;
pub mod format;
pub mod guard;
pub mod handoff;
pub mod language;
pub mod progress;
pub mod scanner;
pub mod source;
pub mod stats;
pub mod walker;
