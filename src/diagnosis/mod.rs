//! Symptom Diagnosis
//!
//! Rule filter-and-rank over the diagnostic table. See `resolver.rs`.

pub mod resolver;

pub use resolver::{diagnose, DiagnosisResult, NO_FIX_MESSAGE};
