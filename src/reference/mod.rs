//! Reference Data
//!
//! Static tables loaded once at startup and read-only afterwards:
//! - `manufacturer.rs` - per-brand coefficients, sag targets, fallback brands
//! - `diagnostics.rs` - symptom rules and their gated solutions
//! - `store.rs` - the loaded pair plus file locations

pub mod manufacturer;
pub mod diagnostics;
pub mod store;

pub use manufacturer::{BrandCoefficients, FallbackBrands, ManufacturerSpecs, ReboundBand};
pub use diagnostics::{DiagnosticRules, LogicCheck, Solution, SymptomRule};
pub use store::{ReferencePaths, ReferenceStore};
