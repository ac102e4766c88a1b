//! Suspension Tuner
//!
//! Baseline mountain bike suspension settings and symptom diagnosis.
//!
//! - `model/`: validated rider, component and setup types
//! - `reference/`: manufacturer coefficients, sag targets, diagnostic rules
//! - `baseline/`: pressure / sag / click calculator
//! - `diagnosis/`: symptom to ranked fix resolver
//! - `api_server`: HTTP boundary (feature `api`)
//!
//! Both engines are pure functions over an immutable `ReferenceStore`.

pub mod error;
pub mod model;
pub mod reference;
pub mod baseline;
pub mod diagnosis;
pub mod tuner;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use error::{ReferenceDataError, SetupError};
pub use model::{
    BikeSetup, BikeType, Brand, Capabilities, ComponentKind, RiderProfile, RidingConditions,
    SuspensionComponent, Terrain, Weather,
};
pub use reference::{DiagnosticRules, ManufacturerSpecs, ReferencePaths, ReferenceStore};
pub use baseline::{calculate_baseline, ClickSettings, ComponentRecommendation, Recommendations};
pub use diagnosis::{diagnose, DiagnosisResult};
pub use tuner::SuspensionTuner;

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
