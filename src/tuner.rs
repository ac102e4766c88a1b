//! Suspension Tuner
//!
//! Entry point for callers: owns the reference store and exposes the two
//! engine operations. Holds no mutable state, so one instance can be shared
//! across threads behind an `Arc`.

use crate::baseline::{calculate_baseline, Recommendations};
use crate::diagnosis::{diagnose, DiagnosisResult};
use crate::model::BikeSetup;
use crate::reference::{ReferencePaths, ReferenceStore};

pub struct SuspensionTuner {
    store: ReferenceStore,
}

impl SuspensionTuner {
    pub fn new(store: ReferenceStore) -> Self {
        Self { store }
    }

    /// Load reference data from disk; missing files fall back to defaults
    pub fn load(paths: &ReferencePaths) -> Self {
        Self::new(ReferenceStore::load(paths))
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Baseline settings for the fork and (if fitted) the shock
    pub fn compute_baseline(&self, setup: &BikeSetup) -> Recommendations {
        calculate_baseline(setup, self.store.specs())
    }

    /// Ranked fixes for a symptom
    pub fn diagnose(&self, setup: &BikeSetup, symptom_id: &str) -> DiagnosisResult {
        diagnose(setup, symptom_id, self.store.rules())
    }
}

impl Default for SuspensionTuner {
    fn default() -> Self {
        Self::new(ReferenceStore::default())
    }
}
