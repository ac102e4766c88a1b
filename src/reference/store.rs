//! Reference Store
//!
//! Holds both reference tables. Built once, then shared read-only
//! (behind `Arc` in the server). Loading never fails: a missing or
//! unparseable file is logged and replaced by an empty table, and the
//! engines fall back to their built-in defaults.

use std::path::{Path, PathBuf};

use super::diagnostics::DiagnosticRules;
use super::manufacturer::ManufacturerSpecs;
use crate::error::ReferenceDataError;

pub const DEFAULT_SPECS_FILE: &str = "manufacturer_specs.json";
pub const DEFAULT_LOGIC_FILE: &str = "suspension_logic.json";

/// Locations of the two reference files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePaths {
    pub specs: PathBuf,
    pub rules: PathBuf,
}

impl ReferencePaths {
    pub fn new(data_dir: impl AsRef<Path>, specs_file: &str, logic_file: &str) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            specs: data_dir.join(specs_file),
            rules: data_dir.join(logic_file),
        }
    }

    /// Default file names inside `data_dir`
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir, DEFAULT_SPECS_FILE, DEFAULT_LOGIC_FILE)
    }
}

/// Immutable manufacturer + diagnostic tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceStore {
    specs: ManufacturerSpecs,
    rules: DiagnosticRules,
}

impl ReferenceStore {
    pub fn new(specs: ManufacturerSpecs, rules: DiagnosticRules) -> Self {
        Self { specs, rules }
    }

    /// Load both tables, degrading to empty tables on any failure
    pub fn load(paths: &ReferencePaths) -> Self {
        let specs = or_empty(ManufacturerSpecs::from_file(&paths.specs), &paths.specs);
        let rules = or_empty(DiagnosticRules::from_file(&paths.rules), &paths.rules);

        tracing::info!(
            "Reference data loaded: {} fork brands, {} shock brands, {} sag profiles, {} symptoms",
            specs.forks.len(),
            specs.shocks.len(),
            specs.sag_targets.len(),
            rules.len()
        );

        Self { specs, rules }
    }

    pub fn specs(&self) -> &ManufacturerSpecs {
        &self.specs
    }

    pub fn rules(&self) -> &DiagnosticRules {
        &self.rules
    }
}

fn or_empty<T: Default>(result: Result<T, ReferenceDataError>, path: &Path) -> T {
    match result {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("Using empty table for {}: {}", path.display(), e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_join_data_dir() {
        let paths = ReferencePaths::from_data_dir("/opt/tuner");
        assert_eq!(paths.specs, PathBuf::from("/opt/tuner/manufacturer_specs.json"));
        assert_eq!(paths.rules, PathBuf::from("/opt/tuner/suspension_logic.json"));
    }

    #[test]
    fn test_missing_files_degrade_to_empty() {
        let paths = ReferencePaths::new("/nonexistent/dir", "nope.json", "nope_either.json");
        let store = ReferenceStore::load(&paths);
        assert_eq!(store, ReferenceStore::default());
        assert!(store.rules().is_empty());
        assert!(store.specs().forks.is_empty());
    }
}
