//! Manufacturer coefficients and sag targets
//!
//! JSON shape:
//! ```text
//! {
//!   "forks":  { "rockshox": { "psi_multiplier": 1.0, "base_lsc": 2, "base_hsc": 1,
//!                             "rebound_table": [{"max_kg": 70, "clicks": 8}] } },
//!   "shocks": { "standard_air": { ... } },
//!   "sag_targets": { "downhill": { "fork": 0.3, "shock": 0.33 } },
//!   "fallback_brands": { "fork": "rockshox", "shock": "standard_air" }
//! }
//! ```
//! Every field is optional. Section and brand keys are plain strings because
//! shock sections are keyed by spring type as well as by brand.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ReferenceDataError;
use crate::model::{BikeType, Brand, ComponentKind};

pub const DEFAULT_PSI_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_BASE_LSC: i32 = 2;
pub const DEFAULT_BASE_HSC: i32 = 1;
pub const DEFAULT_REBOUND_CLICKS: i32 = 6;
pub const DEFAULT_SAG_FRACTION: f64 = 0.25;

/// Coefficients used when neither the brand nor the fallback brand is listed
static NO_COEFFICIENTS: BrandCoefficients = BrandCoefficients {
    psi_multiplier: None,
    base_lsc: None,
    base_hsc: None,
    rebound_table: Vec::new(),
    declared_keys: 0,
};

/// One weight band of a rebound table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReboundBand {
    pub max_kg: f64,
    pub clicks: i32,
}

/// Per-brand tuning coefficients. Missing fields fall back to the crate defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct BrandCoefficients {
    pub psi_multiplier: Option<f64>,
    pub base_lsc: Option<i32>,
    pub base_hsc: Option<i32>,
    /// Ascending by `max_kg`; the last band doubles as the overflow default
    pub rebound_table: Vec<ReboundBand>,
    /// Keys present in the source JSON object, recognised or not
    #[serde(skip_serializing)]
    declared_keys: usize,
}

/// Recognised fields of a brand record
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCoefficients {
    psi_multiplier: Option<f64>,
    base_lsc: Option<i32>,
    base_hsc: Option<i32>,
    rebound_table: Vec<ReboundBand>,
}

impl TryFrom<Map<String, Value>> for BrandCoefficients {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let declared_keys = object.len();
        let raw: RawCoefficients = serde_json::from_value(Value::Object(object))?;
        Ok(Self {
            psi_multiplier: raw.psi_multiplier,
            base_lsc: raw.base_lsc,
            base_hsc: raw.base_hsc,
            rebound_table: raw.rebound_table,
            declared_keys,
        })
    }
}

impl BrandCoefficients {
    pub fn psi_multiplier(&self) -> f64 {
        self.psi_multiplier.unwrap_or(DEFAULT_PSI_MULTIPLIER)
    }

    pub fn base_lsc(&self) -> i32 {
        self.base_lsc.unwrap_or(DEFAULT_BASE_LSC)
    }

    pub fn base_hsc(&self) -> i32 {
        self.base_hsc.unwrap_or(DEFAULT_BASE_HSC)
    }

    /// Only a record with no keys at all counts as absent and triggers the
    /// fallback brand. `{"rebound_table": []}` or `{"notes": ".."}` are kept
    /// and use the crate defaults.
    pub fn is_empty(&self) -> bool {
        self.declared_keys == 0
            && self.psi_multiplier.is_none()
            && self.base_lsc.is_none()
            && self.base_hsc.is_none()
            && self.rebound_table.is_empty()
    }

    /// Base rebound clicks for a rider weight.
    ///
    /// First band whose `max_kg` covers the weight; heavier riders get the
    /// last band; an empty table gives `DEFAULT_REBOUND_CLICKS`.
    pub fn rebound_clicks(&self, weight_kg: f64) -> i32 {
        self.rebound_table
            .iter()
            .find(|band| band.max_kg >= weight_kg)
            .or_else(|| self.rebound_table.last())
            .map(|band| band.clicks)
            .unwrap_or(DEFAULT_REBOUND_CLICKS)
    }
}

fn default_fork_fallback() -> String {
    "rockshox".to_string()
}

fn default_shock_fallback() -> String {
    "standard_air".to_string()
}

/// Brand key consulted when a component's own brand is not listed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackBrands {
    #[serde(default = "default_fork_fallback")]
    pub fork: String,
    #[serde(default = "default_shock_fallback")]
    pub shock: String,
}

impl Default for FallbackBrands {
    fn default() -> Self {
        Self {
            fork: default_fork_fallback(),
            shock: default_shock_fallback(),
        }
    }
}

impl FallbackBrands {
    pub fn for_kind(&self, kind: ComponentKind) -> &str {
        match kind {
            ComponentKind::Fork => &self.fork,
            ComponentKind::Shock => &self.shock,
        }
    }
}

/// The manufacturer reference table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManufacturerSpecs {
    pub forks: FxHashMap<String, BrandCoefficients>,
    pub shocks: FxHashMap<String, BrandCoefficients>,
    /// bike_type -> component kind ("fork"/"shock") -> sag fraction
    pub sag_targets: FxHashMap<String, FxHashMap<String, f64>>,
    pub fallback_brands: FallbackBrands,
}

impl ManufacturerSpecs {
    /// Parse and normalise a manufacturer table
    pub fn from_json_str(json: &str) -> Result<Self, ReferenceDataError> {
        let mut specs: ManufacturerSpecs = serde_json::from_str(json)?;
        specs.normalize();
        Ok(specs)
    }

    pub fn from_file(path: &Path) -> Result<Self, ReferenceDataError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Sort rebound bands and drop sag fractions outside [0, 1]
    fn normalize(&mut self) {
        for coefficients in self.forks.values_mut().chain(self.shocks.values_mut()) {
            coefficients
                .rebound_table
                .sort_by(|a, b| a.max_kg.total_cmp(&b.max_kg));
        }

        for (bike_type, targets) in self.sag_targets.iter_mut() {
            targets.retain(|kind, fraction| {
                let valid = (0.0..=1.0).contains(&*fraction);
                if !valid {
                    tracing::warn!(
                        "Ignoring sag target {} for {}/{} (must be within 0..=1)",
                        fraction,
                        bike_type,
                        kind
                    );
                }
                valid
            });
        }
    }

    pub fn section(&self, kind: ComponentKind) -> &FxHashMap<String, BrandCoefficients> {
        match kind {
            ComponentKind::Fork => &self.forks,
            ComponentKind::Shock => &self.shocks,
        }
    }

    /// Coefficients for a brand, falling back to the kind's fallback brand,
    /// then to an empty record (all defaults).
    pub fn coefficients(&self, kind: ComponentKind, brand: Brand) -> &BrandCoefficients {
        let section = self.section(kind);
        section
            .get(brand.as_str())
            .filter(|c| !c.is_empty())
            .or_else(|| section.get(self.fallback_brands.for_kind(kind)))
            .unwrap_or(&NO_COEFFICIENTS)
    }

    /// Target sag as a fraction of travel; `DEFAULT_SAG_FRACTION` when unlisted
    pub fn sag_fraction(&self, bike_type: BikeType, kind: ComponentKind) -> f64 {
        self.sag_targets
            .get(bike_type.as_str())
            .and_then(|targets| targets.get(kind.as_str()))
            .copied()
            .unwrap_or(DEFAULT_SAG_FRACTION)
    }
}
