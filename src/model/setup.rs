//! Rider profile and complete bike setup
//!
//! `BikeSetup` is built fresh per request and never mutated. The hardtail
//! rule (no rear shock) is checked once, after the parts are assembled, so
//! every `BikeSetup` in circulation already satisfies it.

use serde::{Deserialize, Serialize};

use super::component::{ComponentKind, SuspensionComponent};
use super::conditions::RidingConditions;
use crate::error::SetupError;

/// Exclusive lower bound for rider weight (kg)
pub const MIN_WEIGHT_KG: f64 = 30.0;
/// Inclusive upper bound for rider weight (kg)
pub const MAX_WEIGHT_KG: f64 = 150.0;

/// Bike category, used to pick sag targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BikeType {
    Hardtail,
    FullSuspensionXc,
    FullSuspensionTrailEnduro,
    Downhill,
}

impl BikeType {
    /// Key used in the sag target table
    pub fn as_str(&self) -> &'static str {
        match self {
            BikeType::Hardtail => "hardtail",
            BikeType::FullSuspensionXc => "full_suspension_xc",
            BikeType::FullSuspensionTrailEnduro => "full_suspension_trail_enduro",
            BikeType::Downhill => "downhill",
        }
    }
}

fn default_skill_level() -> String {
    "intermediate".to_string()
}

/// Rider weight, bike category and self-reported skill
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawRider")]
pub struct RiderProfile {
    weight_kg: f64,
    bike_type: BikeType,
    skill_level: String,
}

impl RiderProfile {
    pub fn new(weight_kg: f64, bike_type: BikeType) -> Result<Self, SetupError> {
        // Written so that NaN is rejected too
        if !(weight_kg > MIN_WEIGHT_KG && weight_kg <= MAX_WEIGHT_KG) {
            return Err(SetupError::WeightOutOfRange(weight_kg));
        }
        Ok(Self {
            weight_kg,
            bike_type,
            skill_level: default_skill_level(),
        })
    }

    pub fn with_skill_level(mut self, skill_level: impl Into<String>) -> Self {
        self.skill_level = skill_level.into();
        self
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn bike_type(&self) -> BikeType {
        self.bike_type
    }

    pub fn skill_level(&self) -> &str {
        &self.skill_level
    }
}

#[derive(Debug, Deserialize)]
struct RawRider {
    weight_kg: f64,
    bike_type: BikeType,
    #[serde(default = "default_skill_level")]
    skill_level: String,
}

impl TryFrom<RawRider> for RiderProfile {
    type Error = SetupError;

    fn try_from(raw: RawRider) -> Result<Self, Self::Error> {
        Ok(RiderProfile::new(raw.weight_kg, raw.bike_type)?.with_skill_level(raw.skill_level))
    }
}

/// Rider + conditions + fork + optional shock
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawBikeSetup")]
pub struct BikeSetup {
    rider: RiderProfile,
    conditions: RidingConditions,
    fork: SuspensionComponent,
    shock: Option<SuspensionComponent>,
}

impl BikeSetup {
    /// Assemble a setup, rejecting a shock on a hardtail
    pub fn new(
        rider: RiderProfile,
        conditions: RidingConditions,
        fork: SuspensionComponent,
        shock: Option<SuspensionComponent>,
    ) -> Result<Self, SetupError> {
        if rider.bike_type() == BikeType::Hardtail && shock.is_some() {
            return Err(SetupError::ShockOnHardtail);
        }
        Ok(Self {
            rider,
            conditions,
            fork,
            shock,
        })
    }

    pub fn rider(&self) -> &RiderProfile {
        &self.rider
    }

    pub fn conditions(&self) -> &RidingConditions {
        &self.conditions
    }

    pub fn fork(&self) -> &SuspensionComponent {
        &self.fork
    }

    pub fn shock(&self) -> Option<&SuspensionComponent> {
        self.shock.as_ref()
    }

    /// Resolve a component by kind; `None` when the bike has no such part
    pub fn component(&self, kind: ComponentKind) -> Option<&SuspensionComponent> {
        match kind {
            ComponentKind::Fork => Some(&self.fork),
            ComponentKind::Shock => self.shock.as_ref(),
        }
    }

    /// Present components in fork-then-shock order
    pub fn components(&self) -> impl Iterator<Item = (ComponentKind, &SuspensionComponent)> {
        std::iter::once((ComponentKind::Fork, &self.fork))
            .chain(self.shock.iter().map(|s| (ComponentKind::Shock, s)))
    }
}

#[derive(Debug, Deserialize)]
struct RawBikeSetup {
    rider: RiderProfile,
    #[serde(default)]
    conditions: RidingConditions,
    fork: SuspensionComponent,
    #[serde(default)]
    shock: Option<SuspensionComponent>,
}

impl TryFrom<RawBikeSetup> for BikeSetup {
    type Error = SetupError;

    fn try_from(raw: RawBikeSetup) -> Result<Self, Self::Error> {
        BikeSetup::new(raw.rider, raw.conditions, raw.fork, raw.shock)
    }
}
