//! Riding conditions
//!
//! Terrain and weather are closed sets; anything else is rejected when the
//! setup is deserialized.

use serde::{Deserialize, Serialize};

/// Dominant trail character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Flow,
    Jumps,
    TechnicalRoots,
    #[default]
    Mix,
}

impl Terrain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Flow => "flow",
            Terrain::Jumps => "jumps",
            Terrain::TechnicalRoots => "technical_roots",
            Terrain::Mix => "mix",
        }
    }

    pub fn all() -> &'static [Terrain] {
        &[Terrain::Flow, Terrain::Jumps, Terrain::TechnicalRoots, Terrain::Mix]
    }
}

/// Trail surface weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Dry,
    Wet,
    Mix,
}

impl Weather {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Dry => "dry",
            Weather::Wet => "wet",
            Weather::Mix => "mix",
        }
    }

    pub fn all() -> &'static [Weather] {
        &[Weather::Dry, Weather::Wet, Weather::Mix]
    }
}

/// Terrain + weather pair. Defaults to mixed terrain in dry weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RidingConditions {
    pub terrain: Terrain,
    pub weather: Weather,
}

impl RidingConditions {
    pub fn new(terrain: Terrain, weather: Weather) -> Self {
        Self { terrain, weather }
    }
}
