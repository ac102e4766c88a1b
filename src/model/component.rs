//! Suspension components (fork or rear shock)

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Exclusive lower bound for travel (mm)
pub const MIN_TRAVEL_MM: u32 = 35;
/// Inclusive upper bound for travel (mm)
pub const MAX_TRAVEL_MM: u32 = 250;

/// Which end of the bike a component sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Fork,
    Shock,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Fork => "fork",
            ComponentKind::Shock => "shock",
        }
    }

    /// Section name in the manufacturer table ("forks" / "shocks")
    pub fn section(&self) -> &'static str {
        match self {
            ComponentKind::Fork => "forks",
            ComponentKind::Shock => "shocks",
        }
    }
}

/// Component manufacturer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Rockshox,
    Fox,
    Marzocchi,
    Ohlins,
    Other,
}

impl Brand {
    /// Key used in the manufacturer table
    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Rockshox => "rockshox",
            Brand::Fox => "fox",
            Brand::Marzocchi => "marzocchi",
            Brand::Ohlins => "ohlins",
            Brand::Other => "other",
        }
    }

    pub fn all() -> &'static [Brand] {
        &[
            Brand::Rockshox,
            Brand::Fox,
            Brand::Marzocchi,
            Brand::Ohlins,
            Brand::Other,
        ]
    }
}

/// Adjusters and features fitted to a component.
///
/// Defaults describe a basic air fork: air spring, rebound knob, volume
/// tokens, no separate compression or rebound circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub has_air_spring: bool,
    pub has_rebound: bool,
    pub has_lsc: bool,
    pub has_hsc: bool,
    pub has_lsr: bool,
    pub has_hsr: bool,
    pub tokens_adjustable: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            has_air_spring: true,
            has_rebound: true,
            has_lsc: false,
            has_hsc: false,
            has_lsr: false,
            has_hsr: false,
            tokens_adjustable: true,
        }
    }
}

/// A validated fork or shock. Travel is always within (35, 250] mm.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawComponent")]
pub struct SuspensionComponent {
    brand: Brand,
    travel_mm: u32,
    capabilities: Capabilities,
    current_psi: Option<u32>,
}

impl SuspensionComponent {
    /// Build a component with default capabilities
    pub fn new(brand: Brand, travel_mm: u32) -> Result<Self, SetupError> {
        if travel_mm <= MIN_TRAVEL_MM || travel_mm > MAX_TRAVEL_MM {
            return Err(SetupError::TravelOutOfRange(travel_mm));
        }
        Ok(Self {
            brand,
            travel_mm,
            capabilities: Capabilities::default(),
            current_psi: None,
        })
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_current_psi(mut self, psi: u32) -> Self {
        self.current_psi = Some(psi);
        self
    }

    pub fn brand(&self) -> Brand {
        self.brand
    }

    pub fn travel_mm(&self) -> u32 {
        self.travel_mm
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn current_psi(&self) -> Option<u32> {
        self.current_psi
    }
}

/// Wire shape of a component before validation
#[derive(Debug, Deserialize)]
struct RawComponent {
    brand: Brand,
    travel_mm: u32,
    #[serde(flatten)]
    capabilities: Capabilities,
    #[serde(default)]
    current_psi: Option<u32>,
}

impl TryFrom<RawComponent> for SuspensionComponent {
    type Error = SetupError;

    fn try_from(raw: RawComponent) -> Result<Self, Self::Error> {
        let component = SuspensionComponent::new(raw.brand, raw.travel_mm)?
            .with_capabilities(raw.capabilities);
        Ok(match raw.current_psi {
            Some(psi) => component.with_current_psi(psi),
            None => component,
        })
    }
}
