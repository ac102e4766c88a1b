//! Terrain and Weather Modifiers
//!
//! Fixed domain knowledge, not configurable: each terrain and weather
//! condition nudges compression/rebound clicks and scales air pressure.
//! Both pressure factors apply multiplicatively.

use crate::model::{Terrain, Weather};

/// Click deltas, pressure factor and a rider-facing tip for one condition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifier {
    pub lsc_delta: i32,
    pub hsc_delta: i32,
    pub rebound_delta: i32,
    pub psi_pct: f64,
    pub tip: &'static str,
}

// ============================================================================
// Terrain
// ============================================================================

static FLOW: Modifier = Modifier {
    lsc_delta: 1,
    hsc_delta: 0,
    rebound_delta: 0,
    psi_pct: 1.0,
    tip: "Flow trails want support.",
};

static JUMPS: Modifier = Modifier {
    lsc_delta: 2,
    hsc_delta: 1,
    rebound_delta: 1,
    psi_pct: 1.05,
    tip: "Jumps want stability and a slower rebound.",
};

static TECHNICAL_ROOTS: Modifier = Modifier {
    lsc_delta: -1,
    hsc_delta: 0,
    rebound_delta: -1,
    psi_pct: 0.98,
    tip: "Roots want a supple setup and a fast rebound.",
};

static TERRAIN_MIX: Modifier = Modifier {
    lsc_delta: 0,
    hsc_delta: 0,
    rebound_delta: 0,
    psi_pct: 1.0,
    tip: "Balanced.",
};

// ============================================================================
// Weather
// ============================================================================

static DRY: Modifier = Modifier {
    lsc_delta: 0,
    hsc_delta: 0,
    rebound_delta: 0,
    psi_pct: 1.0,
    tip: "",
};

static WET: Modifier = Modifier {
    lsc_delta: -2,
    hsc_delta: 0,
    rebound_delta: -1,
    psi_pct: 0.95,
    tip: "It's wet! Softer compression for grip.",
};

static WEATHER_MIX: Modifier = Modifier {
    lsc_delta: -1,
    hsc_delta: 0,
    rebound_delta: 0,
    psi_pct: 0.98,
    tip: "Changeable conditions.",
};

pub fn terrain_modifier(terrain: Terrain) -> &'static Modifier {
    match terrain {
        Terrain::Flow => &FLOW,
        Terrain::Jumps => &JUMPS,
        Terrain::TechnicalRoots => &TECHNICAL_ROOTS,
        Terrain::Mix => &TERRAIN_MIX,
    }
}

pub fn weather_modifier(weather: Weather) -> &'static Modifier {
    match weather {
        Weather::Dry => &DRY,
        Weather::Wet => &WET,
        Weather::Mix => &WEATHER_MIX,
    }
}

/// Terrain tip followed by weather tip, trimmed
pub fn smart_tip(terrain: &Modifier, weather: &Modifier) -> String {
    format!("{} {}", terrain.tip, weather.tip).trim().to_string()
}
