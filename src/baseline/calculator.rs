//! Baseline Calculator
//!
//! Maps (rider, conditions, component) to starting settings:
//! 1. Brand coefficients (with fallback brand, then defaults)
//! 2. PSI = trunc(trunc(weight × psi_multiplier) × terrain% × weather%)
//! 3. Sag = floor(travel × target fraction), percent truncated
//! 4. Rebound from the brand's weight bands, compression from base values
//! 5. Terrain + weather click deltas, every click clamped at 0
//! 6. Only the adjusters the component actually has are reported
//!
//! Truncation (not rounding) at each stage is deliberate: outputs must match
//! the reference tables click-for-click.

use serde::Serialize;

use super::modifiers::{smart_tip, terrain_modifier, weather_modifier, Modifier};
use crate::model::{BikeSetup, ComponentKind, SuspensionComponent};
use crate::reference::ManufacturerSpecs;

/// Click counts for the adjusters a component has. Absent adjusters are `None`
/// and are left out of the serialized mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClickSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebound: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lsr: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsr: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lsc: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsc: Option<u32>,
}

impl ClickSettings {
    /// Present (name, clicks) pairs in output order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> {
        [
            ("rebound", self.rebound),
            ("lsr", self.lsr),
            ("hsr", self.hsr),
            ("lsc", self.lsc),
            ("hsc", self.hsc),
        ]
        .into_iter()
        .filter_map(|(name, clicks)| clicks.map(|c| (name, c)))
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.iter().map(|(name, _)| name).collect()
    }
}

/// Starting settings for one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRecommendation {
    pub psi: u32,
    pub sag_mm: u32,
    pub sag_pct: u32,
    pub clicks: ClickSettings,
    pub smart_tip: String,
}

/// Recommendations keyed by component; `shock` only when the bike has one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    pub fork: ComponentRecommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shock: Option<ComponentRecommendation>,
}

impl Recommendations {
    pub fn get(&self, kind: ComponentKind) -> Option<&ComponentRecommendation> {
        match kind {
            ComponentKind::Fork => Some(&self.fork),
            ComponentKind::Shock => self.shock.as_ref(),
        }
    }
}

/// Compute baseline settings for every component on the bike
pub fn calculate_baseline(setup: &BikeSetup, specs: &ManufacturerSpecs) -> Recommendations {
    let conditions = setup.conditions();
    let terrain = terrain_modifier(conditions.terrain);
    let weather = weather_modifier(conditions.weather);

    tracing::debug!(
        "Baseline for {:.1} kg {} rider ({} / {})",
        setup.rider().weight_kg(),
        setup.rider().bike_type().as_str(),
        conditions.terrain.as_str(),
        conditions.weather.as_str()
    );

    let fork = component_baseline(setup, ComponentKind::Fork, setup.fork(), specs, terrain, weather);
    let shock = setup
        .shock()
        .map(|shock| component_baseline(setup, ComponentKind::Shock, shock, specs, terrain, weather));

    Recommendations { fork, shock }
}

fn component_baseline(
    setup: &BikeSetup,
    kind: ComponentKind,
    component: &SuspensionComponent,
    specs: &ManufacturerSpecs,
    terrain: &Modifier,
    weather: &Modifier,
) -> ComponentRecommendation {
    let weight = setup.rider().weight_kg();
    let coefficients = specs.coefficients(kind, component.brand());

    // Pressure
    let base_psi = (weight * coefficients.psi_multiplier()) as i64;
    let psi = (base_psi as f64 * terrain.psi_pct * weather.psi_pct) as i64;

    // Sag
    let sag_fraction = specs.sag_fraction(setup.rider().bike_type(), kind);
    let sag_mm = (component.travel_mm() as f64 * sag_fraction) as u32;
    let sag_pct = (sag_fraction * 100.0) as u32;

    // Clicks
    let rebound = apply_deltas(
        coefficients.rebound_clicks(weight),
        terrain.rebound_delta,
        weather.rebound_delta,
    );
    let lsc = apply_deltas(coefficients.base_lsc(), terrain.lsc_delta, weather.lsc_delta);
    let hsc = apply_deltas(coefficients.base_hsc(), terrain.hsc_delta, weather.hsc_delta);

    let caps = component.capabilities();
    let clicks = ClickSettings {
        rebound: caps.has_rebound.then_some(rebound),
        lsr: caps.has_lsr.then_some(rebound),
        hsr: caps.has_hsr.then_some(rebound.saturating_add(1)),
        lsc: caps.has_lsc.then_some(lsc),
        hsc: caps.has_hsc.then_some(hsc),
    };

    ComponentRecommendation {
        psi: u32::try_from(psi.max(0)).unwrap_or(u32::MAX),
        sag_mm,
        sag_pct,
        clicks,
        smart_tip: smart_tip(terrain, weather),
    }
}

/// Base clicks plus both deltas, saturating, clamped at 0
#[inline]
fn apply_deltas(base: i32, terrain_delta: i32, weather_delta: i32) -> u32 {
    let clicks = base.saturating_add(terrain_delta).saturating_add(weather_delta);
    u32::try_from(clicks).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BikeType, Brand, Capabilities, RiderProfile, RidingConditions, Terrain, Weather,
    };

    const SPECS: &str = r#"{
        "forks": {
            "rockshox": {"psi_multiplier": 1.0, "base_lsc": 2,
                         "rebound_table": [{"max_kg": 80, "clicks": 7}]}
        },
        "shocks": {
            "standard_air": {"psi_multiplier": 3.0, "base_lsc": 1, "base_hsc": 0,
                             "rebound_table": [{"max_kg": 70, "clicks": 4}, {"max_kg": 90, "clicks": 2}]}
        },
        "sag_targets": {
            "full_suspension_trail_enduro": {"shock": 0.3}
        }
    }"#;

    fn specs() -> ManufacturerSpecs {
        ManufacturerSpecs::from_json_str(SPECS).unwrap()
    }

    fn setup(
        weight: f64,
        terrain: Terrain,
        weather: Weather,
        fork_caps: Capabilities,
        shock: Option<SuspensionComponent>,
    ) -> BikeSetup {
        let rider = RiderProfile::new(weight, BikeType::FullSuspensionTrailEnduro).unwrap();
        let fork = SuspensionComponent::new(Brand::Rockshox, 160)
            .unwrap()
            .with_capabilities(fork_caps);
        BikeSetup::new(rider, RidingConditions::new(terrain, weather), fork, shock).unwrap()
    }

    fn rebound_and_lsc() -> Capabilities {
        Capabilities {
            has_rebound: true,
            has_lsc: true,
            ..Capabilities::default()
        }
    }

    #[test]
    fn test_reference_example() {
        let setup = setup(75.0, Terrain::Jumps, Weather::Dry, rebound_and_lsc(), None);
        let recs = calculate_baseline(&setup, &specs());

        let fork = &recs.fork;
        assert_eq!(fork.psi, 78);
        assert_eq!(fork.sag_mm, 40);
        assert_eq!(fork.sag_pct, 25);
        assert_eq!(fork.clicks.rebound, Some(8));
        assert_eq!(fork.clicks.lsc, Some(4));
        assert_eq!(fork.clicks.keys(), vec!["rebound", "lsc"]);
        assert_eq!(fork.smart_tip, "Jumps want stability and a slower rebound.");
        assert!(recs.shock.is_none());
    }

    #[test]
    fn test_psi_truncates_each_stage() {
        // 80.9 × 1.0 → 80, then 80 × 0.98 × 0.95 = 74.48 → 74
        let setup = setup(80.9, Terrain::TechnicalRoots, Weather::Wet, rebound_and_lsc(), None);
        let recs = calculate_baseline(&setup, &specs());
        assert_eq!(recs.fork.psi, 74);
    }

    #[test]
    fn test_clicks_clamped_at_zero() {
        let shock = SuspensionComponent::new(Brand::Fox, 65).unwrap().with_capabilities(Capabilities {
            has_rebound: true,
            has_lsc: true,
            has_hsc: true,
            has_lsr: true,
            has_hsr: true,
            ..Capabilities::default()
        });
        // 85 kg falls in the 2-click band; roots + wet take 2 off rebound, 3 off lsc
        let setup = setup(85.0, Terrain::TechnicalRoots, Weather::Wet, rebound_and_lsc(), Some(shock));
        let recs = calculate_baseline(&setup, &specs());

        let shock = recs.shock.as_ref().unwrap();
        assert_eq!(shock.clicks.rebound, Some(0));
        assert_eq!(shock.clicks.lsr, Some(0));
        assert_eq!(shock.clicks.hsr, Some(1));
        assert_eq!(shock.clicks.lsc, Some(0));
        assert_eq!(shock.clicks.hsc, Some(0));
    }

    #[test]
    fn test_shock_uses_fallback_brand_and_sag_target() {
        let shock = SuspensionComponent::new(Brand::Ohlins, 65).unwrap();
        let setup = setup(70.0, Terrain::Mix, Weather::Dry, Capabilities::default(), Some(shock));
        let recs = calculate_baseline(&setup, &specs());

        let shock = recs.get(ComponentKind::Shock).unwrap();
        assert_eq!(shock.psi, 210);
        // 65 × 0.3 = 19.5 → 19
        assert_eq!(shock.sag_mm, 19);
        assert_eq!(shock.sag_pct, 30);
        assert_eq!(shock.clicks.rebound, Some(4));
        assert_eq!(shock.clicks.keys(), vec!["rebound"]);
    }

    #[test]
    fn test_empty_specs_use_defaults() {
        let caps = Capabilities {
            has_lsc: true,
            has_hsc: true,
            ..Capabilities::default()
        };
        let setup = setup(72.4, Terrain::Mix, Weather::Dry, caps, None);
        let recs = calculate_baseline(&setup, &ManufacturerSpecs::default());

        assert_eq!(recs.fork.psi, 72);
        assert_eq!(recs.fork.clicks.rebound, Some(6));
        assert_eq!(recs.fork.clicks.lsc, Some(2));
        assert_eq!(recs.fork.clicks.hsc, Some(1));
    }

    #[test]
    fn test_extreme_reference_values_saturate() {
        let specs = ManufacturerSpecs::from_json_str(&format!(
            r#"{{"forks": {{"rockshox": {{"psi_multiplier": 1e8, "base_lsc": {max}, "base_hsc": {max},
                            "rebound_table": [{{"max_kg": 150, "clicks": {max}}}]}}}}}}"#,
            max = i32::MAX
        ))
        .unwrap();
        let caps = Capabilities {
            has_lsc: true,
            has_hsc: true,
            has_hsr: true,
            ..Capabilities::default()
        };
        let setup = setup(75.0, Terrain::Jumps, Weather::Dry, caps, None);
        let recs = calculate_baseline(&setup, &specs);

        let max_clicks = i32::MAX as u32;
        assert_eq!(recs.fork.psi, u32::MAX);
        assert_eq!(recs.fork.clicks.rebound, Some(max_clicks));
        assert_eq!(recs.fork.clicks.hsr, Some(max_clicks + 1));
        assert_eq!(recs.fork.clicks.lsc, Some(max_clicks));
        assert_eq!(recs.fork.clicks.hsc, Some(max_clicks));
    }

    #[test]
    fn test_no_adjusters_gives_empty_clicks() {
        let caps = Capabilities {
            has_rebound: false,
            ..Capabilities::default()
        };
        let setup = setup(70.0, Terrain::Flow, Weather::Mix, caps, None);
        let recs = calculate_baseline(&setup, &specs());
        assert!(recs.fork.clicks.keys().is_empty());

        let json = serde_json::to_value(&recs).unwrap();
        assert_eq!(json["fork"]["clicks"], serde_json::json!({}));
        assert!(json.get("shock").is_none());
    }
}
