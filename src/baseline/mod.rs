//! Baseline Suspension Settings
//!
//! - `modifiers.rs` - fixed terrain/weather adjustments
//! - `calculator.rs` - pressure, sag and click computation per component

pub mod modifiers;
pub mod calculator;

pub use modifiers::{terrain_modifier, weather_modifier, Modifier};
pub use calculator::{calculate_baseline, ClickSettings, ComponentRecommendation, Recommendations};
