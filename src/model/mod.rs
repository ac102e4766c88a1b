//! Bike Setup Data Model
//!
//! Validated input types shared by both engines:
//! - `conditions.rs` - terrain / weather
//! - `component.rs` - fork or shock with capability flags
//! - `setup.rs` - rider profile and the assembled `BikeSetup`
//!
//! Every constructor validates; deserialization goes through the same
//! constructors, so an invalid setup cannot be built from JSON either.

pub mod conditions;
pub mod component;
pub mod setup;

pub use conditions::{RidingConditions, Terrain, Weather};
pub use component::{Brand, Capabilities, ComponentKind, SuspensionComponent};
pub use setup::{BikeSetup, BikeType, RiderProfile};
