//! Fleet expansion decision support.
//!
//! The offline pipeline trains a gradient-boosted model on historical rental
//! trips and writes four artifacts: the serialized model, a per-city
//! statistics table, the ordered training column list, and a pair of demand
//! thresholds. This crate loads those artifacts and answers one question:
//! given a city and a vehicle configuration, should the fleet grow there?
//!
//! The flow is [`ArtifactPaths`] -> [`Advisor::load`] ->
//! [`Advisor::recommend`]. A [`Scenario`] goes in; a [`Recommendation`]
//! (action, predicted trips, rationale) comes out.

pub mod advisor;
pub mod artifacts;
pub mod error;
pub mod features;
pub mod model;
pub mod stats;
pub mod thresholds;
pub mod types;

pub use advisor::{classify, Advisor};
pub use artifacts::ArtifactPaths;
pub use error::{AdvisorError, AdvisorResult};
pub use features::FeatureSchema;
pub use model::{DemandModel, TreeNode};
pub use stats::{CityRecord, CityStats};
pub use thresholds::DemandThresholds;
pub use types::{
    Action, FuelType, MarketContext, Recommendation, Scenario, VehicleType, MAX_VEHICLE_AGE,
    MIN_VEHICLE_AGE,
};
