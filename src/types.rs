use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// Youngest vehicle age the advisor accepts, in years.
pub const MIN_VEHICLE_AGE: u32 = 1;
/// Oldest vehicle age the advisor accepts, in years.
pub const MAX_VEHICLE_AGE: u32 = 15;

/// Vehicle body type. One one-hot column per variant may exist in the
/// feature schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Suv,
    Truck,
    Van,
    Minivan,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Car,
        VehicleType::Suv,
        VehicleType::Truck,
        VehicleType::Van,
        VehicleType::Minivan,
    ];

    /// Token used in the one-hot column name `vehicle.type_{token}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Suv => "suv",
            VehicleType::Truck => "truck",
            VehicleType::Van => "van",
            VehicleType::Minivan => "minivan",
        }
    }
}

/// Fuel type. One one-hot column per variant may exist in the feature schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum FuelType {
    Gasoline,
    Hybrid,
    Electric,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Gasoline, FuelType::Hybrid, FuelType::Electric];

    /// Token used in the one-hot column name `fuelType_{token}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "GASOLINE",
            FuelType::Hybrid => "HYBRID",
            FuelType::Electric => "ELECTRIC",
        }
    }
}

/// One what-if configuration: the vehicle the operator considers adding and
/// the city it would operate in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub city: String,
    pub vehicle_type: VehicleType,
    pub vehicle_age: u32,
    pub fuel_type: FuelType,
}

impl Scenario {
    /// Build a scenario, rejecting vehicle ages outside
    /// [`MIN_VEHICLE_AGE`]..=[`MAX_VEHICLE_AGE`].
    pub fn new(
        city: impl Into<String>,
        vehicle_type: VehicleType,
        vehicle_age: u32,
        fuel_type: FuelType,
    ) -> Result<Self, AdvisorError> {
        if !(MIN_VEHICLE_AGE..=MAX_VEHICLE_AGE).contains(&vehicle_age) {
            return Err(AdvisorError::AgeOutOfRange {
                age: vehicle_age,
                min: MIN_VEHICLE_AGE,
                max: MAX_VEHICLE_AGE,
            });
        }
        Ok(Self {
            city: city.into(),
            vehicle_type,
            vehicle_age,
            fuel_type,
        })
    }
}

/// The three possible recommendation outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Demand is well above the high-demand threshold: grow the fleet.
    Expand,
    /// Demand is above the market average: expansion is justified but not
    /// the top priority.
    ConsiderExpand,
    /// Demand is at or below the market average: hold off or shrink.
    HoldOrReduce,
}

impl Action {
    /// Short imperative headline for the report.
    pub fn headline(&self) -> &'static str {
        match self {
            Action::Expand => "Expand the fleet.",
            Action::ConsiderExpand => "Consider expanding the fleet.",
            Action::HoldOrReduce => "Do not expand the fleet / reduce it.",
        }
    }
}

/// Result of one advisory run: the action, the raw prediction behind it, and
/// prose explaining the call against the market thresholds.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub action: Action,
    /// Predicted trip count for the hypothetical new vehicle.
    pub predicted_trips: f64,
    pub rationale: String,
}

/// Market background for the scenario city, shown next to the
/// recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct MarketContext {
    pub city: String,
    /// Average trips per vehicle in this city.
    pub average_city_trips: f64,
    /// Vehicles already operating there (competition level).
    pub competing_vehicles: u32,
}
