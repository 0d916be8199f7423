use std::collections::HashMap;

use crate::error::{AdvisorError, AdvisorResult};
use crate::stats::CityRecord;
use crate::types::{FuelType, Scenario, VehicleType};

/// Training-time columns that must not drive inference: they are unknowable
/// for a vehicle that does not exist yet.
pub const LEAKY_COLUMNS: [&str; 2] = ["rating", "reviewCount"];

const COL_VEHICLE_AGE: &str = "vehicle.age";
const COL_RATE_DAILY: &str = "rate.daily";
const COL_CITY_AVG_TRIPS: &str = "city_avg_trips";
const COL_CITY_CAR_COUNT: &str = "city_car_count";
const COL_CITY_AVG_RATE: &str = "city_avg_rate";

fn vehicle_type_column(vehicle_type: VehicleType) -> String {
    format!("vehicle.type_{}", vehicle_type.as_str())
}

fn fuel_type_column(fuel_type: FuelType) -> String {
    format!("fuelType_{}", fuel_type.as_str())
}

/// The ordered column layout the model was trained on, with every index the
/// feature builder writes to resolved up front. One-hot columns are optional:
/// a category the model never saw simply has no slot here and its indicator
/// is dropped from the vector.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
    vehicle_age: usize,
    rate_daily: usize,
    city_avg_trips: usize,
    city_car_count: usize,
    city_avg_rate: usize,
    vehicle_type_slots: HashMap<VehicleType, usize>,
    fuel_type_slots: HashMap<FuelType, usize>,
}

impl FeatureSchema {
    /// Build the schema from the raw training column list. The leaky columns
    /// are removed first; the five base columns must all be present.
    pub fn from_columns<I, S>(raw_columns: I) -> AdvisorResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = raw_columns
            .into_iter()
            .map(Into::into)
            .filter(|c| !LEAKY_COLUMNS.contains(&c.as_str()))
            .collect();

        let index_of = |name: &str| columns.iter().position(|c| c == name);
        let require = |name: &'static str| {
            index_of(name).ok_or(AdvisorError::MissingSchemaColumn(name))
        };

        let vehicle_age = require(COL_VEHICLE_AGE)?;
        let rate_daily = require(COL_RATE_DAILY)?;
        let city_avg_trips = require(COL_CITY_AVG_TRIPS)?;
        let city_car_count = require(COL_CITY_CAR_COUNT)?;
        let city_avg_rate = require(COL_CITY_AVG_RATE)?;

        let mut vehicle_type_slots = HashMap::new();
        for vehicle_type in VehicleType::ALL {
            if let Some(i) = index_of(&vehicle_type_column(vehicle_type)) {
                vehicle_type_slots.insert(vehicle_type, i);
            }
        }

        let mut fuel_type_slots = HashMap::new();
        for fuel_type in FuelType::ALL {
            if let Some(i) = index_of(&fuel_type_column(fuel_type)) {
                fuel_type_slots.insert(fuel_type, i);
            }
        }

        Ok(Self {
            columns,
            vehicle_age,
            rate_daily,
            city_avg_trips,
            city_car_count,
            city_avg_rate,
            vehicle_type_slots,
            fuel_type_slots,
        })
    }

    /// Number of feature columns (after leaky-column removal).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in model order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Assemble the feature vector for one scenario. Every column not listed
    /// below stays 0.0:
    /// - `vehicle.age` = scenario age
    /// - `rate.daily`, `city_avg_rate` = the city's average daily rate
    /// - `city_avg_trips` = the city's average trips
    /// - `city_car_count` = the city's fleet size plus the hypothetical new
    ///   vehicle
    /// - the matching vehicle-type / fuel-type indicators = 1.0, when the
    ///   schema has a slot for them
    pub fn vector_for(&self, scenario: &Scenario, city: &CityRecord) -> Vec<f64> {
        let mut features = vec![0.0; self.columns.len()];

        features[self.vehicle_age] = f64::from(scenario.vehicle_age);
        features[self.rate_daily] = city.city_avg_rate;
        features[self.city_avg_trips] = city.city_avg_trips;
        features[self.city_car_count] = city.city_car_count + 1.0;
        features[self.city_avg_rate] = city.city_avg_rate;

        if let Some(&slot) = self.vehicle_type_slots.get(&scenario.vehicle_type) {
            features[slot] = 1.0;
        }
        if let Some(&slot) = self.fuel_type_slots.get(&scenario.fuel_type) {
            features[slot] = 1.0;
        }

        features
    }
}
