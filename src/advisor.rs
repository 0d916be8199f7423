//! The advisor ties the loaded artifacts together: it turns a scenario into
//! a feature vector, runs the demand model, and classifies the prediction
//! against the demand thresholds.

use tracing::{debug, info};

use crate::artifacts::{self, ArtifactPaths};
use crate::error::{AdvisorError, AdvisorResult};
use crate::features::FeatureSchema;
use crate::model::DemandModel;
use crate::stats::CityStats;
use crate::thresholds::DemandThresholds;
use crate::types::{Action, MarketContext, Recommendation, Scenario};

/// Classify a predicted trip count against the demand thresholds.
///
/// Strictly above the high-demand threshold recommends expansion; strictly
/// above the average-demand threshold suggests considering it; everything
/// else, equality included, falls to hold-or-reduce.
pub fn classify(prediction: f64, thresholds: &DemandThresholds) -> Action {
    if prediction > thresholds.high_demand {
        Action::Expand
    } else if prediction > thresholds.average_demand {
        Action::ConsiderExpand
    } else {
        Action::HoldOrReduce
    }
}

/// Immutable decision engine built once from the artifact files.
#[derive(Debug)]
pub struct Advisor {
    model: DemandModel,
    stats: CityStats,
    schema: FeatureSchema,
    thresholds: DemandThresholds,
}

impl Advisor {
    /// Assemble an advisor from already-loaded parts.
    ///
    /// Cross-checks the feature schema against the model and runs a warmup
    /// prediction so that a broken pairing fails here rather than on the
    /// first real request.
    pub fn new(
        model: DemandModel,
        stats: CityStats,
        schema: FeatureSchema,
        thresholds: DemandThresholds,
    ) -> AdvisorResult<Self> {
        if schema.len() != model.num_features() {
            return Err(AdvisorError::SchemaModelMismatch {
                schema: schema.len(),
                model: model.num_features(),
            });
        }

        let warmup = model.predict(&vec![0.0; schema.len()])?;
        debug!(warmup, "warmup prediction complete");

        Ok(Self {
            model,
            stats,
            schema,
            thresholds,
        })
    }

    /// Load every artifact from `paths` and assemble the advisor.
    pub fn load(paths: &ArtifactPaths) -> AdvisorResult<Self> {
        paths.verify()?;

        let model = artifacts::load_model(&paths.model)?;
        let stats = artifacts::load_city_stats(&paths.city_stats)?;
        let schema = artifacts::load_feature_schema(&paths.train_columns)?;
        let thresholds = artifacts::load_thresholds(&paths.thresholds)?;

        let advisor = Self::new(model, stats, schema, thresholds)?;
        info!(
            cities = advisor.stats.len(),
            features = advisor.schema.len(),
            "advisor ready"
        );
        Ok(advisor)
    }

    /// Produce a recommendation for one scenario.
    pub fn recommend(&self, scenario: &Scenario) -> AdvisorResult<Recommendation> {
        let record = self
            .stats
            .get(&scenario.city)
            .ok_or_else(|| AdvisorError::UnknownCity(scenario.city.clone()))?;

        let features = self.schema.vector_for(scenario, record);
        let predicted_trips = self.model.predict(&features)?;
        let action = classify(predicted_trips, &self.thresholds);
        debug!(
            city = %scenario.city,
            vehicle_type = ?scenario.vehicle_type,
            vehicle_age = scenario.vehicle_age,
            fuel_type = ?scenario.fuel_type,
            predicted_trips,
            ?action,
            "scenario scored"
        );

        let rationale = self.rationale(scenario, predicted_trips, action);
        Ok(Recommendation {
            action,
            predicted_trips,
            rationale,
        })
    }

    fn rationale(&self, scenario: &Scenario, predicted_trips: f64, action: Action) -> String {
        match action {
            Action::Expand => format!(
                "Predicted demand of {:.1} trips is above the high-demand mark of {:.1}. \
                 Demand for this vehicle type in {} likely outstrips supply, so adding \
                 vehicles has high potential.",
                predicted_trips, self.thresholds.high_demand, scenario.city
            ),
            Action::ConsiderExpand => format!(
                "Predicted demand of {:.1} trips sits above the market average of {:.1}. \
                 Demand looks stable; expansion is justified but not a top priority.",
                predicted_trips, self.thresholds.average_demand
            ),
            Action::HoldOrReduce => format!(
                "Predicted demand of {:.1} trips is at or below the market average of {:.1}. \
                 The segment looks saturated or the configuration has little appeal; \
                 reassess it or consider other cities and vehicle types.",
                predicted_trips, self.thresholds.average_demand
            ),
        }
    }

    /// Market figures for one city, for presentation next to a
    /// recommendation.
    pub fn market_context(&self, city: &str) -> AdvisorResult<MarketContext> {
        let record = self
            .stats
            .get(city)
            .ok_or_else(|| AdvisorError::UnknownCity(city.to_string()))?;
        Ok(MarketContext {
            city: record.city.clone(),
            average_city_trips: record.city_avg_trips,
            competing_vehicles: record.city_car_count.round() as u32,
        })
    }

    /// Cities the advisor knows about, in artifact order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.stats.cities()
    }

    pub fn thresholds(&self) -> &DemandThresholds {
        &self.thresholds
    }

    pub fn num_features(&self) -> usize {
        self.schema.len()
    }
}
