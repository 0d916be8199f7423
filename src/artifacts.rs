//! File-backed artifacts produced by the offline pipeline.
//!
//! Four files feed the advisor: the serialized demand model, the per-city
//! statistics table, the ordered training column list, and the demand
//! thresholds. All of them are loaded once at startup; a missing file is
//! fatal before any core logic runs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{AdvisorError, AdvisorResult};
use crate::features::FeatureSchema;
use crate::model::DemandModel;
use crate::stats::CityStats;
use crate::thresholds::DemandThresholds;

/// Locations of the four artifact files.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub city_stats: PathBuf,
    pub train_columns: PathBuf,
    pub thresholds: PathBuf,
}

impl ArtifactPaths {
    /// Conventional layout under an artifacts directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join("models").join("demand_model.json"),
            city_stats: dir.join("processed_data").join("city_stats.csv"),
            train_columns: dir.join("processed_data").join("train_columns.csv"),
            thresholds: dir.join("processed_data").join("demand_thresholds.json"),
        }
    }

    /// Check that every artifact file exists, reporting all missing paths at
    /// once.
    pub fn verify(&self) -> AdvisorResult<()> {
        let missing: Vec<PathBuf> = [
            &self.model,
            &self.city_stats,
            &self.train_columns,
            &self.thresholds,
        ]
        .into_iter()
        .filter(|p| !p.exists())
        .cloned()
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AdvisorError::MissingArtifacts(missing))
        }
    }
}

/// Load and validate the serialized demand model.
pub fn load_model(path: &Path) -> AdvisorResult<DemandModel> {
    let json = fs::read_to_string(path).map_err(|source| AdvisorError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;
    let model: DemandModel =
        serde_json::from_str(&json).map_err(|source| AdvisorError::ArtifactParse {
            path: path.to_path_buf(),
            source,
        })?;
    model.validate()?;
    info!(
        path = %path.display(),
        trees = model.num_trees(),
        features = model.num_features(),
        "loaded demand model"
    );
    Ok(model)
}

/// Load the per-city statistics table.
pub fn load_city_stats(path: &Path) -> AdvisorResult<CityStats> {
    let file = fs::File::open(path).map_err(|source| AdvisorError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;
    let stats = CityStats::from_reader(file).map_err(|source| AdvisorError::CsvParse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), cities = stats.len(), "loaded city statistics");
    Ok(stats)
}

/// Build the feature schema from the training column list. The file is a
/// CSV whose header row carries the ordered columns; leaky columns are
/// dropped while the schema is built.
pub fn load_feature_schema(path: &Path) -> AdvisorResult<FeatureSchema> {
    let file = fs::File::open(path).map_err(|source| AdvisorError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| AdvisorError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let schema = FeatureSchema::from_columns(headers.iter())?;
    info!(path = %path.display(), columns = schema.len(), "built feature schema");
    Ok(schema)
}

/// Load and validate the demand thresholds.
pub fn load_thresholds(path: &Path) -> AdvisorResult<DemandThresholds> {
    let json = fs::read_to_string(path).map_err(|source| AdvisorError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;
    let thresholds: DemandThresholds =
        serde_json::from_str(&json).map_err(|source| AdvisorError::ArtifactParse {
            path: path.to_path_buf(),
            source,
        })?;
    thresholds.validate()?;
    info!(
        average_demand = thresholds.average_demand,
        high_demand = thresholds.high_demand,
        "loaded demand thresholds"
    );
    Ok(thresholds)
}
