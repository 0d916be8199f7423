//! Error types for the fleet advisor library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for advisor operations.
pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// Errors that can occur while loading artifacts or producing a recommendation.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// One or more required artifact files do not exist. Fatal at startup;
    /// the core is never invoked.
    #[error("missing artifact files: {}", format_paths(.0))]
    MissingArtifacts(Vec<PathBuf>),

    /// An artifact file exists but could not be read.
    #[error("failed to read artifact {path}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON artifact (model, thresholds) could not be parsed.
    #[error("failed to parse artifact {path}")]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A CSV artifact (city stats, training columns) could not be parsed.
    #[error("failed to parse artifact {path}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The training column list lacks a column the feature builder must set.
    #[error("feature schema is missing required column {0:?}")]
    MissingSchemaColumn(&'static str),

    /// A tree in the model references a feature index outside the model's
    /// declared feature count.
    #[error("model tree {tree} references feature {feature}, but the model expects {num_features} features")]
    InvalidTreeFeature {
        tree: usize,
        feature: usize,
        num_features: usize,
    },

    /// The schema column count does not match what the model was trained on.
    #[error("feature schema has {schema} columns, but the model expects {model}")]
    SchemaModelMismatch { schema: usize, model: usize },

    /// Thresholds loaded with average_demand above high_demand.
    #[error("invalid thresholds: average_demand {average_demand} exceeds high_demand {high_demand}")]
    InvalidThresholds {
        average_demand: f64,
        high_demand: f64,
    },

    /// The scenario names a city absent from the city statistics table.
    #[error("unknown city {0:?}: not present in the city statistics")]
    UnknownCity(String),

    /// Vehicle age outside the supported range.
    #[error("vehicle age {age} is outside the supported range {min}..={max}")]
    AgeOutOfRange { age: u32, min: u32, max: u32 },

    /// A feature vector of the wrong length reached the model.
    #[error("feature length mismatch: got {got}, expected {expected}")]
    FeatureLengthMismatch { got: usize, expected: usize },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifacts_display() {
        let err = AdvisorError::MissingArtifacts(vec![
            PathBuf::from("models/demand_model.json"),
            PathBuf::from("processed_data/city_stats.csv"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("models/demand_model.json"));
        assert!(msg.contains("processed_data/city_stats.csv"));
    }

    #[test]
    fn test_unknown_city_display() {
        let err = AdvisorError::UnknownCity("Nowhere".to_string());
        assert_eq!(
            err.to_string(),
            "unknown city \"Nowhere\": not present in the city statistics"
        );
    }

    #[test]
    fn test_feature_length_mismatch_display() {
        let err = AdvisorError::FeatureLengthMismatch {
            got: 5,
            expected: 7,
        };
        assert_eq!(
            err.to_string(),
            "feature length mismatch: got 5, expected 7"
        );
    }
}
