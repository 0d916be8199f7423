/// Integration tests for the fleet advisor
///
/// Run with: cargo test --test advisor_integration -- --nocapture
use std::fs;
use std::path::Path;

use fleet_advisor::{
    Action, Advisor, AdvisorError, ArtifactPaths, FuelType, Scenario, VehicleType,
};

// Fixture model over 9 features (after the leaky columns are dropped):
//   0 vehicle.age        split at 5.0: young +4.0, old -2.0
//   2 city_avg_trips     split at 10.0: quiet +6.0, busy +12.0
//   5 vehicle.type_suv   suv +10.0
//   8 fuelType_HYBRID    hybrid +4.0
// Everything else is ignored by the trees, so predictions are exact sums.
const MODEL_JSON: &str = r#"{
    "num_features": 9,
    "base_score": 0.0,
    "trees": [
        {
            "type": "split", "feature": 2, "threshold": 10.0,
            "left":  { "type": "leaf", "value": 6.0 },
            "right": { "type": "leaf", "value": 12.0 }
        },
        {
            "type": "split", "feature": 5, "threshold": 0.5,
            "left":  { "type": "leaf", "value": 0.0 },
            "right": { "type": "leaf", "value": 10.0 }
        },
        {
            "type": "split", "feature": 0, "threshold": 5.0,
            "left":  { "type": "leaf", "value": 4.0 },
            "right": { "type": "leaf", "value": -2.0 }
        },
        {
            "type": "split", "feature": 8, "threshold": 0.5,
            "left":  { "type": "leaf", "value": 0.0 },
            "right": { "type": "leaf", "value": 4.0 }
        }
    ]
}"#;

const CITY_STATS_CSV: &str = "\
location.city,city_avg_rate,city_avg_trips,city_car_count
Springfield,45.0,12.0,101
Shelbyville,55.0,8.5,40
";

// Raw training columns, leaky ones included: the schema must drop
// rating and reviewCount and keep the rest in order.
const TRAIN_COLUMNS_CSV: &str = "vehicle.age,rate.daily,rating,reviewCount,\
city_avg_trips,city_car_count,city_avg_rate,vehicle.type_suv,vehicle.type_truck,\
fuelType_ELECTRIC,fuelType_HYBRID\n";

const THRESHOLDS_JSON: &str = r#"{ "average_demand": 16.0, "high_demand": 20.0 }"#;

fn write_artifacts(dir: &Path) -> ArtifactPaths {
    let paths = ArtifactPaths::from_dir(dir);
    fs::create_dir_all(paths.model.parent().unwrap()).unwrap();
    fs::create_dir_all(paths.city_stats.parent().unwrap()).unwrap();
    fs::write(&paths.model, MODEL_JSON).unwrap();
    fs::write(&paths.city_stats, CITY_STATS_CSV).unwrap();
    fs::write(&paths.train_columns, TRAIN_COLUMNS_CSV).unwrap();
    fs::write(&paths.thresholds, THRESHOLDS_JSON).unwrap();
    paths
}

fn load_fixture_advisor(dir: &Path) -> Advisor {
    Advisor::load(&write_artifacts(dir)).expect("fixture artifacts should load")
}

#[test]
fn test_full_pipeline_expand() {
    println!("\n=== Test: Full Pipeline (Expand) ===");
    let dir = tempfile::tempdir().unwrap();
    let advisor = load_fixture_advisor(dir.path());

    // Busy city (+12), suv (+10), young (+4): 26.0 trips, above the 20.0
    // high-demand mark.
    let scenario =
        Scenario::new("Springfield", VehicleType::Suv, 3, FuelType::Electric).unwrap();
    let rec = advisor.recommend(&scenario).unwrap();

    println!(
        "✓ Predicted {:.1} trips -> {:?}",
        rec.predicted_trips, rec.action
    );
    assert_eq!(rec.predicted_trips, 26.0);
    assert_eq!(rec.action, Action::Expand);
    assert!(rec.rationale.contains("26.0"), "rationale quotes the prediction");
    assert!(rec.rationale.contains("20.0"), "rationale quotes the threshold");
    assert!(rec.rationale.contains("Springfield"), "rationale names the city");
    println!("✓ Rationale: {}", rec.rationale);
}

#[test]
fn test_classification_tiers_across_scenarios() {
    println!("\n=== Test: Classification Tiers ===");
    let dir = tempfile::tempdir().unwrap();
    let advisor = load_fixture_advisor(dir.path());

    let cases = [
        // (city, type, age, fuel, expected trips, expected action)
        (
            "Springfield",
            VehicleType::Suv,
            3,
            FuelType::Electric,
            26.0,
            Action::Expand,
        ),
        (
            "Shelbyville",
            VehicleType::Suv,
            12,
            FuelType::Hybrid,
            18.0,
            Action::ConsiderExpand,
        ),
        (
            "Shelbyville",
            VehicleType::Car,
            12,
            FuelType::Gasoline,
            4.0,
            Action::HoldOrReduce,
        ),
    ];

    for (city, vehicle_type, age, fuel, expected_trips, expected_action) in cases {
        let scenario = Scenario::new(city, vehicle_type, age, fuel).unwrap();
        let rec = advisor.recommend(&scenario).unwrap();
        println!(
            "  {city} / {vehicle_type:?} / age {age} / {fuel:?}: {:.1} trips -> {:?}",
            rec.predicted_trips, rec.action
        );
        assert_eq!(rec.predicted_trips, expected_trips);
        assert_eq!(rec.action, expected_action);
    }
    println!("✓ All tiers reached");
}

#[test]
fn test_threshold_equality_falls_to_lower_tier() {
    println!("\n=== Test: Threshold Boundaries ===");
    let dir = tempfile::tempdir().unwrap();
    let advisor = load_fixture_advisor(dir.path());

    // Busy city (+12), plain car, young (+4), hybrid (+4): exactly 20.0,
    // which equals the high-demand mark, so no Expand.
    let at_high = Scenario::new("Springfield", VehicleType::Car, 3, FuelType::Hybrid).unwrap();
    let rec = advisor.recommend(&at_high).unwrap();
    assert_eq!(rec.predicted_trips, 20.0);
    assert_eq!(rec.action, Action::ConsiderExpand);
    println!("✓ Prediction equal to the high mark stays at ConsiderExpand");

    // Same without the hybrid bump: exactly 16.0, equal to the average mark.
    let at_avg = Scenario::new("Springfield", VehicleType::Car, 3, FuelType::Gasoline).unwrap();
    let rec = advisor.recommend(&at_avg).unwrap();
    assert_eq!(rec.predicted_trips, 16.0);
    assert_eq!(rec.action, Action::HoldOrReduce);
    println!("✓ Prediction equal to the average mark stays at HoldOrReduce");
}

#[test]
fn test_unknown_city_is_an_error() {
    println!("\n=== Test: Unknown City ===");
    let dir = tempfile::tempdir().unwrap();
    let advisor = load_fixture_advisor(dir.path());

    let scenario =
        Scenario::new("Ogdenville", VehicleType::Car, 3, FuelType::Gasoline).unwrap();
    let err = advisor.recommend(&scenario).unwrap_err();
    assert!(matches!(err, AdvisorError::UnknownCity(ref city) if city == "Ogdenville"));
    println!("✓ Unknown city rejected: {err}");
}

#[test]
fn test_missing_artifacts_reported_together() {
    println!("\n=== Test: Missing Artifacts ===");
    let dir = tempfile::tempdir().unwrap();
    let paths = write_artifacts(dir.path());

    fs::remove_file(&paths.model).unwrap();
    fs::remove_file(&paths.thresholds).unwrap();

    let err = Advisor::load(&paths).unwrap_err();
    match err {
        AdvisorError::MissingArtifacts(ref missing) => {
            assert_eq!(missing.len(), 2, "both missing files are reported");
            assert!(missing.contains(&paths.model));
            assert!(missing.contains(&paths.thresholds));
        }
        other => panic!("expected MissingArtifacts, got {other:?}"),
    }
    println!("✓ Both missing files reported in one error: {err}");
}

#[test]
fn test_leaky_columns_dropped_from_schema() {
    println!("\n=== Test: Leaky Column Filtering ===");
    let dir = tempfile::tempdir().unwrap();
    let advisor = load_fixture_advisor(dir.path());

    // 11 raw columns minus rating and reviewCount.
    assert_eq!(advisor.num_features(), 9);
    println!("✓ Schema kept 9 of 11 training columns");
}

#[test]
fn test_schema_model_mismatch_fails_load() {
    println!("\n=== Test: Schema/Model Mismatch ===");
    let dir = tempfile::tempdir().unwrap();
    let paths = write_artifacts(dir.path());

    // Drop the last training column: 8 schema slots against a 9-feature model.
    let truncated = TRAIN_COLUMNS_CSV.replace(",fuelType_HYBRID", "");
    fs::write(&paths.train_columns, truncated).unwrap();

    let err = Advisor::load(&paths).unwrap_err();
    assert!(matches!(
        err,
        AdvisorError::SchemaModelMismatch {
            schema: 8,
            model: 9
        }
    ));
    println!("✓ Mismatched artifacts rejected at load: {err}");
}

#[test]
fn test_market_context_matches_stats() {
    println!("\n=== Test: Market Context ===");
    let dir = tempfile::tempdir().unwrap();
    let advisor = load_fixture_advisor(dir.path());

    let ctx = advisor.market_context("Springfield").unwrap();
    assert_eq!(ctx.city, "Springfield");
    assert_eq!(ctx.average_city_trips, 12.0);
    assert_eq!(ctx.competing_vehicles, 101);
    println!(
        "✓ {}: {:.1} avg trips, {} competing vehicles",
        ctx.city, ctx.average_city_trips, ctx.competing_vehicles
    );
}

#[test]
fn test_cities_listed_in_artifact_order() {
    println!("\n=== Test: City Listing ===");
    let dir = tempfile::tempdir().unwrap();
    let advisor = load_fixture_advisor(dir.path());

    let cities: Vec<&str> = advisor.cities().collect();
    assert_eq!(cities, ["Springfield", "Shelbyville"]);
    println!("✓ Cities listed in artifact order: {cities:?}");
}

#[test]
fn test_recommendation_json_shape() {
    println!("\n=== Test: Recommendation JSON ===");
    let dir = tempfile::tempdir().unwrap();
    let advisor = load_fixture_advisor(dir.path());

    let scenario =
        Scenario::new("Springfield", VehicleType::Suv, 3, FuelType::Electric).unwrap();
    let rec = advisor.recommend(&scenario).unwrap();

    let value = serde_json::to_value(&rec).unwrap();
    assert_eq!(value["action"], "expand");
    assert_eq!(value["predicted_trips"], 26.0);
    assert!(value["rationale"].as_str().unwrap().contains("Springfield"));
    println!("✓ JSON payload: {value}");
}
