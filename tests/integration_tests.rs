use cities_etl::{CityPipeline, CliConfig, EtlEngine, LocalStorage};
use tempfile::TempDir;

fn geonames_config(data_dir: &str) -> CliConfig {
    CliConfig {
        source_format: "geonames".to_string(),
        input_path: "data.json".to_string(),
        continent_path: "continent.json".to_string(),
        skip_continent: false,
        data_dir: data_dir.to_string(),
        verbose: false,
        monitor: false,
    }
}

#[tokio::test]
async fn test_end_to_end_geonames_refresh() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_str().unwrap().to_string();

    let raw = serde_json::json!([
        {"fields": {"name": "Paris", "coordinates": [48.8566, 2.3522], "feature_code": "PPLC", "country_code": "FR", "population": 2148000}},
        {"fields": {"name": "Berlin", "coordinates": [52.52, 13.405], "feature_code": "PPLC", "country_code": "DE", "population": 3644826}}
    ]);
    std::fs::write(temp_dir.path().join("data.json"), raw.to_string()).unwrap();
    std::fs::write(
        temp_dir.path().join("continent.json"),
        r#"{"FR": "Europe", "DE": "Europe"}"#,
    )
    .unwrap();

    let config = geonames_config(&data_dir);
    let storage = LocalStorage::new(data_dir.clone());
    let pipeline = CityPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, false);

    let result = engine.run().await;

    assert!(result.is_ok());
    let output_path = result.unwrap();
    assert!(output_path.contains("db.json"));

    // cities-only file: JSON array of normalized records, input order preserved
    let cities_raw =
        std::fs::read_to_string(temp_dir.path().join("cities-population.min.json")).unwrap();
    let cities: serde_json::Value = serde_json::from_str(&cities_raw).unwrap();
    assert_eq!(
        cities,
        serde_json::json!([
            {"city": "Paris", "coordinates": [48.8566, 2.3522], "feature_code": "PPLC", "country": "FR", "population": 2148000},
            {"city": "Berlin", "coordinates": [52.52, 13.405], "feature_code": "PPLC", "country": "DE", "population": 3644826}
        ])
    );

    // combined file: cities plus the continent table, unchanged
    let db_raw = std::fs::read_to_string(temp_dir.path().join("db.json")).unwrap();
    let db: serde_json::Value = serde_json::from_str(&db_raw).unwrap();
    assert_eq!(db["cities"], cities);
    assert_eq!(
        db["continent"],
        serde_json::json!({"FR": "Europe", "DE": "Europe"})
    );
}

#[tokio::test]
async fn test_end_to_end_simplemaps_refresh() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_str().unwrap().to_string();

    let csv = "city,lat,lng,iso2,population\n\
               Tokyo,35.6897,139.6922,JP,37400068\n\
               Jakarta,-6.2146,106.8451,ID,33756000\n";
    std::fs::write(temp_dir.path().join("worldcities.csv"), csv).unwrap();
    std::fs::write(
        temp_dir.path().join("continent.json"),
        r#"{"JP": "Asia", "ID": "Asia"}"#,
    )
    .unwrap();

    let mut config = geonames_config(&data_dir);
    config.source_format = "simplemaps".to_string();
    config.input_path = "worldcities.csv".to_string();

    let storage = LocalStorage::new(data_dir.clone());
    let pipeline = CityPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, false);

    let result = engine.run().await;
    assert!(result.is_ok());

    let cities_raw =
        std::fs::read_to_string(temp_dir.path().join("cities-population.min.json")).unwrap();
    let cities: serde_json::Value = serde_json::from_str(&cities_raw).unwrap();
    assert_eq!(
        cities,
        serde_json::json!([
            {"city": "Tokyo", "coordinates": [35.6897, 139.6922], "country": "JP", "population": 37400068u64},
            {"city": "Jakarta", "coordinates": [-6.2146, 106.8451], "country": "ID", "population": 33756000u64}
        ])
    );

    // no feature_code key anywhere for the CSV-derived schema
    assert!(!cities_raw.contains("feature_code"));
}

#[tokio::test]
async fn test_skip_continent_writes_cities_file_only() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_str().unwrap().to_string();

    let raw = serde_json::json!([
        {"fields": {"name": "Lima", "coordinates": [-12.0464, -77.0428], "feature_code": "PPLC", "country_code": "PE", "population": 9751717}}
    ]);
    std::fs::write(temp_dir.path().join("data.json"), raw.to_string()).unwrap();

    let mut config = geonames_config(&data_dir);
    config.skip_continent = true;

    let storage = LocalStorage::new(data_dir.clone());
    let pipeline = CityPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, false);

    let output_path = engine.run().await.unwrap();

    assert!(output_path.contains("cities-population.min.json"));
    assert!(temp_dir.path().join("cities-population.min.json").exists());
    assert!(!temp_dir.path().join("db.json").exists());
}

#[tokio::test]
async fn test_missing_input_file_leaves_no_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_str().unwrap().to_string();

    let config = geonames_config(&data_dir);
    let storage = LocalStorage::new(data_dir.clone());
    let pipeline = CityPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, false);

    let result = engine.run().await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("cities-population.min.json").exists());
    assert!(!temp_dir.path().join("db.json").exists());
}
