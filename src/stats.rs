use std::collections::HashMap;
use std::io;

use serde::Deserialize;
use tracing::warn;

/// Aggregate statistics for one city, as exported by the data pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct CityRecord {
    #[serde(rename = "location.city")]
    pub city: String,
    /// Average daily rental rate across the city's fleet.
    pub city_avg_rate: f64,
    /// Average trips per vehicle.
    pub city_avg_trips: f64,
    /// Vehicles currently operating in the city.
    pub city_car_count: f64,
}

/// Immutable per-city reference table, loaded once at startup and looked up
/// by exact city name.
#[derive(Debug)]
pub struct CityStats {
    records: Vec<CityRecord>,
    by_city: HashMap<String, usize>,
}

impl CityStats {
    /// Parse the city statistics CSV. City names are expected unique; on a
    /// duplicate the first row wins and the rest are dropped.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut records: Vec<CityRecord> = Vec::new();
        let mut by_city: HashMap<String, usize> = HashMap::new();

        for row in csv_reader.deserialize::<CityRecord>() {
            let record = row?;
            if by_city.contains_key(&record.city) {
                warn!(city = %record.city, "duplicate city row in stats table, keeping the first");
                continue;
            }
            by_city.insert(record.city.clone(), records.len());
            records.push(record);
        }

        Ok(Self { records, by_city })
    }

    /// Look up a city by exact name.
    pub fn get(&self, city: &str) -> Option<&CityRecord> {
        self.by_city.get(city).map(|&i| &self.records[i])
    }

    /// City names in file order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.city.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
