use crate::error::{ProcessingError, Result};
use crate::models::{Airline, Airport, Flight};
use crate::readers::{Dataset, DatasetLoader};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use validator::Validate;

/// Reads the three datasets from header-bearing CSV files in one directory.
///
/// Columns are matched by header name and unknown columns are ignored.
#[derive(Debug, Clone)]
pub struct CsvDatasetLoader {
    base_path: PathBuf,
    airlines_file: String,
    airports_file: String,
    flights_file: String,
    strict: bool,
}

impl CsvDatasetLoader {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            airlines_file: Dataset::Airlines.default_file_name().to_string(),
            airports_file: Dataset::Airports.default_file_name().to_string(),
            flights_file: Dataset::Flights.default_file_name().to_string(),
            strict: false,
        }
    }

    pub fn with_file_name(mut self, dataset: Dataset, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        match dataset {
            Dataset::Airlines => self.airlines_file = file_name,
            Dataset::Airports => self.airports_file = file_name,
            Dataset::Flights => self.flights_file = file_name,
        }
        self
    }

    /// In strict mode the first invalid record fails the load; otherwise it is skipped.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn path_for(&self, dataset: Dataset) -> PathBuf {
        let file_name = match dataset {
            Dataset::Airlines => &self.airlines_file,
            Dataset::Airports => &self.airports_file,
            Dataset::Flights => &self.flights_file,
        };
        self.base_path.join(file_name)
    }

    fn read_records<T>(&self, dataset: Dataset) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Validate,
    {
        let path = self.path_for(dataset);
        debug!("Reading {} from {}", dataset, path.display());

        let file = File::open(&path).map_err(|e| {
            ProcessingError::MissingData(format!(
                "cannot open {} file {}: {}",
                dataset,
                path.display(),
                e
            ))
        })?;
        let records = self.parse_records(dataset, BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file), &path)?;

        info!("Loaded {} {} records", records.len(), dataset);
        Ok(records)
    }

    fn parse_records<T, R>(&self, dataset: Dataset, reader: R, path: &Path) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Validate,
        R: std::io::Read,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut records = Vec::new();
        let mut skipped = 0usize;
        let mut row = csv::StringRecord::new();

        loop {
            let (line, parsed) = match csv_reader.read_record(&mut row) {
                Ok(false) => break,
                Ok(true) => (
                    row.position().map_or(0, |p| p.line()),
                    Self::parse_row::<T>(&row, &headers),
                ),
                Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => (
                    e.position().map_or(0, |p| p.line()),
                    Err(e.to_string()),
                ),
                Err(e) => return Err(e.into()),
            };

            match parsed {
                Ok(record) => records.push(record),
                Err(message) if self.strict => {
                    return Err(ProcessingError::InvalidRecord {
                        dataset: dataset.to_string(),
                        line,
                        message,
                    });
                }
                Err(message) => {
                    skipped += 1;
                    warn!(
                        "Skipping invalid {} record at {}:{}: {}",
                        dataset,
                        path.display(),
                        line,
                        message
                    );
                }
            }
        }

        if skipped > 0 {
            warn!("Skipped {} invalid {} records", skipped, dataset);
        }

        Ok(records)
    }

    fn parse_row<T>(
        row: &csv::StringRecord,
        headers: &csv::StringRecord,
    ) -> std::result::Result<T, String>
    where
        T: DeserializeOwned + Validate,
    {
        if row.len() != headers.len() {
            return Err(format!("found {} fields, expected {}", row.len(), headers.len()));
        }

        let record = row.deserialize::<T>(Some(headers)).map_err(|e| e.to_string())?;
        record.validate().map_err(|e| e.to_string())?;
        Ok(record)
    }
}

impl DatasetLoader for CsvDatasetLoader {
    fn load_airlines(&self) -> Result<Vec<Airline>> {
        self.read_records(Dataset::Airlines)
    }

    fn load_airports(&self) -> Result<Vec<Airport>> {
        self.read_records(Dataset::Airports)
    }

    fn load_flights(&self) -> Result<Vec<Flight>> {
        self.read_records(Dataset::Flights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const FLIGHTS_HEADER: &str = "YEAR,MONTH,DAY,DAY_OF_WEEK,AIRLINE,FLIGHT_NUMBER,TAIL_NUMBER,ORIGIN_AIRPORT,DESTINATION_AIRPORT,DEPARTURE_DELAY,ARRIVAL_DELAY,DIVERTED,CANCELLED,CANCELLATION_REASON,AIR_SYSTEM_DELAY,SECURITY_DELAY,AIRLINE_DELAY,LATE_AIRCRAFT_DELAY,WEATHER_DELAY";

    fn write_file(dir: &TempDir, name: &str, lines: &[&str]) {
        let mut file = File::create(dir.path().join(name)).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    #[test]
    fn test_read_airlines_and_airports() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(
            &dir,
            "airlines.csv",
            &["IATA_CODE,AIRLINE", "UA,United Air Lines Inc.", "AA,American Airlines Inc."],
        );
        write_file(
            &dir,
            "airports.csv",
            &[
                "IATA_CODE,AIRPORT,CITY,STATE,COUNTRY,LATITUDE,LONGITUDE",
                "ABE,Lehigh Valley International Airport,Allentown,PA,USA,40.65236,-75.44040",
                "ECP,Northwest Florida Beaches International Airport,Panama City,FL,USA,,",
            ],
        );

        let loader = CsvDatasetLoader::new(dir.path());
        let airlines = loader.load_airlines()?;
        let airports = loader.load_airports()?;

        assert_eq!(airlines.len(), 2);
        assert_eq!(airlines[0].iata_code, "UA");
        assert_eq!(airlines[1].name, "American Airlines Inc.");
        assert_eq!(airports.len(), 2);
        assert_eq!(airports[0].state.as_deref(), Some("PA"));
        assert!(airports[0].latitude.is_some());
        assert_eq!(airports[1].latitude, None);

        Ok(())
    }

    #[test]
    fn test_read_flights_with_empty_fields() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(
            &dir,
            "flights.csv",
            &[
                FLIGHTS_HEADER,
                "2015,1,1,4,AS,98,N407AS,ANC,SEA,-11,-22,0,0,,,,,,",
                "2015,1,1,4,AA,2336,N3KUAA,LAX,PBI,-8,-9,0,0,,,,,,",
                "2015,1,1,4,US,840,N171US,SFO,CLT,,,0,1,B,,,,,",
                "2015,1,1,4,DL,1434,N547US,LAX,MSP,14,43,0,0,,43,0,0,0,0",
            ],
        );

        let flights = CsvDatasetLoader::new(dir.path()).load_flights()?;

        assert_eq!(flights.len(), 4);
        assert_eq!(flights[0].flight_number, "98");
        assert_eq!(flights[0].arrival_delay, Some(-22));
        assert_eq!(flights[0].air_system_delay, None);
        assert_eq!(flights[0].tail_number.as_deref(), Some("N407AS"));
        assert!(flights[2].cancelled);
        assert_eq!(flights[2].cancellation_reason.as_deref(), Some("B"));
        assert_eq!(flights[2].departure_delay, None);
        assert_eq!(flights[3].air_system_delay, Some(43));
        assert_eq!(flights[3].weather_delay, Some(0));

        Ok(())
    }

    #[test]
    fn test_invalid_records_are_skipped_when_lenient() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(
            &dir,
            "flights.csv",
            &[
                FLIGHTS_HEADER,
                "2015,13,1,4,AS,98,N407AS,ANC,SEA,-11,-22,0,0,,,,,,",
                "2015,1,1,4,AS,99,N407AS,ANC,SEA,abc,-22,0,0,,,,,,",
                "2015,1,1,4,AS,100,N407AS,ANC,SEA,-11,-22,0,0,,,,,,",
            ],
        );

        let flights = CsvDatasetLoader::new(dir.path()).load_flights()?;

        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].flight_number, "100");

        Ok(())
    }

    #[test]
    fn test_rows_with_wrong_field_count_are_skipped_when_lenient() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(
            &dir,
            "flights.csv",
            &[
                FLIGHTS_HEADER,
                "2015,1,1,4,AS,98,N407AS,ANC,SEA,-11,-22,0,0,,,,,,",
                "2015,1,1,4,AS,99,N407AS,ANC",
                "2015,1,1,4,AS,100,N407AS,ANC,SEA,-11,-22,0,0,,,,,,,,extra",
                "2015,1,1,4,AS,101,N407AS,ANC,SEA,-11,-22,0,0,,,,,,",
            ],
        );

        let flights = CsvDatasetLoader::new(dir.path()).load_flights()?;
        let numbers: Vec<&str> = flights.iter().map(|f| f.flight_number.as_str()).collect();

        assert_eq!(numbers, vec!["98", "101"]);

        Ok(())
    }

    #[test]
    fn test_short_row_fails_strict_load_with_line() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(
            &dir,
            "flights.csv",
            &[
                FLIGHTS_HEADER,
                "2015,1,1,4,AS,98,N407AS,ANC,SEA,-11,-22,0,0,,,,,,",
                "2015,1,1,4,AS,99,N407AS,ANC",
            ],
        );

        let result = CsvDatasetLoader::new(dir.path()).with_strict(true).load_flights();

        assert!(matches!(
            result,
            Err(ProcessingError::InvalidRecord { line: 3, .. })
        ));

        Ok(())
    }

    #[test]
    fn test_non_utf8_row_is_skipped_when_lenient() -> Result<()> {
        let dir = TempDir::new()?;
        let mut file = File::create(dir.path().join("airlines.csv"))?;
        file.write_all(b"IATA_CODE,AIRLINE\nUA,United Air Lines Inc.\nXX,Bad \xff\xfe Name\nAA,American Airlines Inc.\n")?;
        drop(file);

        let airlines = CsvDatasetLoader::new(dir.path()).load_airlines()?;
        let codes: Vec<&str> = airlines.iter().map(|a| a.iata_code.as_str()).collect();

        assert_eq!(codes, vec!["UA", "AA"]);

        Ok(())
    }

    #[test]
    fn test_strict_mode_reports_line() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(
            &dir,
            "flights.csv",
            &[
                FLIGHTS_HEADER,
                "2015,1,1,4,AS,98,N407AS,ANC,SEA,-11,-22,0,0,,,,,,",
                "2015,0,1,4,AS,99,N407AS,ANC,SEA,-11,-22,0,0,,,,,,",
            ],
        );

        let result = CsvDatasetLoader::new(dir.path()).with_strict(true).load_flights();

        match result {
            Err(ProcessingError::InvalidRecord { dataset, line, .. }) => {
                assert_eq!(dataset, "flights");
                assert_eq!(line, 3);
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }

        Ok(())
    }

    #[test]
    fn test_load_dataset_by_name() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(&dir, "airlines.csv", &["IATA_CODE,AIRLINE", "B6,JetBlue Airways"]);

        let records = CsvDatasetLoader::new(dir.path()).load(Dataset::Airlines)?;

        assert_eq!(
            records,
            crate::readers::DatasetRecords::Airlines(vec![Airline::new("B6", "JetBlue Airways")])
        );
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = CsvDatasetLoader::new(dir.path()).load_airlines();
        assert!(matches!(result, Err(ProcessingError::MissingData(_))));
    }

    #[test]
    fn test_custom_file_names() {
        let loader = CsvDatasetLoader::new("/data").with_file_name(Dataset::Flights, "flights_2015.csv");
        assert_eq!(loader.path_for(Dataset::Flights), PathBuf::from("/data/flights_2015.csv"));
        assert_eq!(loader.path_for(Dataset::Airlines), PathBuf::from("/data/airlines.csv"));
    }
}
