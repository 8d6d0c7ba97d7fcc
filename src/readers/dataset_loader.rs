use crate::error::Result;
use crate::models::{Airline, Airport, Flight, FlightDataset};
use crate::utils::constants::{
    AIRLINES_DATASET, AIRLINES_FILE, AIRPORTS_DATASET, AIRPORTS_FILE, FLIGHTS_DATASET,
    FLIGHTS_FILE,
};
use std::fmt;

/// The three named record sets every analysis run reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Airlines,
    Airports,
    Flights,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Airlines, Dataset::Airports, Dataset::Flights];

    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Airlines => AIRLINES_DATASET,
            Dataset::Airports => AIRPORTS_DATASET,
            Dataset::Flights => FLIGHTS_DATASET,
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            Dataset::Airlines => AIRLINES_FILE,
            Dataset::Airports => AIRPORTS_FILE,
            Dataset::Flights => FLIGHTS_FILE,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Records of one named dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetRecords {
    Airlines(Vec<Airline>),
    Airports(Vec<Airport>),
    Flights(Vec<Flight>),
}

impl DatasetRecords {
    pub fn dataset(&self) -> Dataset {
        match self {
            DatasetRecords::Airlines(_) => Dataset::Airlines,
            DatasetRecords::Airports(_) => Dataset::Airports,
            DatasetRecords::Flights(_) => Dataset::Flights,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DatasetRecords::Airlines(rows) => rows.len(),
            DatasetRecords::Airports(rows) => rows.len(),
            DatasetRecords::Flights(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Source of the reference and flight records.
///
/// `load` reads a dataset by name; the typed methods are what implementors
/// provide.
pub trait DatasetLoader {
    fn load(&self, dataset: Dataset) -> Result<DatasetRecords> {
        Ok(match dataset {
            Dataset::Airlines => DatasetRecords::Airlines(self.load_airlines()?),
            Dataset::Airports => DatasetRecords::Airports(self.load_airports()?),
            Dataset::Flights => DatasetRecords::Flights(self.load_flights()?),
        })
    }

    fn load_airlines(&self) -> Result<Vec<Airline>>;

    fn load_airports(&self) -> Result<Vec<Airport>>;

    fn load_flights(&self) -> Result<Vec<Flight>>;

    fn load_all(&self) -> Result<FlightDataset> {
        Ok(FlightDataset::new(
            self.load_airlines()?,
            self.load_airports()?,
            self.load_flights()?,
        ))
    }
}
