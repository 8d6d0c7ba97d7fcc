use crate::models::{Airline, Airport, FlightDataset};
use std::collections::HashMap;

/// IATA code lookups for the airline and airport reference tables.
///
/// Duplicate codes are not rejected: the entry seen last wins.
#[derive(Debug, Clone, Default)]
pub struct JoinIndex {
    airlines: HashMap<String, Airline>,
    airports: HashMap<String, Airport>,
}

impl JoinIndex {
    pub fn new(airlines: &[Airline], airports: &[Airport]) -> Self {
        let mut airline_map = HashMap::with_capacity(airlines.len());
        for airline in airlines {
            airline_map.insert(airline.iata_code.clone(), airline.clone());
        }

        let mut airport_map = HashMap::with_capacity(airports.len());
        for airport in airports {
            airport_map.insert(airport.iata_code.clone(), airport.clone());
        }

        Self {
            airlines: airline_map,
            airports: airport_map,
        }
    }

    pub fn from_dataset(dataset: &FlightDataset) -> Self {
        Self::new(&dataset.airlines, &dataset.airports)
    }

    pub fn airline(&self, code: &str) -> Option<&Airline> {
        self.airlines.get(code)
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    pub fn airline_name(&self, code: &str) -> Option<&str> {
        self.airline(code).map(|airline| airline.name.as_str())
    }

    pub fn airport_name(&self, code: &str) -> Option<&str> {
        self.airport(code).map(|airport| airport.name.as_str())
    }

    pub fn airline_count(&self) -> usize {
        self.airlines.len()
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }
}
