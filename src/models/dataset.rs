use crate::models::{Airline, Airport, Flight};

/// The three loaded tables for one analysis run. Held read-only once built.
#[derive(Debug, Clone, Default)]
pub struct FlightDataset {
    pub airlines: Vec<Airline>,
    pub airports: Vec<Airport>,
    pub flights: Vec<Flight>,
}

impl FlightDataset {
    pub fn new(airlines: Vec<Airline>, airports: Vec<Airport>, flights: Vec<Flight>) -> Self {
        Self {
            airlines,
            airports,
            flights,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} airlines, {} airports, {} flights",
            self.airlines.len(),
            self.airports.len(),
            self.flights.len()
        )
    }
}
