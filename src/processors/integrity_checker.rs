use crate::models::FlightDataset;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub total_flights: usize,
    pub total_airlines: usize,
    pub total_airports: usize,
    /// Airline codes listed more than once; the last entry wins in lookups.
    pub duplicate_airline_codes: Vec<String>,
    pub duplicate_airport_codes: Vec<String>,
    pub unresolved_airline: usize,
    pub unresolved_origin: usize,
    pub unresolved_destination: usize,
    pub cancelled_without_reason: usize,
    pub reason_without_cancellation: usize,
    pub flights_per_year: BTreeMap<i32, usize>,
}

impl IntegrityReport {
    /// Flights that at least one joined report will drop.
    pub fn unresolved_total(&self) -> usize {
        self.unresolved_airline + self.unresolved_origin + self.unresolved_destination
    }

    pub fn is_clean(&self) -> bool {
        self.duplicate_airline_codes.is_empty()
            && self.duplicate_airport_codes.is_empty()
            && self.unresolved_total() == 0
            && self.cancelled_without_reason == 0
            && self.reason_without_cancellation == 0
    }
}

/// Inspects a loaded dataset for conditions that silently shape the reports.
#[derive(Debug, Default)]
pub struct IntegrityChecker;

impl IntegrityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, dataset: &FlightDataset) -> IntegrityReport {
        let mut report = IntegrityReport {
            total_flights: dataset.flights.len(),
            total_airlines: dataset.airlines.len(),
            total_airports: dataset.airports.len(),
            duplicate_airline_codes: duplicates(dataset.airlines.iter().map(|a| a.iata_code.as_str())),
            duplicate_airport_codes: duplicates(dataset.airports.iter().map(|a| a.iata_code.as_str())),
            ..IntegrityReport::default()
        };

        let airline_codes: HashSet<&str> =
            dataset.airlines.iter().map(|a| a.iata_code.as_str()).collect();
        let airport_codes: HashSet<&str> =
            dataset.airports.iter().map(|a| a.iata_code.as_str()).collect();

        for flight in &dataset.flights {
            if !airline_codes.contains(flight.airline_code.as_str()) {
                report.unresolved_airline += 1;
            }
            if !airport_codes.contains(flight.origin_airport.as_str()) {
                report.unresolved_origin += 1;
            }
            if !airport_codes.contains(flight.destination_airport.as_str()) {
                report.unresolved_destination += 1;
            }

            match (flight.cancelled, flight.cancellation_reason.is_some()) {
                (true, false) => report.cancelled_without_reason += 1,
                (false, true) => report.reason_without_cancellation += 1,
                _ => {}
            }

            *report.flights_per_year.entry(flight.year).or_default() += 1;
        }

        report
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Dataset Integrity Report ===\n");
        summary.push_str(&format!("Airlines: {}\n", report.total_airlines));
        summary.push_str(&format!("Airports: {}\n", report.total_airports));
        summary.push_str(&format!("Flights: {}\n", report.total_flights));

        for (year, count) in &report.flights_per_year {
            summary.push_str(&format!("  {}: {}\n", year, count));
        }

        if !report.duplicate_airline_codes.is_empty() {
            summary.push_str(&format!(
                "Duplicate airline codes: {}\n",
                report.duplicate_airline_codes.join(", ")
            ));
        }
        if !report.duplicate_airport_codes.is_empty() {
            summary.push_str(&format!(
                "Duplicate airport codes: {}\n",
                report.duplicate_airport_codes.join(", ")
            ));
        }

        summary.push_str(&format!(
            "Unresolved codes: airline {}, origin {}, destination {}\n",
            report.unresolved_airline, report.unresolved_origin, report.unresolved_destination
        ));
        summary.push_str(&format!(
            "Cancellation mismatches: {} cancelled without reason, {} reason without cancellation\n",
            report.cancelled_without_reason, report.reason_without_cancellation
        ));

        if report.is_clean() {
            summary.push_str("No integrity issues found\n");
        }

        summary
    }
}

fn duplicates<'a>(codes: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for code in codes {
        *seen.entry(code).or_default() += 1;
    }

    let mut repeated: Vec<String> = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(code, _)| code.to_string())
        .collect();
    repeated.sort();
    repeated
}
