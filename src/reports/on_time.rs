use crate::index::JoinIndex;
use crate::models::Flight;
use crate::reports::aggregate::{aggregate_by, Merge};
use crate::reports::ReportParams;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnTimePerformance {
    pub airline: String,
    pub iata_code: String,
    pub on_time_arrival_count: u64,
    pub on_time_departure_count: u64,
    pub total_count: u64,
    pub on_time_arrival_pct: Option<f64>,
    pub on_time_departure_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
struct OnTimeTally {
    arrivals: u64,
    departures: u64,
    total: u64,
}

impl Merge for OnTimeTally {
    fn merge(&mut self, other: Self) {
        self.arrivals += other.arrivals;
        self.departures += other.departures;
        self.total += other.total;
    }
}

/// `100 * part / total`, or `None` when there is nothing to divide by.
pub fn percentage(part: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 * 100.0 / total as f64)
    }
}

/// Share of each airline's flights in `params.year` that arrived and departed
/// on time.
///
/// The total counts every flight of the year regardless of delay, so flights
/// with no recorded delay (cancellations among them) lower the percentage.
/// An airline gets a row only when it has at least one on-time arrival and at
/// least one on-time departure in the year, matching an inner join of the two
/// per-airline counts. Airlines whose code does not resolve are dropped. Rows
/// are ordered by airline name.
pub fn on_time_percentage_by_airline(
    flights: &[Flight],
    index: &JoinIndex,
    params: &ReportParams,
) -> Vec<OnTimePerformance> {
    let threshold = params.on_time_threshold;
    let tallies = aggregate_by(
        flights,
        |flight| (flight.year == params.year).then_some(flight.airline_code.as_str()),
        |tally: &mut OnTimeTally, flight| {
            tally.total += 1;
            if flight.is_on_time_arrival(threshold) {
                tally.arrivals += 1;
            }
            if flight.is_on_time_departure(threshold) {
                tally.departures += 1;
            }
        },
    );

    let mut rows: Vec<OnTimePerformance> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.arrivals > 0 && tally.departures > 0)
        .filter_map(|(code, tally)| {
            let airline = index.airline_name(code)?;
            Some(OnTimePerformance {
                airline: airline.to_string(),
                iata_code: code.to_string(),
                on_time_arrival_count: tally.arrivals,
                on_time_departure_count: tally.departures,
                total_count: tally.total,
                on_time_arrival_pct: percentage(tally.arrivals, tally.total),
                on_time_departure_pct: percentage(tally.departures, tally.total),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.airline
            .cmp(&b.airline)
            .then_with(|| a.iata_code.cmp(&b.iata_code))
    });

    rows
}
