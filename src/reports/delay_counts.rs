use crate::index::JoinIndex;
use crate::models::Flight;
use crate::reports::aggregate::count_by;
use crate::reports::ReportParams;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirlineDelayCount {
    pub airline: String,
    pub delay_count: u64,
}

/// Airlines ranked by how many flights arrived at least the threshold late.
pub fn top_airlines_by_arrival_delay_count(
    flights: &[Flight],
    index: &JoinIndex,
    params: &ReportParams,
) -> Vec<AirlineDelayCount> {
    let threshold = params.on_time_threshold;
    airline_delay_counts(flights, index, |flight| flight.is_arrival_delayed(threshold))
}

/// Airlines ranked by how many flights departed at least the threshold late.
pub fn top_airlines_by_departure_delay_count(
    flights: &[Flight],
    index: &JoinIndex,
    params: &ReportParams,
) -> Vec<AirlineDelayCount> {
    let threshold = params.on_time_threshold;
    airline_delay_counts(flights, index, |flight| flight.is_departure_delayed(threshold))
}

// Grouped by airline name; ties broken by name so output order is stable.
fn airline_delay_counts<P>(flights: &[Flight], index: &JoinIndex, is_delayed: P) -> Vec<AirlineDelayCount>
where
    P: Fn(&Flight) -> bool + Sync + Send,
{
    let counts = count_by(flights, |flight| {
        if !is_delayed(flight) {
            return None;
        }
        index.airline_name(&flight.airline_code)
    });

    let mut rows: Vec<AirlineDelayCount> = counts
        .into_iter()
        .map(|(airline, delay_count)| AirlineDelayCount {
            airline: airline.to_string(),
            delay_count,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.delay_count
            .cmp(&a.delay_count)
            .then_with(|| a.airline.cmp(&b.airline))
    });

    rows
}
