use crate::index::JoinIndex;
use crate::models::{DelayCause, Flight};
use crate::reports::aggregate::{aggregate_by, MeanAccumulator};
use crate::reports::ReportParams;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayReasonAverage {
    pub airport: String,
    pub delay_reason: DelayCause,
    pub avg_delay: Option<f64>,
}

/// Average delay per destination airport for each delay cause.
///
/// A flight contributes to a cause when it arrived at least
/// `params.on_time_threshold` minutes late and that cause recorded a positive
/// number of minutes, so one flight can appear under several causes. The
/// per-cause groups are concatenated in `DelayCause::ALL` order, each sorted
/// by airport name.
pub fn delay_reasons_by_destination_airport(
    flights: &[Flight],
    index: &JoinIndex,
    params: &ReportParams,
) -> Vec<DelayReasonAverage> {
    let threshold = params.on_time_threshold;
    let mut rows = Vec::new();

    for cause in DelayCause::ALL {
        let averages = aggregate_by(
            flights,
            |flight| {
                if !(flight.is_arrival_delayed(threshold) && flight.has_cause(cause)) {
                    return None;
                }
                index.airport_name(&flight.destination_airport)
            },
            // Every cause averages air_system_delay rather than its own column.
            // Published figures depend on this; see DESIGN.md before changing it.
            |mean: &mut MeanAccumulator, flight| mean.push(flight.air_system_delay),
        );

        let mut cause_rows: Vec<DelayReasonAverage> = averages
            .into_iter()
            .map(|(airport, mean)| DelayReasonAverage {
                airport: airport.to_string(),
                delay_reason: cause,
                avg_delay: mean.mean(),
            })
            .collect();
        cause_rows.sort_by(|a, b| a.airport.cmp(&b.airport));

        rows.extend(cause_rows);
    }

    rows
}
