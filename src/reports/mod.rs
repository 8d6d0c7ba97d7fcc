//! Flight-performance reports.
//!
//! Every report is a pure function of the flight records and the
//! [`JoinIndex`]. Reports share no state, so [`ReportEngine::run_all`]
//! evaluates them concurrently.

pub mod aggregate;
pub mod cancellation;
pub mod delay_counts;
pub mod delay_reasons;
pub mod monthly;
pub mod on_time;
pub mod ranking;
pub mod render;
pub mod unique_routes;

pub use cancellation::{cancellation_reasons_by_airport, CancellationReasonCount};
pub use delay_counts::{
    top_airlines_by_arrival_delay_count, top_airlines_by_departure_delay_count, AirlineDelayCount,
};
pub use delay_reasons::{delay_reasons_by_destination_airport, DelayReasonAverage};
pub use monthly::{monthly_flight_count_by_airline_and_origin_airport, MonthlyFlightCount};
pub use on_time::{on_time_percentage_by_airline, percentage, OnTimePerformance};
pub use ranking::{rank_ascending, Ranked};
pub use unique_routes::{
    ranked_routes, route_frequencies, unique_routes_per_airline, RouteFrequency, UniqueRouteCount,
};

use crate::index::JoinIndex;
use crate::models::Flight;
use crate::utils::constants::{ON_TIME_THRESHOLD_MINUTES, REPORT_YEAR};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportKind {
    CancellationReasonsByAirport,
    OnTimePercentageByAirline,
    DelayReasonsByDestinationAirport,
    TopAirlinesByArrivalDelayCount,
    TopAirlinesByDepartureDelayCount,
    MonthlyFlightCountByAirlineAndOriginAirport,
    UniqueRoutesPerAirline,
}

impl ReportKind {
    pub const ALL: [ReportKind; 7] = [
        ReportKind::CancellationReasonsByAirport,
        ReportKind::OnTimePercentageByAirline,
        ReportKind::DelayReasonsByDestinationAirport,
        ReportKind::TopAirlinesByArrivalDelayCount,
        ReportKind::TopAirlinesByDepartureDelayCount,
        ReportKind::MonthlyFlightCountByAirlineAndOriginAirport,
        ReportKind::UniqueRoutesPerAirline,
    ];

    /// Short name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::CancellationReasonsByAirport => "cancellation-reasons",
            ReportKind::OnTimePercentageByAirline => "on-time",
            ReportKind::DelayReasonsByDestinationAirport => "delay-reasons",
            ReportKind::TopAirlinesByArrivalDelayCount => "arrival-delays",
            ReportKind::TopAirlinesByDepartureDelayCount => "departure-delays",
            ReportKind::MonthlyFlightCountByAirlineAndOriginAirport => "monthly-flights",
            ReportKind::UniqueRoutesPerAirline => "unique-routes",
        }
    }

    /// Name of the result table the report is persisted under.
    pub fn table_name(&self) -> &'static str {
        match self {
            ReportKind::CancellationReasonsByAirport => "cancellation_reasons_by_airport",
            ReportKind::OnTimePercentageByAirline => "on_time_percentage_by_airline",
            ReportKind::DelayReasonsByDestinationAirport => "delay_reasons_by_destination_airport",
            ReportKind::TopAirlinesByArrivalDelayCount => "top_airlines_by_arrival_delay_count",
            ReportKind::TopAirlinesByDepartureDelayCount => "top_airlines_by_departure_delay_count",
            ReportKind::MonthlyFlightCountByAirlineAndOriginAirport => {
                "monthly_flight_count_by_airline_and_origin_airport"
            }
            ReportKind::UniqueRoutesPerAirline => "unique_routes_per_airline",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::CancellationReasonsByAirport => "Cancellation reasons by airport",
            ReportKind::OnTimePercentageByAirline => "On-time percentage by airline",
            ReportKind::DelayReasonsByDestinationAirport => "Delay reasons by destination airport",
            ReportKind::TopAirlinesByArrivalDelayCount => "Airlines with the most arrival delays",
            ReportKind::TopAirlinesByDepartureDelayCount => {
                "Airlines with the most departure delays"
            }
            ReportKind::MonthlyFlightCountByAirlineAndOriginAirport => {
                "Monthly flights by airline and origin airport"
            }
            ReportKind::UniqueRoutesPerAirline => "Unique routes per airline",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ReportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted || kind.table_name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ReportKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown report '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Rows produced by one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportOutput {
    CancellationReasons(Vec<CancellationReasonCount>),
    OnTimePerformance(Vec<OnTimePerformance>),
    DelayReasons(Vec<DelayReasonAverage>),
    ArrivalDelayCounts(Vec<AirlineDelayCount>),
    DepartureDelayCounts(Vec<AirlineDelayCount>),
    MonthlyFlightCounts(Vec<MonthlyFlightCount>),
    UniqueRoutes(Vec<UniqueRouteCount>),
}

impl ReportOutput {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportOutput::CancellationReasons(_) => ReportKind::CancellationReasonsByAirport,
            ReportOutput::OnTimePerformance(_) => ReportKind::OnTimePercentageByAirline,
            ReportOutput::DelayReasons(_) => ReportKind::DelayReasonsByDestinationAirport,
            ReportOutput::ArrivalDelayCounts(_) => ReportKind::TopAirlinesByArrivalDelayCount,
            ReportOutput::DepartureDelayCounts(_) => ReportKind::TopAirlinesByDepartureDelayCount,
            ReportOutput::MonthlyFlightCounts(_) => {
                ReportKind::MonthlyFlightCountByAirlineAndOriginAirport
            }
            ReportOutput::UniqueRoutes(_) => ReportKind::UniqueRoutesPerAirline,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReportOutput::CancellationReasons(rows) => rows.len(),
            ReportOutput::OnTimePerformance(rows) => rows.len(),
            ReportOutput::DelayReasons(rows) => rows.len(),
            ReportOutput::ArrivalDelayCounts(rows) | ReportOutput::DepartureDelayCounts(rows) => {
                rows.len()
            }
            ReportOutput::MonthlyFlightCounts(rows) => rows.len(),
            ReportOutput::UniqueRoutes(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tunables of the report definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportParams {
    /// Year the on-time percentages are computed for.
    pub year: i32,
    /// Minutes late at which a flight stops being on time.
    pub on_time_threshold: i32,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            year: REPORT_YEAR,
            on_time_threshold: ON_TIME_THRESHOLD_MINUTES,
        }
    }
}

/// Runs reports over one frozen snapshot of flights.
pub struct ReportEngine<'a> {
    flights: &'a [Flight],
    index: &'a JoinIndex,
    params: ReportParams,
}

impl<'a> ReportEngine<'a> {
    pub fn new(flights: &'a [Flight], index: &'a JoinIndex) -> Self {
        Self {
            flights,
            index,
            params: ReportParams::default(),
        }
    }

    pub fn with_params(mut self, params: ReportParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &ReportParams {
        &self.params
    }

    pub fn run(&self, kind: ReportKind) -> ReportOutput {
        let (flights, index, params) = (self.flights, self.index, &self.params);
        let output = match kind {
            ReportKind::CancellationReasonsByAirport => {
                ReportOutput::CancellationReasons(cancellation_reasons_by_airport(flights, index))
            }
            ReportKind::OnTimePercentageByAirline => ReportOutput::OnTimePerformance(
                on_time_percentage_by_airline(flights, index, params),
            ),
            ReportKind::DelayReasonsByDestinationAirport => ReportOutput::DelayReasons(
                delay_reasons_by_destination_airport(flights, index, params),
            ),
            ReportKind::TopAirlinesByArrivalDelayCount => ReportOutput::ArrivalDelayCounts(
                top_airlines_by_arrival_delay_count(flights, index, params),
            ),
            ReportKind::TopAirlinesByDepartureDelayCount => ReportOutput::DepartureDelayCounts(
                top_airlines_by_departure_delay_count(flights, index, params),
            ),
            ReportKind::MonthlyFlightCountByAirlineAndOriginAirport => {
                ReportOutput::MonthlyFlightCounts(
                    monthly_flight_count_by_airline_and_origin_airport(flights, index),
                )
            }
            ReportKind::UniqueRoutesPerAirline => {
                ReportOutput::UniqueRoutes(unique_routes_per_airline(flights, index))
            }
        };

        debug!("Report {} produced {} rows", kind, output.len());
        output
    }

    /// Evaluate `kinds` concurrently. Results come back in the order given.
    pub fn run_all(&self, kinds: &[ReportKind]) -> Vec<ReportOutput> {
        kinds.par_iter().map(|kind| self.run(*kind)).collect()
    }
}
