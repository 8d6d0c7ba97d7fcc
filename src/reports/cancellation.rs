use crate::index::JoinIndex;
use crate::models::Flight;
use crate::reports::aggregate::count_by;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancellationReasonCount {
    pub cancellation_reason: Option<String>,
    pub airport: String,
    pub flight_count: u64,
}

/// Cancelled flights counted per (cancellation reason, airport name).
///
/// The airport is resolved from the flight's origin code. Flights whose
/// origin does not resolve are dropped. Rows are ordered by reason with
/// absent reasons first, then by airport name.
pub fn cancellation_reasons_by_airport(
    flights: &[Flight],
    index: &JoinIndex,
) -> Vec<CancellationReasonCount> {
    let counts = count_by(flights, |flight| {
        if !flight.cancelled {
            return None;
        }
        let airport = index.airport_name(&flight.origin_airport)?;
        Some((flight.cancellation_reason.as_deref(), airport))
    });

    let mut rows: Vec<CancellationReasonCount> = counts
        .into_iter()
        .map(|((reason, airport), flight_count)| CancellationReasonCount {
            cancellation_reason: reason.map(str::to_string),
            airport: airport.to_string(),
            flight_count,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.cancellation_reason
            .cmp(&b.cancellation_reason)
            .then_with(|| a.airport.cmp(&b.airport))
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Airport, FlightBuilder};
    use pretty_assertions::assert_eq;

    fn index() -> JoinIndex {
        JoinIndex::new(
            &[],
            &[
                Airport::new("JFK", "John F. Kennedy International Airport"),
                Airport::new("ORD", "Chicago O'Hare International Airport"),
            ],
        )
    }

    fn flight(origin: &str, destination: &str) -> FlightBuilder {
        Flight::builder()
            .flight_number("100")
            .airline("AA")
            .route(origin, destination)
            .date(2015, 2)
    }

    #[test]
    fn test_counts_by_reason_and_origin_airport() {
        let flights = vec![
            flight("JFK", "ORD").cancelled("B").build().unwrap(),
            flight("JFK", "ORD").cancelled("B").build().unwrap(),
            flight("ORD", "JFK").cancelled("A").build().unwrap(),
            flight("JFK", "ORD").cancelled("A").build().unwrap(),
            flight("JFK", "ORD").build().unwrap(),
        ];

        let rows = cancellation_reasons_by_airport(&flights, &index());

        assert_eq!(
            rows,
            vec![
                CancellationReasonCount {
                    cancellation_reason: Some("A".to_string()),
                    airport: "Chicago O'Hare International Airport".to_string(),
                    flight_count: 1,
                },
                CancellationReasonCount {
                    cancellation_reason: Some("A".to_string()),
                    airport: "John F. Kennedy International Airport".to_string(),
                    flight_count: 1,
                },
                CancellationReasonCount {
                    cancellation_reason: Some("B".to_string()),
                    airport: "John F. Kennedy International Airport".to_string(),
                    flight_count: 2,
                },
            ]
        );
    }

    #[test]
    fn test_groups_by_origin_not_destination() {
        let flights = vec![flight("ORD", "JFK").cancelled("C").build().unwrap()];

        let rows = cancellation_reasons_by_airport(&flights, &index());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].airport, "Chicago O'Hare International Airport");
    }

    #[test]
    fn test_unresolved_origin_is_dropped() {
        let flights = vec![
            flight("XXX", "JFK").cancelled("A").build().unwrap(),
            flight("JFK", "XXX").cancelled("A").build().unwrap(),
        ];

        let rows = cancellation_reasons_by_airport(&flights, &index());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].flight_count, 1);
    }

    #[test]
    fn test_missing_reason_sorts_first() {
        let mut without_reason = flight("JFK", "ORD").build().unwrap();
        without_reason.cancelled = true;
        let flights = vec![
            flight("JFK", "ORD").cancelled("A").build().unwrap(),
            without_reason,
        ];

        let rows = cancellation_reasons_by_airport(&flights, &index());

        assert_eq!(rows[0].cancellation_reason, None);
        assert_eq!(rows[1].cancellation_reason.as_deref(), Some("A"));
    }

    #[test]
    fn test_no_cancellations() {
        let flights = vec![flight("JFK", "ORD").build().unwrap()];
        assert!(cancellation_reasons_by_airport(&flights, &index()).is_empty());
    }
}
