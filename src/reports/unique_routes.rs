use crate::index::JoinIndex;
use crate::models::Flight;
use crate::reports::aggregate::count_by;
use crate::reports::ranking::{rank_ascending, Ranked};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteFrequency {
    pub airline: String,
    pub origin_airport: String,
    pub destination_airport: String,
    pub flight_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniqueRouteCount {
    pub airline: String,
    pub unique_routes_count: u64,
}

/// Flight counts per (airline, origin airport name, destination airport name),
/// ordered by those three names.
pub fn route_frequencies(flights: &[Flight], index: &JoinIndex) -> Vec<RouteFrequency> {
    let counts = count_by(flights, |flight| {
        let airline = index.airline_name(&flight.airline_code)?;
        let origin = index.airport_name(&flight.origin_airport)?;
        let destination = index.airport_name(&flight.destination_airport)?;
        Some((airline, origin, destination))
    });

    let mut routes: Vec<RouteFrequency> = counts
        .into_iter()
        .map(|((airline, origin, destination), flight_count)| RouteFrequency {
            airline: airline.to_string(),
            origin_airport: origin.to_string(),
            destination_airport: destination.to_string(),
            flight_count,
        })
        .collect();

    routes.sort_by(|a, b| {
        a.airline
            .cmp(&b.airline)
            .then_with(|| a.origin_airport.cmp(&b.origin_airport))
            .then_with(|| a.destination_airport.cmp(&b.destination_airport))
    });

    routes
}

/// All routes ranked together by ascending flight count (competition ranking).
///
/// Needs every partial count merged first: a route's rank depends on the
/// counts of all other routes.
pub fn ranked_routes(flights: &[Flight], index: &JoinIndex) -> Vec<Ranked<RouteFrequency>> {
    rank_ascending(route_frequencies(flights, index), |route| route.flight_count)
}

/// Number of "unique" routes per airline, most first.
///
/// A route is unique when its flight count ties for the lowest count across
/// all routes of all airlines (rank 1). Each airline's rank-1 ranks are
/// summed, which counts its qualifying routes.
pub fn unique_routes_per_airline(flights: &[Flight], index: &JoinIndex) -> Vec<UniqueRouteCount> {
    let mut totals: HashMap<String, u64> = HashMap::new();
    for ranked in ranked_routes(flights, index) {
        if ranked.rank == 1 {
            *totals.entry(ranked.item.airline).or_insert(0) += ranked.rank;
        }
    }

    let mut rows: Vec<UniqueRouteCount> = totals
        .into_iter()
        .map(|(airline, unique_routes_count)| UniqueRouteCount {
            airline,
            unique_routes_count,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.unique_routes_count
            .cmp(&a.unique_routes_count)
            .then_with(|| a.airline.cmp(&b.airline))
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Airline, Airport};
    use pretty_assertions::assert_eq;

    fn index() -> JoinIndex {
        JoinIndex::new(
            &[
                Airline::new("AA", "American Airlines Inc."),
                Airline::new("DL", "Delta Air Lines Inc."),
            ],
            &[
                Airport::new("JFK", "JFK"),
                Airport::new("LAX", "LAX"),
                Airport::new("ORD", "ORD"),
                Airport::new("ATL", "ATL"),
            ],
        )
    }

    fn flight(airline: &str, origin: &str, destination: &str, arrival_delay: i32) -> Flight {
        Flight::builder()
            .flight_number("1")
            .airline(airline)
            .route(origin, destination)
            .date(2015, 1)
            .arrival_delay(arrival_delay)
            .build()
            .unwrap()
    }

    #[test]
    fn test_least_flown_route_is_unique() {
        let flights = vec![
            flight("AA", "JFK", "LAX", 20),
            flight("AA", "JFK", "LAX", 20),
            flight("AA", "JFK", "ORD", 5),
        ];

        let ranked = ranked_routes(&flights, &index());
        assert_eq!(ranked[0].item.destination_airport, "ORD");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].item.destination_airport, "LAX");
        assert_eq!(ranked[1].rank, 2);

        assert_eq!(
            unique_routes_per_airline(&flights, &index()),
            vec![UniqueRouteCount {
                airline: "American Airlines Inc.".to_string(),
                unique_routes_count: 1,
            }]
        );
    }

    #[test]
    fn test_ranking_is_global_across_airlines() {
        let flights = vec![
            // AA: two routes flown once each
            flight("AA", "JFK", "LAX", 0),
            flight("AA", "JFK", "ORD", 0),
            // DL: one route flown once, one flown twice
            flight("DL", "ATL", "LAX", 0),
            flight("DL", "ATL", "ORD", 0),
            flight("DL", "ATL", "ORD", 0),
        ];

        let ranks: Vec<u64> = ranked_routes(&flights, &index())
            .iter()
            .map(|r| r.rank)
            .collect();
        assert_eq!(ranks, vec![1, 1, 1, 4]);

        let rows = unique_routes_per_airline(&flights, &index());
        assert_eq!(
            rows,
            vec![
                UniqueRouteCount {
                    airline: "American Airlines Inc.".to_string(),
                    unique_routes_count: 2,
                },
                UniqueRouteCount {
                    airline: "Delta Air Lines Inc.".to_string(),
                    unique_routes_count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_airline_without_least_flown_route_is_absent() {
        let flights = vec![
            flight("AA", "JFK", "LAX", 0),
            flight("DL", "ATL", "ORD", 0),
            flight("DL", "ATL", "ORD", 0),
        ];

        let rows = unique_routes_per_airline(&flights, &index());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].airline, "American Airlines Inc.");
    }

    #[test]
    fn test_routes_need_all_three_joins() {
        let flights = vec![
            flight("AA", "JFK", "XXX", 0),
            flight("ZZ", "JFK", "LAX", 0),
            flight("AA", "XXX", "LAX", 0),
        ];

        assert!(route_frequencies(&flights, &index()).is_empty());
        assert!(unique_routes_per_airline(&flights, &index()).is_empty());
    }

    #[test]
    fn test_direction_matters() {
        let flights = vec![
            flight("AA", "JFK", "LAX", 0),
            flight("AA", "LAX", "JFK", 0),
        ];

        assert_eq!(route_frequencies(&flights, &index()).len(), 2);
    }
}
