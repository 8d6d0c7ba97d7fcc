use crate::index::JoinIndex;
use crate::models::Flight;
use crate::reports::aggregate::count_by;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyFlightCount {
    pub airline: String,
    pub origin_airport: String,
    /// First day of the month; `None` if year and month do not form a date.
    pub month: Option<NaiveDate>,
    pub flight_count: u64,
}

/// Flights per (airline, origin airport, month), for time-series charts.
///
/// Both the airline and the origin airport must resolve. Rows are ordered
/// by airline, airport, then month.
pub fn monthly_flight_count_by_airline_and_origin_airport(
    flights: &[Flight],
    index: &JoinIndex,
) -> Vec<MonthlyFlightCount> {
    let counts = count_by(flights, |flight| {
        let airline = index.airline_name(&flight.airline_code)?;
        let origin = index.airport_name(&flight.origin_airport)?;
        Some((airline, origin, flight.month_start()))
    });

    let mut rows: Vec<MonthlyFlightCount> = counts
        .into_iter()
        .map(|((airline, origin, month), flight_count)| MonthlyFlightCount {
            airline: airline.to_string(),
            origin_airport: origin.to_string(),
            month,
            flight_count,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.airline
            .cmp(&b.airline)
            .then_with(|| a.origin_airport.cmp(&b.origin_airport))
            .then_with(|| a.month.cmp(&b.month))
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Airline, Airport};

    fn index() -> JoinIndex {
        JoinIndex::new(
            &[Airline::new("B6", "JetBlue Airways")],
            &[
                Airport::new("BOS", "Gen. Edward Lawrence Logan International Airport"),
                Airport::new("JFK", "John F. Kennedy International Airport"),
            ],
        )
    }

    fn flight(origin: &str, year: i32, month: u32) -> Flight {
        Flight::builder()
            .flight_number("600")
            .airline("B6")
            .route(origin, "MCO")
            .date(year, month)
            .build()
            .unwrap()
    }

    #[test]
    fn test_counts_per_month_and_origin() {
        let flights = vec![
            flight("JFK", 2015, 1),
            flight("JFK", 2015, 1),
            flight("JFK", 2015, 2),
            flight("BOS", 2015, 1),
        ];

        let rows = monthly_flight_count_by_airline_and_origin_airport(&flights, &index());
        let summary: Vec<(&str, Option<NaiveDate>, u64)> = rows
            .iter()
            .map(|r| (r.origin_airport.as_str(), r.month, r.flight_count))
            .collect();

        assert_eq!(
            summary,
            vec![
                (
                    "Gen. Edward Lawrence Logan International Airport",
                    NaiveDate::from_ymd_opt(2015, 1, 1),
                    1
                ),
                (
                    "John F. Kennedy International Airport",
                    NaiveDate::from_ymd_opt(2015, 1, 1),
                    2
                ),
                (
                    "John F. Kennedy International Airport",
                    NaiveDate::from_ymd_opt(2015, 2, 1),
                    1
                ),
            ]
        );
    }

    #[test]
    fn test_same_month_in_different_years_is_separate() {
        let flights = vec![flight("JFK", 2014, 12), flight("JFK", 2015, 12)];
        assert_eq!(
            monthly_flight_count_by_airline_and_origin_airport(&flights, &index()).len(),
            2
        );
    }

    #[test]
    fn test_requires_airline_and_origin_to_resolve() {
        let mut unknown_airline = flight("JFK", 2015, 3);
        unknown_airline.airline_code = "ZZ".to_string();
        let flights = vec![unknown_airline, flight("XXX", 2015, 3)];

        assert!(monthly_flight_count_by_airline_and_origin_airport(&flights, &index()).is_empty());
    }
}
