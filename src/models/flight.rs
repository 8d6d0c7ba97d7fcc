use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;

use crate::error::{ProcessingError, Result};

/// The five delay-attribution components carried on a flight record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DelayCause {
    #[serde(rename = "Air System Delay")]
    AirSystem,
    #[serde(rename = "Security Delay")]
    Security,
    #[serde(rename = "Airline Delay")]
    Airline,
    #[serde(rename = "Late Aircraft Delay")]
    LateAircraft,
    #[serde(rename = "Weather Delay")]
    Weather,
}

impl DelayCause {
    pub const ALL: [DelayCause; 5] = [
        DelayCause::AirSystem,
        DelayCause::Security,
        DelayCause::Airline,
        DelayCause::LateAircraft,
        DelayCause::Weather,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DelayCause::AirSystem => "Air System Delay",
            DelayCause::Security => "Security Delay",
            DelayCause::Airline => "Airline Delay",
            DelayCause::LateAircraft => "Late Aircraft Delay",
            DelayCause::Weather => "Weather Delay",
        }
    }
}

impl fmt::Display for DelayCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One scheduled flight leg.
///
/// Delay fields are `None` when the source left them empty. Every threshold
/// predicate on this type treats an absent value as failing the comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Flight {
    #[serde(rename = "FLIGHT_NUMBER")]
    pub flight_number: String,

    #[serde(rename = "AIRLINE")]
    #[validate(length(min = 1))]
    pub airline_code: String,

    #[serde(rename = "ORIGIN_AIRPORT")]
    #[validate(length(min = 1))]
    pub origin_airport: String,

    #[serde(rename = "DESTINATION_AIRPORT")]
    #[validate(length(min = 1))]
    pub destination_airport: String,

    #[serde(rename = "YEAR")]
    pub year: i32,

    #[serde(rename = "MONTH")]
    #[validate(range(min = 1, max = 12))]
    pub month: u32,

    #[serde(rename = "DAY", default)]
    #[validate(range(min = 1, max = 31))]
    pub day: Option<u32>,

    #[serde(rename = "TAIL_NUMBER", default)]
    pub tail_number: Option<String>,

    #[serde(rename = "CANCELLED", deserialize_with = "deserialize_flag")]
    pub cancelled: bool,

    #[serde(rename = "CANCELLATION_REASON", default)]
    pub cancellation_reason: Option<String>,

    #[serde(rename = "DIVERTED", default, deserialize_with = "deserialize_flag")]
    pub diverted: bool,

    #[serde(rename = "ARRIVAL_DELAY", default)]
    pub arrival_delay: Option<i32>,

    #[serde(rename = "DEPARTURE_DELAY", default)]
    pub departure_delay: Option<i32>,

    #[serde(rename = "AIR_SYSTEM_DELAY", default)]
    #[validate(range(min = 0))]
    pub air_system_delay: Option<i32>,

    #[serde(rename = "SECURITY_DELAY", default)]
    #[validate(range(min = 0))]
    pub security_delay: Option<i32>,

    #[serde(rename = "AIRLINE_DELAY", default)]
    #[validate(range(min = 0))]
    pub airline_delay: Option<i32>,

    #[serde(rename = "LATE_AIRCRAFT_DELAY", default)]
    #[validate(range(min = 0))]
    pub late_aircraft_delay: Option<i32>,

    #[serde(rename = "WEATHER_DELAY", default)]
    #[validate(range(min = 0))]
    pub weather_delay: Option<i32>,
}

impl Flight {
    pub fn builder() -> FlightBuilder {
        FlightBuilder::new()
    }

    pub fn cause_delay(&self, cause: DelayCause) -> Option<i32> {
        match cause {
            DelayCause::AirSystem => self.air_system_delay,
            DelayCause::Security => self.security_delay,
            DelayCause::Airline => self.airline_delay,
            DelayCause::LateAircraft => self.late_aircraft_delay,
            DelayCause::Weather => self.weather_delay,
        }
    }

    /// True when the given cause contributed a positive number of minutes.
    pub fn has_cause(&self, cause: DelayCause) -> bool {
        self.cause_delay(cause).is_some_and(|minutes| minutes > 0)
    }

    pub fn is_arrival_delayed(&self, threshold: i32) -> bool {
        self.arrival_delay.is_some_and(|delay| delay >= threshold)
    }

    pub fn is_departure_delayed(&self, threshold: i32) -> bool {
        self.departure_delay.is_some_and(|delay| delay >= threshold)
    }

    pub fn is_on_time_arrival(&self, threshold: i32) -> bool {
        self.arrival_delay.is_some_and(|delay| delay < threshold)
    }

    pub fn is_on_time_departure(&self, threshold: i32) -> bool {
        self.departure_delay.is_some_and(|delay| delay < threshold)
    }

    /// First day of the flight's month, or `None` when year/month do not form a date.
    pub fn month_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// A cancellation reason is expected exactly when the flight was cancelled.
    pub fn has_consistent_cancellation(&self) -> bool {
        self.cancelled == self.cancellation_reason.is_some()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| de::Error::custom(format!("invalid flag value: '{}'", raw)))
}

pub struct FlightBuilder {
    flight_number: Option<String>,
    airline_code: Option<String>,
    origin_airport: Option<String>,
    destination_airport: Option<String>,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    tail_number: Option<String>,
    cancellation_reason: Option<String>,
    cancelled: bool,
    diverted: bool,
    arrival_delay: Option<i32>,
    departure_delay: Option<i32>,
    air_system_delay: Option<i32>,
    security_delay: Option<i32>,
    airline_delay: Option<i32>,
    late_aircraft_delay: Option<i32>,
    weather_delay: Option<i32>,
}

impl Default for FlightBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightBuilder {
    pub fn new() -> Self {
        Self {
            flight_number: None,
            airline_code: None,
            origin_airport: None,
            destination_airport: None,
            year: None,
            month: None,
            day: None,
            tail_number: None,
            cancellation_reason: None,
            cancelled: false,
            diverted: false,
            arrival_delay: None,
            departure_delay: None,
            air_system_delay: None,
            security_delay: None,
            airline_delay: None,
            late_aircraft_delay: None,
            weather_delay: None,
        }
    }

    pub fn flight_number(mut self, number: impl Into<String>) -> Self {
        self.flight_number = Some(number.into());
        self
    }

    pub fn airline(mut self, code: impl Into<String>) -> Self {
        self.airline_code = Some(code.into());
        self
    }

    pub fn route(mut self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        self.origin_airport = Some(origin.into());
        self.destination_airport = Some(destination.into());
        self
    }

    pub fn date(mut self, year: i32, month: u32) -> Self {
        self.year = Some(year);
        self.month = Some(month);
        self
    }

    pub fn day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    pub fn tail_number(mut self, tail_number: impl Into<String>) -> Self {
        self.tail_number = Some(tail_number.into());
        self
    }

    pub fn cancelled(mut self, reason: impl Into<String>) -> Self {
        self.cancelled = true;
        self.cancellation_reason = Some(reason.into());
        self
    }

    pub fn diverted(mut self) -> Self {
        self.diverted = true;
        self
    }

    pub fn arrival_delay(mut self, minutes: i32) -> Self {
        self.arrival_delay = Some(minutes);
        self
    }

    pub fn departure_delay(mut self, minutes: i32) -> Self {
        self.departure_delay = Some(minutes);
        self
    }

    pub fn cause(mut self, cause: DelayCause, minutes: i32) -> Self {
        let slot = match cause {
            DelayCause::AirSystem => &mut self.air_system_delay,
            DelayCause::Security => &mut self.security_delay,
            DelayCause::Airline => &mut self.airline_delay,
            DelayCause::LateAircraft => &mut self.late_aircraft_delay,
            DelayCause::Weather => &mut self.weather_delay,
        };
        *slot = Some(minutes);
        self
    }

    pub fn build(self) -> Result<Flight> {
        let flight = Flight {
            flight_number: self.flight_number.unwrap_or_default(),
            airline_code: self
                .airline_code
                .ok_or_else(|| ProcessingError::MissingData("airline_code".to_string()))?,
            origin_airport: self
                .origin_airport
                .ok_or_else(|| ProcessingError::MissingData("origin_airport".to_string()))?,
            destination_airport: self
                .destination_airport
                .ok_or_else(|| ProcessingError::MissingData("destination_airport".to_string()))?,
            year: self
                .year
                .ok_or_else(|| ProcessingError::MissingData("year".to_string()))?,
            month: self
                .month
                .ok_or_else(|| ProcessingError::MissingData("month".to_string()))?,
            day: self.day,
            tail_number: self.tail_number,
            cancelled: self.cancelled,
            cancellation_reason: self.cancellation_reason,
            diverted: self.diverted,
            arrival_delay: self.arrival_delay,
            departure_delay: self.departure_delay,
            air_system_delay: self.air_system_delay,
            security_delay: self.security_delay,
            airline_delay: self.airline_delay,
            late_aircraft_delay: self.late_aircraft_delay,
            weather_delay: self.weather_delay,
        };

        flight.validate()?;
        Ok(flight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> FlightBuilder {
        Flight::builder()
            .flight_number("98")
            .airline("AS")
            .route("ANC", "SEA")
            .date(2015, 1)
    }

    #[test]
    fn test_null_delays_fail_every_threshold() {
        let flight = base().build().unwrap();

        assert!(!flight.is_arrival_delayed(15));
        assert!(!flight.is_on_time_arrival(15));
        assert!(!flight.is_departure_delayed(15));
        assert!(!flight.is_on_time_departure(15));
    }

    #[test]
    fn test_threshold_boundaries() {
        let flight = base().arrival_delay(15).departure_delay(14).build().unwrap();

        assert!(flight.is_arrival_delayed(15));
        assert!(!flight.is_on_time_arrival(15));
        assert!(flight.is_on_time_departure(15));
        assert!(!flight.is_departure_delayed(15));
    }

    #[test]
    fn test_negative_delay_is_on_time() {
        let flight = base().arrival_delay(-22).build().unwrap();
        assert!(flight.is_on_time_arrival(15));
    }

    #[test]
    fn test_has_cause_requires_positive_minutes() {
        let flight = base()
            .arrival_delay(40)
            .cause(DelayCause::Weather, 0)
            .cause(DelayCause::Airline, 40)
            .build()
            .unwrap();

        assert!(!flight.has_cause(DelayCause::Weather));
        assert!(flight.has_cause(DelayCause::Airline));
        assert!(!flight.has_cause(DelayCause::Security));
    }

    #[test]
    fn test_month_start() {
        let flight = base().date(2015, 7).build().unwrap();
        assert_eq!(flight.month_start(), NaiveDate::from_ymd_opt(2015, 7, 1));
    }

    #[test]
    fn test_builder_rejects_invalid_month() {
        assert!(base().date(2015, 13).build().is_err());
    }

    #[test]
    fn test_builder_rejects_negative_cause() {
        assert!(base().cause(DelayCause::Security, -5).build().is_err());
    }

    #[test]
    fn test_builder_requires_route() {
        let result = Flight::builder().airline("AA").date(2015, 1).build();
        assert!(matches!(result, Err(ProcessingError::MissingData(_))));
    }

    #[test]
    fn test_cancellation_consistency() {
        assert!(base().cancelled("B").build().unwrap().has_consistent_cancellation());
        assert!(base().build().unwrap().has_consistent_cancellation());

        let mut flight = base().build().unwrap();
        flight.cancellation_reason = Some("A".to_string());
        assert!(!flight.has_consistent_cancellation());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("2"), None);
    }

    #[test]
    fn test_delay_cause_labels() {
        assert_eq!(DelayCause::LateAircraft.to_string(), "Late Aircraft Delay");
        assert_eq!(DelayCause::ALL.len(), 5);
    }
}
