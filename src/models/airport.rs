use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Airport {
    #[serde(rename = "IATA_CODE")]
    #[validate(length(min = 1))]
    pub iata_code: String,

    #[serde(rename = "AIRPORT")]
    #[validate(length(min = 1))]
    pub name: String,

    #[serde(rename = "CITY", default)]
    pub city: Option<String>,

    #[serde(rename = "STATE", default)]
    pub state: Option<String>,

    #[serde(rename = "COUNTRY", default)]
    pub country: Option<String>,

    #[serde(rename = "LATITUDE", default)]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[serde(rename = "LONGITUDE", default)]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl Airport {
    pub fn new(iata_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            iata_code: iata_code.into(),
            name: name.into(),
            city: None,
            state: None,
            country: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_location(mut self, city: &str, state: &str, country: &str) -> Self {
        self.city = Some(city.to_string());
        self.state = Some(state.to_string());
        self.country = Some(country.to_string());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airport_validation() {
        let airport = Airport::new("JFK", "John F. Kennedy International Airport")
            .with_location("New York", "NY", "USA")
            .with_coordinates(40.63975, -73.77893);

        assert!(airport.validate().is_ok());
        assert_eq!(airport.city.as_deref(), Some("New York"));
    }

    #[test]
    fn test_invalid_coordinates() {
        let airport = Airport::new("XXX", "Nowhere").with_coordinates(91.0, 0.0);
        assert!(airport.validate().is_err());
    }

    #[test]
    fn test_missing_coordinates_are_valid() {
        assert!(Airport::new("ECP", "Northwest Florida Beaches International Airport")
            .validate()
            .is_ok());
    }
}
