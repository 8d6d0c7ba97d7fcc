use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Airline {
    #[serde(rename = "IATA_CODE")]
    #[validate(length(min = 1))]
    pub iata_code: String,

    #[serde(rename = "AIRLINE")]
    #[validate(length(min = 1))]
    pub name: String,
}

impl Airline {
    pub fn new(iata_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            iata_code: iata_code.into(),
            name: name.into(),
        }
    }
}
