use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Coordinates(Coordinates),
    Address(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn address(address: impl Into<String>) -> Self {
        Self::Address(address.into())
    }

    pub fn coordinates(lat: f64, lng: f64) -> Self {
        Self::Coordinates(Coordinates { lat, lng })
    }

    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Address(address) if address.trim().is_empty() => {
                Err(Error::invalid_request_error("location must not be empty"))
            }
            Self::Address(_) => Ok(()),
            Self::Coordinates(Coordinates { lat, lng }) => {
                if !lat.is_finite() || !lng.is_finite() {
                    return Err(Error::invalid_request_error("coordinates must be finite"));
                }

                if !(-90.0..=90.0).contains(lat) || !(-180.0..=180.0).contains(lng) {
                    return Err(Error::invalid_request_error("coordinates out of range"));
                }

                Ok(())
            }
        }
    }
}

#[test]
fn deserializes_addresses_and_coordinates() {
    let address: Location = serde_json::from_str("\"221B Baker St\"").unwrap();
    assert_eq!(address, Location::address("221B Baker St"));

    let point: Location = serde_json::from_str(r#"{"lat": 51.5, "lng": -0.12}"#).unwrap();
    assert_eq!(point, Location::coordinates(51.5, -0.12));
}

#[test]
fn rejects_blank_and_out_of_range_locations() {
    assert!(Location::address("  ").validate().is_err());
    assert!(Location::coordinates(91.0, 0.0).validate().is_err());
    assert!(Location::coordinates(0.0, f64::NAN).validate().is_err());
    assert!(Location::coordinates(-33.9, 151.2).validate().is_ok());
}
