use serde::{Deserialize, Serialize};

use crate::error::Error;

const OLDEST_MODEL_YEAR: u16 = 1900;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    pub year: u16,
}

impl Vehicle {
    #[tracing::instrument]
    pub fn validate(&self) -> Result<(), Error> {
        if self.make.trim().is_empty() || self.model.trim().is_empty() {
            return Err(Error::invalid_request_error("vehicle make and model are required"));
        }

        if self.year < OLDEST_MODEL_YEAR {
            return Err(Error::invalid_request_error(format!(
                "vehicle year must be {} or later",
                OLDEST_MODEL_YEAR
            )));
        }

        Ok(())
    }
}

/// Driver profile. Availability is tracked by the pool, not here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub license_number: String,
    pub vehicle: Vehicle,
}

impl Driver {
    pub fn new(
        id: String,
        name: String,
        license_number: String,
        vehicle: Vehicle,
    ) -> Result<Self, Error> {
        if [&id, &name, &license_number]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(Error::invalid_request_error(
                "id, name and license_number are required",
            ));
        }

        vehicle.validate()?;

        Ok(Self {
            id,
            name,
            license_number,
            vehicle,
        })
    }

    pub fn update_vehicle(&mut self, vehicle: Vehicle) -> Result<(), Error> {
        vehicle.validate()?;
        self.vehicle = vehicle;
        Ok(())
    }
}
