use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::RideId;
use crate::error::Error;

pub const BASE_FARE: f64 = 2.00;
pub const PER_KM_RATE: f64 = 1.25;
pub const PER_MINUTE_RATE: f64 = 0.25;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fare {
    pub ride_id: RideId,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub amount: f64,
}

impl Fare {
    /// `BASE_FARE + PER_KM_RATE * km + PER_MINUTE_RATE * minutes`, rounded to cents.
    pub fn calculate(ride_id: RideId, distance_km: f64, duration_minutes: f64) -> Result<Self, Error> {
        for value in [distance_km, duration_minutes] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_request_error(
                    "distance and duration must be non-negative numbers",
                ));
            }
        }

        let amount = BASE_FARE + PER_KM_RATE * distance_km + PER_MINUTE_RATE * duration_minutes;

        Ok(Self {
            ride_id,
            distance_km,
            duration_minutes,
            amount: (amount * 100.0).round() / 100.0,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Charge,
    Payout,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub transaction_id: Uuid,
    pub ride_id: RideId,
    pub kind: Kind,
    pub party_id: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(ride_id: RideId, kind: Kind, party_id: String, amount: f64) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            ride_id,
            kind,
            party_id,
            amount,
            created_at: Utc::now(),
        }
    }
}
