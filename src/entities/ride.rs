use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Location;
use crate::error::Error;

pub type RideId = u64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: RideId,
    pub rider_id: String,
    pub pickup: Location,
    pub dropoff: Location,
    pub status: Status,
    pub driver_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    DriverAssigned,
    InProgress,
    Completed,
    Cancelled,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Pending,
        Status::DriverAssigned,
        Status::InProgress,
        Status::Completed,
        Status::Cancelled,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::DriverAssigned => "DRIVER_ASSIGNED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Edges of the ride graph. Terminal states have no outgoing edges.
    pub fn can_transition_to(&self, next: Status) -> bool {
        match (self, next) {
            (Self::Pending, Self::DriverAssigned) => true,
            (Self::DriverAssigned, Self::InProgress) => true,
            (Self::InProgress, Self::Completed) => true,
            (Self::Pending | Self::DriverAssigned | Self::InProgress, Self::Cancelled) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.name() == s)
            .ok_or_else(|| Error::invalid_status_error(s))
    }
}

impl Ride {
    pub fn new(id: RideId, rider_id: String, pickup: Location, dropoff: Location) -> Self {
        let now = Utc::now();

        Self {
            id,
            rider_id,
            pickup,
            dropoff,
            status: Status::Pending,
            driver_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    #[tracing::instrument(skip(self), fields(ride_id = self.id))]
    pub fn assign_driver(&mut self, driver_id: String) -> Result<(), Error> {
        if self.driver_id.is_some() || !self.status.can_transition_to(Status::DriverAssigned) {
            return Err(Error::invalid_transition_error());
        }

        self.driver_id = Some(driver_id);
        self.status = Status::DriverAssigned;
        self.updated_at = Utc::now();

        Ok(())
    }

    /// Moves the ride along the graph. `DRIVER_ASSIGNED` is only entered through
    /// [`Ride::assign_driver`] so that an assigned ride always carries a driver.
    #[tracing::instrument(skip(self), fields(ride_id = self.id))]
    pub fn transition(&mut self, next: Status) -> Result<(), Error> {
        if next == Status::DriverAssigned || !self.status.can_transition_to(next) {
            return Err(Error::invalid_transition_error());
        }

        self.status = next;
        self.updated_at = Utc::now();

        Ok(())
    }
}
