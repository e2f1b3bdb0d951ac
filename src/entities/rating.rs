use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::RideId;
use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Driver,
    Rider,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub ride_id: RideId,
    pub subject: Subject,
    pub subject_id: String,
    pub score: f64,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(
        ride_id: RideId,
        subject: Subject,
        subject_id: String,
        score: f64,
        review: Option<String>,
    ) -> Result<Self, Error> {
        if !(1.0..=5.0).contains(&score) {
            return Err(Error::invalid_request_error("rating must be between 1 and 5"));
        }

        Ok(Self {
            ride_id,
            subject,
            subject_id,
            score,
            review,
            created_at: Utc::now(),
        })
    }
}

#[test]
fn score_bounds_are_inclusive() {
    assert!(Rating::new(1, Subject::Driver, "d1".into(), 1.0, None).is_ok());
    assert!(Rating::new(1, Subject::Driver, "d1".into(), 5.0, None).is_ok());
    assert!(Rating::new(1, Subject::Rider, "r1".into(), 0.5, None).is_err());
    assert!(Rating::new(1, Subject::Rider, "r1".into(), 5.1, None).is_err());
    assert!(Rating::new(1, Subject::Rider, "r1".into(), f64::NAN, None).is_err());
}
