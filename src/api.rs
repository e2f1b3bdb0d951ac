use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Driver, Fare, Location, Payment, Rating, Ride, RideId, Rider, Vehicle};
use crate::error::Error;

#[async_trait]
pub trait RideAPI {
    async fn create_ride(
        &self,
        rider_id: String,
        pickup: Location,
        dropoff: Location,
    ) -> Result<Ride, Error>;
    async fn find_ride(&self, id: RideId) -> Result<Ride, Error>;
    async fn list_rides(&self) -> Result<Vec<Ride>, Error>;
    /// `Ok(None)` when the pool is empty; the ride stays `PENDING`.
    async fn assign_driver(&self, id: RideId) -> Result<Option<String>, Error>;
    async fn update_status(&self, id: RideId, status: &str) -> Result<Ride, Error>;
    async fn release_driver(&self, id: RideId) -> Result<String, Error>;
    async fn cancel_stale_rides(&self, max_age: chrono::Duration) -> Result<Vec<RideId>, Error>;
}

#[async_trait]
pub trait DriverAPI {
    /// Stores the profile and makes the driver available.
    async fn register_driver(
        &self,
        id: String,
        name: String,
        license_number: String,
        vehicle: Vehicle,
    ) -> Result<Driver, Error>;
    async fn find_driver(&self, id: String) -> Result<Driver, Error>;
    async fn update_vehicle(&self, id: String, vehicle: Vehicle) -> Result<Driver, Error>;
    async fn available_drivers(&self) -> Result<Vec<String>, Error>;
}

#[async_trait]
pub trait RiderAPI {
    async fn register_rider(
        &self,
        id: String,
        name: String,
        phone_number: String,
        payment_method: String,
    ) -> Result<Rider, Error>;
    async fn find_rider(&self, id: String) -> Result<Rider, Error>;
}

#[async_trait]
pub trait PaymentAPI {
    async fn calculate_fare(
        &self,
        ride_id: RideId,
        distance_km: f64,
        duration_minutes: f64,
    ) -> Result<Fare, Error>;
    async fn process_payment(&self, ride_id: RideId) -> Result<Payment, Error>;
    async fn payout_driver(&self, ride_id: RideId) -> Result<Payment, Error>;
}

#[async_trait]
pub trait RatingAPI {
    async fn rate_driver(
        &self,
        ride_id: RideId,
        score: f64,
        review: Option<String>,
    ) -> Result<Rating, Error>;
    async fn rate_rider(
        &self,
        ride_id: RideId,
        score: f64,
        review: Option<String>,
    ) -> Result<Rating, Error>;
    async fn driver_rating(&self, driver_id: String) -> Result<Option<f64>, Error>;
    async fn rider_rating(&self, rider_id: String) -> Result<Option<f64>, Error>;
}

pub trait API: RideAPI + DriverAPI + RiderAPI + PaymentAPI + RatingAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
