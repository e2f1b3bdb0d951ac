//! Storage seams used by the engine.
//!
//! Every trait here is a plain container: business rules live in the engine.
//! The in-memory implementations in [`memory`] back both the binary and the tests.

pub mod memory;

use async_trait::async_trait;

use crate::{
    entities::{Driver, Fare, Payment, PaymentKind, Rating, RatingSubject, Ride, RideId, Rider},
    error::Error,
};

pub use memory::{
    InMemoryDriverDirectory, InMemoryDriverPool, InMemoryPaymentLedger, InMemoryRatingLedger, InMemoryRideStore,
    InMemoryRiderDirectory,
};

#[async_trait]
pub trait RideStore {
    async fn get(&self, id: RideId) -> Result<Option<Ride>, Error>;
    async fn put(&self, ride: Ride) -> Result<(), Error>;
    /// Every stored ride ordered by id, for diagnostics.
    async fn all(&self) -> Result<Vec<Ride>, Error>;
}

#[async_trait]
pub trait DriverPool {
    /// No-op when the driver is already pooled.
    async fn add_driver(&self, driver_id: String) -> Result<(), Error>;
    /// Pops the driver that has waited the longest.
    async fn take_available_driver(&self) -> Result<Option<String>, Error>;
    async fn release_driver(&self, driver_id: String) -> Result<(), Error>;
    async fn available(&self) -> Result<Vec<String>, Error>;
}

#[async_trait]
pub trait DriverDirectory {
    async fn find_driver(&self, driver_id: &str) -> Result<Option<Driver>, Error>;
    /// Returns false without inserting when the id is taken.
    async fn insert_driver(&self, driver: Driver) -> Result<bool, Error>;
    /// Overwrites an existing profile.
    async fn put_driver(&self, driver: Driver) -> Result<(), Error>;
}

#[async_trait]
pub trait RiderDirectory {
    async fn resolve_rider(&self, rider_id: &str) -> Result<bool, Error>;
    async fn find_rider(&self, rider_id: &str) -> Result<Option<Rider>, Error>;
    /// Returns false without inserting when the id is taken.
    async fn insert_rider(&self, rider: Rider) -> Result<bool, Error>;
}

#[async_trait]
pub trait PaymentLedger {
    async fn fare(&self, ride_id: RideId) -> Result<Option<Fare>, Error>;
    async fn put_fare(&self, fare: Fare) -> Result<(), Error>;
    async fn payment(&self, ride_id: RideId, kind: PaymentKind) -> Result<Option<Payment>, Error>;
    async fn put_payment(&self, payment: Payment) -> Result<(), Error>;
}

#[async_trait]
pub trait RatingLedger {
    /// Returns false without inserting when the ride already has a rating for that subject.
    async fn insert(&self, rating: Rating) -> Result<bool, Error>;
    async fn average(&self, subject: RatingSubject, subject_id: &str) -> Result<Option<f64>, Error>;
}
