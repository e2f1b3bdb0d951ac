mod driver_api;
mod helpers;
mod payment_api;
mod rating_api;
mod ride_api;
mod rider_api;

use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    api::API,
    db::{
        DriverDirectory, DriverPool, InMemoryDriverDirectory, InMemoryDriverPool,
        InMemoryPaymentLedger, InMemoryRatingLedger, InMemoryRideStore, InMemoryRiderDirectory,
        PaymentLedger, RatingLedger, RideStore, RiderDirectory,
    },
    entities::RideId,
};

/// Storage handed to the engine at construction.
pub struct Stores {
    pub rides: Box<dyn RideStore + Send + Sync>,
    pub drivers: Box<dyn DriverPool + Send + Sync>,
    pub driver_profiles: Box<dyn DriverDirectory + Send + Sync>,
    pub riders: Box<dyn RiderDirectory + Send + Sync>,
    pub payments: Box<dyn PaymentLedger + Send + Sync>,
    pub ratings: Box<dyn RatingLedger + Send + Sync>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self::with_drivers(Vec::<String>::new())
    }

    pub fn with_drivers<I, S>(drivers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rides: Box::new(InMemoryRideStore::new()),
            drivers: Box::new(InMemoryDriverPool::with_drivers(drivers)),
            driver_profiles: Box::new(InMemoryDriverDirectory::new()),
            riders: Box::new(InMemoryRiderDirectory::new()),
            payments: Box::new(InMemoryPaymentLedger::new()),
            ratings: Box::new(InMemoryRatingLedger::new()),
        }
    }
}

pub struct Engine {
    rides: Box<dyn RideStore + Send + Sync>,
    drivers: Box<dyn DriverPool + Send + Sync>,
    driver_profiles: Box<dyn DriverDirectory + Send + Sync>,
    riders: Box<dyn RiderDirectory + Send + Sync>,
    payments: Box<dyn PaymentLedger + Send + Sync>,
    ratings: Box<dyn RatingLedger + Send + Sync>,
    next_ride_id: AtomicU64,
    ride_locks: std::sync::Mutex<HashMap<RideId, Arc<Mutex<()>>>>,
    // driver id -> ride it is bound to; held while popping from or pushing to the pool
    engagements: Mutex<HashMap<String, RideId>>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(stores: Stores) -> Self {
        Self {
            rides: stores.rides,
            drivers: stores.drivers,
            driver_profiles: stores.driver_profiles,
            riders: stores.riders,
            payments: stores.payments,
            ratings: stores.ratings,
            next_ride_id: AtomicU64::new(0),
            ride_locks: std::sync::Mutex::new(HashMap::new()),
            engagements: Mutex::new(HashMap::new()),
        }
    }
}

impl API for Engine {}
