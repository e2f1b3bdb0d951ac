use std::collections::{BTreeMap, HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use super::{DriverDirectory, DriverPool, PaymentLedger, RatingLedger, RideStore, RiderDirectory};
use crate::{
    entities::{Driver, Fare, Payment, PaymentKind, Rating, RatingSubject, Ride, RideId, Rider},
    error::Error,
};

#[derive(Debug, Default)]
pub struct InMemoryRideStore {
    rides: RwLock<BTreeMap<RideId, Ride>>,
}

impl InMemoryRideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RideStore for InMemoryRideStore {
    async fn get(&self, id: RideId) -> Result<Option<Ride>, Error> {
        Ok(self.rides.read().await.get(&id).cloned())
    }

    async fn put(&self, ride: Ride) -> Result<(), Error> {
        self.rides.write().await.insert(ride.id, ride);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Ride>, Error> {
        Ok(self.rides.read().await.values().cloned().collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDriverPool {
    queue: Mutex<VecDeque<String>>,
}

impl InMemoryDriverPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drivers<I, S>(drivers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue = VecDeque::new();
        for driver_id in drivers {
            let driver_id = driver_id.into();
            if !queue.contains(&driver_id) {
                queue.push_back(driver_id);
            }
        }

        Self {
            queue: Mutex::new(queue),
        }
    }

    async fn admit(&self, driver_id: String) {
        let mut queue = self.queue.lock().await;
        if !queue.contains(&driver_id) {
            queue.push_back(driver_id);
        }
    }
}

#[async_trait]
impl DriverPool for InMemoryDriverPool {
    async fn add_driver(&self, driver_id: String) -> Result<(), Error> {
        self.admit(driver_id).await;
        Ok(())
    }

    async fn take_available_driver(&self) -> Result<Option<String>, Error> {
        Ok(self.queue.lock().await.pop_front())
    }

    async fn release_driver(&self, driver_id: String) -> Result<(), Error> {
        self.admit(driver_id).await;
        Ok(())
    }

    async fn available(&self) -> Result<Vec<String>, Error> {
        Ok(self.queue.lock().await.iter().cloned().collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDriverDirectory {
    drivers: RwLock<HashMap<String, Driver>>,
}

impl InMemoryDriverDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DriverDirectory for InMemoryDriverDirectory {
    async fn find_driver(&self, driver_id: &str) -> Result<Option<Driver>, Error> {
        Ok(self.drivers.read().await.get(driver_id).cloned())
    }

    async fn insert_driver(&self, driver: Driver) -> Result<bool, Error> {
        let mut drivers = self.drivers.write().await;
        if drivers.contains_key(&driver.id) {
            return Ok(false);
        }

        drivers.insert(driver.id.clone(), driver);
        Ok(true)
    }

    async fn put_driver(&self, driver: Driver) -> Result<(), Error> {
        self.drivers.write().await.insert(driver.id.clone(), driver);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRiderDirectory {
    riders: RwLock<HashMap<String, Rider>>,
}

impl InMemoryRiderDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RiderDirectory for InMemoryRiderDirectory {
    async fn resolve_rider(&self, rider_id: &str) -> Result<bool, Error> {
        Ok(self.riders.read().await.contains_key(rider_id))
    }

    async fn find_rider(&self, rider_id: &str) -> Result<Option<Rider>, Error> {
        Ok(self.riders.read().await.get(rider_id).cloned())
    }

    async fn insert_rider(&self, rider: Rider) -> Result<bool, Error> {
        let mut riders = self.riders.write().await;
        if riders.contains_key(&rider.id) {
            return Ok(false);
        }

        riders.insert(rider.id.clone(), rider);
        Ok(true)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPaymentLedger {
    fares: RwLock<HashMap<RideId, Fare>>,
    payments: RwLock<HashMap<(RideId, PaymentKind), Payment>>,
}

impl InMemoryPaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentLedger for InMemoryPaymentLedger {
    async fn fare(&self, ride_id: RideId) -> Result<Option<Fare>, Error> {
        Ok(self.fares.read().await.get(&ride_id).cloned())
    }

    async fn put_fare(&self, fare: Fare) -> Result<(), Error> {
        self.fares.write().await.insert(fare.ride_id, fare);
        Ok(())
    }

    async fn payment(&self, ride_id: RideId, kind: PaymentKind) -> Result<Option<Payment>, Error> {
        Ok(self.payments.read().await.get(&(ride_id, kind)).cloned())
    }

    async fn put_payment(&self, payment: Payment) -> Result<(), Error> {
        self.payments
            .write()
            .await
            .insert((payment.ride_id, payment.kind), payment);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRatingLedger {
    ratings: RwLock<HashMap<(RideId, RatingSubject), Rating>>,
}

impl InMemoryRatingLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RatingLedger for InMemoryRatingLedger {
    async fn insert(&self, rating: Rating) -> Result<bool, Error> {
        let mut ratings = self.ratings.write().await;
        let key = (rating.ride_id, rating.subject);
        if ratings.contains_key(&key) {
            return Ok(false);
        }

        ratings.insert(key, rating);
        Ok(true)
    }

    async fn average(&self, subject: RatingSubject, subject_id: &str) -> Result<Option<f64>, Error> {
        let ratings = self.ratings.read().await;
        let scores: Vec<f64> = ratings
            .values()
            .filter(|rating| rating.subject == subject && rating.subject_id == subject_id)
            .map(|rating| rating.score)
            .collect();

        if scores.is_empty() {
            return Ok(None);
        }

        Ok(Some(scores.iter().sum::<f64>() / scores.len() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Location, Vehicle};
    use tokio_test::block_on;

    #[test]
    fn pool_is_fifo_and_drains_to_none() {
        let pool = InMemoryDriverPool::with_drivers(["d1", "d2"]);

        block_on(async {
            assert_eq!(pool.take_available_driver().await.unwrap().as_deref(), Some("d1"));
            assert_eq!(pool.take_available_driver().await.unwrap().as_deref(), Some("d2"));
            assert_eq!(pool.take_available_driver().await.unwrap(), None);
            assert_eq!(pool.take_available_driver().await.unwrap(), None);
        });
    }

    #[test]
    fn pool_never_holds_a_driver_twice() {
        let pool = InMemoryDriverPool::with_drivers(["d1", "d1", "d2"]);

        block_on(async {
            pool.add_driver("d2".into()).await.unwrap();
            pool.release_driver("d1".into()).await.unwrap();
            assert_eq!(pool.available().await.unwrap(), vec!["d1", "d2"]);
        });
    }

    #[test]
    fn released_driver_joins_the_back_of_the_queue() {
        let pool = InMemoryDriverPool::with_drivers(["d1", "d2"]);

        block_on(async {
            let d1 = pool.take_available_driver().await.unwrap().unwrap();
            pool.release_driver(d1).await.unwrap();
            pool.release_driver("d1".into()).await.unwrap();

            assert_eq!(pool.available().await.unwrap(), vec!["d2", "d1"]);
        });
    }

    #[test]
    fn driver_directory_refuses_duplicate_ids() {
        let directory = InMemoryDriverDirectory::new();
        let vehicle = Vehicle {
            make: "Toyota".into(),
            model: "Prius".into(),
            year: 2020,
        };

        block_on(async {
            let grace = Driver::new("d1".into(), "Grace".into(), "LIC-1".into(), vehicle.clone()).unwrap();
            let impostor = Driver::new("d1".into(), "Mallory".into(), "LIC-2".into(), vehicle).unwrap();

            assert!(directory.insert_driver(grace.clone()).await.unwrap());
            assert!(!directory.insert_driver(impostor).await.unwrap());
            assert_eq!(directory.find_driver("d1").await.unwrap(), Some(grace));
            assert_eq!(directory.find_driver("d2").await.unwrap(), None);
        });
    }

    #[test]
    fn ride_store_lists_rides_by_id() {
        let store = InMemoryRideStore::new();

        block_on(async {
            for id in [3, 1, 2] {
                let ride = Ride::new(id, "r1".into(), Location::address("A"), Location::address("B"));
                store.put(ride).await.unwrap();
            }

            let ids: Vec<RideId> = store.all().await.unwrap().iter().map(|r| r.id).collect();
            assert_eq!(ids, vec![1, 2, 3]);
            assert!(store.get(4).await.unwrap().is_none());
        });
    }

    #[test]
    fn rating_ledger_averages_per_subject() {
        let ledger = InMemoryRatingLedger::new();

        block_on(async {
            let first = Rating::new(1, RatingSubject::Driver, "d1".into(), 4.0, None).unwrap();
            let second = Rating::new(2, RatingSubject::Driver, "d1".into(), 5.0, None).unwrap();
            let duplicate = Rating::new(2, RatingSubject::Driver, "d1".into(), 1.0, None).unwrap();

            assert!(ledger.insert(first).await.unwrap());
            assert!(ledger.insert(second).await.unwrap());
            assert!(!ledger.insert(duplicate).await.unwrap());

            assert_eq!(
                ledger.average(RatingSubject::Driver, "d1").await.unwrap(),
                Some(4.5)
            );
            assert_eq!(ledger.average(RatingSubject::Rider, "d1").await.unwrap(), None);
        });
    }
}
