use super::Engine;

use std::sync::atomic::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::{
    api::RideAPI,
    entities::{Location, Ride, RideId, RideStatus},
    error::Error,
};

#[async_trait]
impl RideAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_ride(
        &self,
        rider_id: String,
        pickup: Location,
        dropoff: Location,
    ) -> Result<Ride, Error> {
        if rider_id.trim().is_empty() {
            return Err(Error::invalid_request_error("rider_id is required"));
        }

        pickup.validate()?;
        dropoff.validate()?;

        if !self.riders.resolve_rider(&rider_id).await? {
            tracing::info!("rider could not be resolved, rejecting ride request");
            return Err(Error::invalid_request_error("unknown rider"));
        }

        let id = self.next_ride_id.fetch_add(1, Ordering::SeqCst) + 1;
        let ride = Ride::new(id, rider_id, pickup, dropoff);

        self.rides.put(ride.clone()).await?;

        tracing::info!(ride_id = id, "created ride");

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn find_ride(&self, id: RideId) -> Result<Ride, Error> {
        self.fetch_ride(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_rides(&self) -> Result<Vec<Ride>, Error> {
        self.rides.all().await
    }

    #[tracing::instrument(skip(self))]
    async fn assign_driver(&self, id: RideId) -> Result<Option<String>, Error> {
        let (_guard, mut ride) = self.fetch_ride_for_update(id).await?;

        if let Some(driver_id) = &ride.driver_id {
            tracing::info!(%driver_id, "ride already has a driver, returning it");
            return Ok(Some(driver_id.clone()));
        }

        if !ride.is_pending() {
            return Err(Error::invalid_transition_error());
        }

        let mut engagements = self.engagements.lock().await;

        let driver_id = match self.drivers.take_available_driver().await? {
            Some(driver_id) => driver_id,
            None => {
                tracing::warn!("no drivers available, ride stays pending");
                return Ok(None);
            }
        };

        let assigned = ride.assign_driver(driver_id.clone());
        let stored = match assigned {
            Ok(()) => self.rides.put(ride).await,
            Err(err) => Err(err),
        };

        if let Err(err) = stored {
            tracing::warn!(%driver_id, "failed to store assignment, returning driver to the pool");
            self.drivers.release_driver(driver_id).await?;
            return Err(err);
        }

        engagements.insert(driver_id.clone(), id);

        tracing::info!(%driver_id, "assigned driver to ride");

        Ok(Some(driver_id))
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(&self, id: RideId, status: &str) -> Result<Ride, Error> {
        let (_guard, mut ride) = self.fetch_ride_for_update(id).await?;

        let next: RideStatus = status.parse()?;
        let previous = ride.status;

        ride.transition(next)?;
        self.rides.put(ride.clone()).await?;

        tracing::info!(%previous, %next, "updated ride status");

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn release_driver(&self, id: RideId) -> Result<String, Error> {
        let (_guard, ride) = self.fetch_ride_for_update(id).await?;

        if !ride.is_terminal() {
            return Err(Error::invalid_state_error(
                "drivers are released only after the ride has ended",
            ));
        }

        let driver_id = ride
            .driver_id
            .ok_or_else(|| Error::invalid_state_error("ride has no driver"))?;

        let mut engagements = self.engagements.lock().await;

        match engagements.get(&driver_id).copied() {
            Some(engaged_ride) if engaged_ride != id => {
                return Err(Error::invalid_state_error(
                    "driver is engaged on another ride",
                ));
            }
            Some(_) => {
                engagements.remove(&driver_id);
            }
            None => tracing::info!(%driver_id, "driver was already released"),
        }

        self.drivers.release_driver(driver_id.clone()).await?;

        tracing::info!(%driver_id, "released driver back to the pool");

        Ok(driver_id)
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_stale_rides(&self, max_age: Duration) -> Result<Vec<RideId>, Error> {
        self.cancel_pending_before(Utc::now() - max_age).await
    }
}

impl Engine {
    pub(crate) async fn cancel_pending_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<RideId>, Error> {
        let candidates: Vec<RideId> = self
            .rides
            .all()
            .await?
            .into_iter()
            .filter(|ride| ride.is_pending() && ride.created_at < cutoff)
            .map(|ride| ride.id)
            .collect();

        let mut cancelled = vec![];

        for id in candidates {
            let (_guard, mut ride) = self.fetch_ride_for_update(id).await?;

            // assignment may have won the race since the scan
            if !ride.is_pending() {
                continue;
            }

            ride.transition(RideStatus::Cancelled)?;
            self.rides.put(ride).await?;

            cancelled.push(id);
        }

        if !cancelled.is_empty() {
            tracing::warn!(?cancelled, "cancelled rides that waited too long for a driver");
        }

        Ok(cancelled)
    }
}
