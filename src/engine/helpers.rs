use super::Engine;

use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;

use crate::{
    entities::{Ride, RideId, RideStatus},
    error::Error,
};

pub(super) type RideGuard = OwnedMutexGuard<()>;

impl Engine {
    #[tracing::instrument(skip(self))]
    pub(super) async fn fetch_ride(&self, id: RideId) -> Result<Ride, Error> {
        self.rides
            .get(id)
            .await?
            .ok_or_else(Error::ride_not_found_error)
    }

    /// Returns the ride together with its exclusive lock. The ride is read after
    /// the lock is taken, so callers always see the latest committed state.
    #[tracing::instrument(skip(self))]
    pub(super) async fn fetch_ride_for_update(
        &self,
        id: RideId,
    ) -> Result<(RideGuard, Ride), Error> {
        // rides are never deleted, so a lock is only ever created for a known id
        self.fetch_ride(id).await?;

        let lock = {
            let mut locks = self
                .ride_locks
                .lock()
                .map_err(|_| Error::unexpected_error())?;
            Arc::clone(locks.entry(id).or_default())
        };

        let guard = lock.lock_owned().await;
        let ride = self.fetch_ride(id).await?;

        Ok((guard, ride))
    }

    pub(super) async fn fetch_completed_ride(&self, id: RideId) -> Result<Ride, Error> {
        let ride = self.fetch_ride(id).await?;

        if ride.status != RideStatus::Completed {
            return Err(Error::invalid_state_error("ride has not been completed"));
        }

        Ok(ride)
    }
}
