use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PaymentAPI,
    entities::{Fare, Payment, PaymentKind, RideId},
    error::Error,
};

// The gateway is simulated: every charge and payout succeeds once recorded.
#[async_trait]
impl PaymentAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn calculate_fare(
        &self,
        ride_id: RideId,
        distance_km: f64,
        duration_minutes: f64,
    ) -> Result<Fare, Error> {
        self.fetch_completed_ride(ride_id).await?;
        let (_guard, _) = self.fetch_ride_for_update(ride_id).await?;

        if self
            .payments
            .payment(ride_id, PaymentKind::Charge)
            .await?
            .is_some()
        {
            return Err(Error::invalid_state_error("ride has already been charged"));
        }

        let fare = Fare::calculate(ride_id, distance_km, duration_minutes)?;
        self.payments.put_fare(fare.clone()).await?;

        tracing::info!(amount = fare.amount, "calculated fare");

        Ok(fare)
    }

    #[tracing::instrument(skip(self))]
    async fn process_payment(&self, ride_id: RideId) -> Result<Payment, Error> {
        let ride = self.fetch_completed_ride(ride_id).await?;
        let (_guard, _) = self.fetch_ride_for_update(ride_id).await?;

        if let Some(charge) = self.payments.payment(ride_id, PaymentKind::Charge).await? {
            return Ok(charge);
        }

        let fare = self
            .payments
            .fare(ride_id)
            .await?
            .ok_or_else(|| Error::invalid_state_error("fare has not been calculated"))?;

        let charge = Payment::new(ride_id, PaymentKind::Charge, ride.rider_id, fare.amount);
        self.payments.put_payment(charge.clone()).await?;

        tracing::info!(
            rider_id = %charge.party_id,
            amount = charge.amount,
            "charged rider"
        );

        Ok(charge)
    }

    #[tracing::instrument(skip(self))]
    async fn payout_driver(&self, ride_id: RideId) -> Result<Payment, Error> {
        let ride = self.fetch_completed_ride(ride_id).await?;
        let (_guard, _) = self.fetch_ride_for_update(ride_id).await?;

        if let Some(payout) = self.payments.payment(ride_id, PaymentKind::Payout).await? {
            return Ok(payout);
        }

        let charge = self
            .payments
            .payment(ride_id, PaymentKind::Charge)
            .await?
            .ok_or_else(|| Error::invalid_state_error("rider has not been charged"))?;

        // a completed ride has always been through DRIVER_ASSIGNED
        let driver_id = ride.driver_id.ok_or_else(Error::unexpected_error)?;

        let payout = Payment::new(ride_id, PaymentKind::Payout, driver_id, charge.amount);
        self.payments.put_payment(payout.clone()).await?;

        tracing::info!(
            driver_id = %payout.party_id,
            amount = payout.amount,
            "paid out driver"
        );

        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RideAPI, RiderAPI};
    use crate::engine::Stores;
    use crate::entities::Location;
    use tokio_test::block_on;

    async fn completed_ride(engine: &Engine) -> RideId {
        engine
            .register_rider("r1".into(), "Ada".into(), "555-0100".into(), "card".into())
            .await
            .unwrap();

        let ride = engine
            .create_ride("r1".into(), Location::address("A"), Location::address("B"))
            .await
            .unwrap();

        engine.assign_driver(ride.id).await.unwrap();
        engine.update_status(ride.id, "IN_PROGRESS").await.unwrap();
        engine.update_status(ride.id, "COMPLETED").await.unwrap();

        ride.id
    }

    #[test]
    fn fare_charge_and_payout_flow() {
        let engine = Engine::new(Stores::with_drivers(["d1"]));

        block_on(async {
            let ride_id = completed_ride(&engine).await;

            let fare = engine.calculate_fare(ride_id, 10.0, 20.0).await.unwrap();
            assert_eq!(fare.amount, 19.5);

            let charge = engine.process_payment(ride_id).await.unwrap();
            assert_eq!(charge.kind, PaymentKind::Charge);
            assert_eq!(charge.party_id, "r1");
            assert_eq!(charge.amount, 19.5);

            // charging again replays the original transaction
            assert_eq!(engine.process_payment(ride_id).await.unwrap(), charge);

            let payout = engine.payout_driver(ride_id).await.unwrap();
            assert_eq!(payout.kind, PaymentKind::Payout);
            assert_eq!(payout.party_id, "d1");
            assert_eq!(payout.amount, 19.5);
            assert_ne!(payout.transaction_id, charge.transaction_id);

            let err = engine.calculate_fare(ride_id, 1.0, 1.0).await.unwrap_err();
            assert!(err.is_invalid_state_error());
        });
    }

    #[test]
    fn payments_wait_for_completion_and_ordering() {
        let engine = Engine::new(Stores::with_drivers(["d1"]));

        block_on(async {
            engine
                .register_rider("r1".into(), "Ada".into(), "555-0100".into(), "card".into())
                .await
                .unwrap();
            let ride = engine
                .create_ride("r1".into(), Location::address("A"), Location::address("B"))
                .await
                .unwrap();

            let err = engine.calculate_fare(ride.id, 3.0, 4.0).await.unwrap_err();
            assert!(err.is_invalid_state_error());

            engine.assign_driver(ride.id).await.unwrap();
            engine.update_status(ride.id, "IN_PROGRESS").await.unwrap();
            engine.update_status(ride.id, "COMPLETED").await.unwrap();

            assert!(engine.process_payment(ride.id).await.unwrap_err().is_invalid_state_error());
            assert!(engine.payout_driver(ride.id).await.unwrap_err().is_invalid_state_error());

            let err = engine.calculate_fare(ride.id, -3.0, 4.0).await.unwrap_err();
            assert!(err.is_invalid_request_error());

            assert!(engine.calculate_fare(99, 1.0, 1.0).await.unwrap_err().is_ride_not_found_error());
        });
    }
}
