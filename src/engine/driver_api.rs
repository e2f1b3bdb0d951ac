use super::Engine;

use async_trait::async_trait;

use crate::{
    api::DriverAPI,
    entities::{Driver, Vehicle},
    error::Error,
};

#[async_trait]
impl DriverAPI for Engine {
    #[tracing::instrument(skip(self, license_number, vehicle))]
    async fn register_driver(
        &self,
        id: String,
        name: String,
        license_number: String,
        vehicle: Vehicle,
    ) -> Result<Driver, Error> {
        let driver = Driver::new(id, name, license_number, vehicle)?;

        let engagements = self.engagements.lock().await;

        if let Some(ride_id) = engagements.get(&driver.id) {
            tracing::info!(ride_id, "driver is still engaged, refusing to pool it again");
            return Err(Error::invalid_request_error(
                "driver is engaged on an active ride",
            ));
        }

        if !self.driver_profiles.insert_driver(driver.clone()).await? {
            return Err(Error::invalid_request_error("driver already exists"));
        }

        self.drivers.add_driver(driver.id.clone()).await?;

        tracing::info!("driver created and made available");

        Ok(driver)
    }

    #[tracing::instrument(skip(self))]
    async fn find_driver(&self, id: String) -> Result<Driver, Error> {
        self.driver_profiles
            .find_driver(&id)
            .await?
            .ok_or_else(Error::driver_not_found_error)
    }

    #[tracing::instrument(skip(self))]
    async fn update_vehicle(&self, id: String, vehicle: Vehicle) -> Result<Driver, Error> {
        let mut driver = self.find_driver(id).await?;

        driver.update_vehicle(vehicle)?;
        self.driver_profiles.put_driver(driver.clone()).await?;

        tracing::info!("updated vehicle details");

        Ok(driver)
    }

    #[tracing::instrument(skip(self))]
    async fn available_drivers(&self) -> Result<Vec<String>, Error> {
        self.drivers.available().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RideAPI, RiderAPI};
    use crate::engine::Stores;
    use crate::entities::Location;
    use tokio_test::block_on;

    fn sedan() -> Vehicle {
        Vehicle {
            make: "Toyota".into(),
            model: "Corolla".into(),
            year: 2019,
        }
    }

    async fn sign_up(engine: &Engine, id: &str) -> Result<Driver, Error> {
        engine
            .register_driver(id.into(), "Grace".into(), format!("LIC-{}", id), sedan())
            .await
    }

    #[test]
    fn registration_stores_the_profile_and_pools_the_driver() {
        let engine = Engine::new(Stores::in_memory());

        block_on(async {
            let d1 = sign_up(&engine, "d1").await.unwrap();
            sign_up(&engine, "d2").await.unwrap();

            assert_eq!(engine.find_driver("d1".into()).await.unwrap(), d1);
            assert_eq!(engine.available_drivers().await.unwrap(), vec!["d1", "d2"]);

            let duplicate = sign_up(&engine, "d1").await.unwrap_err();
            assert!(duplicate.is_invalid_request_error());
            assert_eq!(engine.available_drivers().await.unwrap(), vec!["d1", "d2"]);
        });
    }

    #[test]
    fn invalid_profiles_are_rejected_and_not_pooled() {
        let engine = Engine::new(Stores::in_memory());

        block_on(async {
            assert!(sign_up(&engine, " ").await.unwrap_err().is_invalid_request_error());

            let unlicensed = engine
                .register_driver("d1".into(), "Grace".into(), "".into(), sedan())
                .await;
            assert!(unlicensed.unwrap_err().is_invalid_request_error());

            let no_model = Vehicle {
                model: "".into(),
                ..sedan()
            };
            let err = engine
                .register_driver("d1".into(), "Grace".into(), "LIC-1".into(), no_model)
                .await
                .unwrap_err();
            assert!(err.is_invalid_request_error());

            assert!(engine.available_drivers().await.unwrap().is_empty());
            assert!(engine
                .find_driver("d1".into())
                .await
                .unwrap_err()
                .is_driver_not_found_error());
        });
    }

    #[test]
    fn update_vehicle_replaces_details_of_known_drivers_only() {
        let engine = Engine::new(Stores::in_memory());
        let van = Vehicle {
            make: "Ford".into(),
            model: "Transit".into(),
            year: 2022,
        };

        block_on(async {
            let err = engine
                .update_vehicle("ghost".into(), van.clone())
                .await
                .unwrap_err();
            assert!(err.is_driver_not_found_error());

            sign_up(&engine, "d1").await.unwrap();

            let updated = engine.update_vehicle("d1".into(), van.clone()).await.unwrap();
            assert_eq!(updated.vehicle, van);
            assert_eq!(engine.find_driver("d1".into()).await.unwrap().vehicle, van);

            let bogus = Vehicle { year: 1800, ..van.clone() };
            let err = engine.update_vehicle("d1".into(), bogus).await.unwrap_err();
            assert!(err.is_invalid_request_error());
            assert_eq!(engine.find_driver("d1".into()).await.unwrap().vehicle, van);
        });
    }

    #[test]
    fn engaged_driver_cannot_be_registered() {
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
            engine.assign_driver(ride.id).await.unwrap();

            let err = sign_up(&engine, "d1").await.unwrap_err();
            assert!(err.is_invalid_request_error());
            assert!(engine.available_drivers().await.unwrap().is_empty());
            assert!(engine.find_driver("d1".into()).await.is_err());
        });
    }
}
