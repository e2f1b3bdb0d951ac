use async_trait::async_trait;

use super::Engine;

use crate::{api::RiderAPI, entities::Rider, error::Error};

#[async_trait]
impl RiderAPI for Engine {
    #[tracing::instrument(skip(self, phone_number, payment_method))]
    async fn register_rider(
        &self,
        id: String,
        name: String,
        phone_number: String,
        payment_method: String,
    ) -> Result<Rider, Error> {
        let rider = Rider::new(id, name, phone_number, payment_method)?;

        if !self.riders.insert_rider(rider.clone()).await? {
            return Err(Error::invalid_request_error("rider already exists"));
        }

        tracing::info!("rider created");

        Ok(rider)
    }

    #[tracing::instrument(skip(self))]
    async fn find_rider(&self, id: String) -> Result<Rider, Error> {
        self.riders
            .find_rider(&id)
            .await?
            .ok_or_else(|| Error::invalid_request_error("rider not found"))
    }
}

#[test]
fn register_and_find_rider() {
    use crate::engine::Stores;
    use tokio_test::block_on;

    let engine = Engine::new(Stores::in_memory());

    block_on(async {
        let rider = engine
            .register_rider("r1".into(), "Ada".into(), "555-0100".into(), "card".into())
            .await
            .unwrap();

        assert_eq!(engine.find_rider("r1".into()).await.unwrap(), rider);

        let duplicate = engine
            .register_rider("r1".into(), "Bob".into(), "555-0101".into(), "cash".into())
            .await;
        assert!(duplicate.unwrap_err().is_invalid_request_error());

        let incomplete = engine
            .register_rider("r2".into(), "".into(), "555-0102".into(), "card".into())
            .await;
        assert!(incomplete.unwrap_err().is_invalid_request_error());

        assert!(engine.find_rider("r2".into()).await.is_err());
    });
}
