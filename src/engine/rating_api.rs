use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RatingAPI,
    entities::{Rating, RatingSubject, RideId},
    error::Error,
};

#[async_trait]
impl RatingAPI for Engine {
    #[tracing::instrument(skip(self, review))]
    async fn rate_driver(
        &self,
        ride_id: RideId,
        score: f64,
        review: Option<String>,
    ) -> Result<Rating, Error> {
        self.rate(ride_id, RatingSubject::Driver, score, review).await
    }

    #[tracing::instrument(skip(self, review))]
    async fn rate_rider(
        &self,
        ride_id: RideId,
        score: f64,
        review: Option<String>,
    ) -> Result<Rating, Error> {
        self.rate(ride_id, RatingSubject::Rider, score, review).await
    }

    #[tracing::instrument(skip(self))]
    async fn driver_rating(&self, driver_id: String) -> Result<Option<f64>, Error> {
        self.ratings.average(RatingSubject::Driver, &driver_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn rider_rating(&self, rider_id: String) -> Result<Option<f64>, Error> {
        self.ratings.average(RatingSubject::Rider, &rider_id).await
    }
}

impl Engine {
    async fn rate(
        &self,
        ride_id: RideId,
        subject: RatingSubject,
        score: f64,
        review: Option<String>,
    ) -> Result<Rating, Error> {
        let ride = self.fetch_completed_ride(ride_id).await?;

        let subject_id = match subject {
            RatingSubject::Driver => ride.driver_id.ok_or_else(Error::unexpected_error)?,
            RatingSubject::Rider => ride.rider_id,
        };

        let rating = Rating::new(ride_id, subject, subject_id, score, review)?;

        if !self.ratings.insert(rating.clone()).await? {
            return Err(Error::invalid_request_error("ride has already been rated"));
        }

        tracing::info!(subject_id = %rating.subject_id, score, "recorded rating");

        Ok(rating)
    }
}

#[test]
fn ratings_follow_completed_rides() {
    use crate::api::{RideAPI, RiderAPI};
    use crate::engine::Stores;
    use crate::entities::Location;
    use tokio_test::block_on;

    let engine = Engine::new(Stores::with_drivers(["d1"]));

    block_on(async {
        engine
            .register_rider("r1".into(), "Ada".into(), "555-0100".into(), "card".into())
            .await
            .unwrap();

        let mut rides = vec![];
        for _ in 0..2 {
            let ride = engine
                .create_ride("r1".into(), Location::address("A"), Location::address("B"))
                .await
                .unwrap();
            rides.push(ride.id);
        }

        let err = engine.rate_driver(rides[0], 5.0, None).await.unwrap_err();
        assert!(err.is_invalid_state_error());

        for &id in &rides {
            engine.assign_driver(id).await.unwrap();
            engine.update_status(id, "IN_PROGRESS").await.unwrap();
            engine.update_status(id, "COMPLETED").await.unwrap();
            engine.release_driver(id).await.unwrap();
        }

        let rating = engine
            .rate_driver(rides[0], 5.0, Some("smooth ride".into()))
            .await
            .unwrap();
        assert_eq!(rating.subject_id, "d1");

        engine.rate_driver(rides[1], 4.0, None).await.unwrap();
        engine.rate_rider(rides[1], 3.0, None).await.unwrap();

        let again = engine.rate_driver(rides[1], 1.0, None).await.unwrap_err();
        assert!(again.is_invalid_request_error());

        let out_of_range = engine.rate_rider(rides[0], 6.0, None).await.unwrap_err();
        assert!(out_of_range.is_invalid_request_error());

        assert_eq!(engine.driver_rating("d1".into()).await.unwrap(), Some(4.5));
        assert_eq!(engine.rider_rating("r1".into()).await.unwrap(), Some(3.0));
        assert_eq!(engine.rider_rating("r2".into()).await.unwrap(), None);
    });
}
