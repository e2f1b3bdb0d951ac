use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Rating, RideId};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct RateParams {
    rating: f64,
    review: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct Average {
    id: String,
    average_rating: Option<f64>,
}

pub async fn rate_driver(
    Extension(api): Extension<DynAPI>,
    Path(ride_id): Path<RideId>,
    Json(params): Json<RateParams>,
) -> Result<Json<Rating>, Error> {
    let rating = api
        .rate_driver(ride_id, params.rating, params.review)
        .await?;

    Ok(rating.into())
}

pub async fn rate_rider(
    Extension(api): Extension<DynAPI>,
    Path(ride_id): Path<RideId>,
    Json(params): Json<RateParams>,
) -> Result<Json<Rating>, Error> {
    let rating = api.rate_rider(ride_id, params.rating, params.review).await?;

    Ok(rating.into())
}

pub async fn driver_average(
    Extension(api): Extension<DynAPI>,
    Path(driver_id): Path<String>,
) -> Result<Json<Average>, Error> {
    let average_rating = api.driver_rating(driver_id.clone()).await?;

    Ok(Average {
        id: driver_id,
        average_rating,
    }
    .into())
}

pub async fn rider_average(
    Extension(api): Extension<DynAPI>,
    Path(rider_id): Path<String>,
) -> Result<Json<Average>, Error> {
    let average_rating = api.rider_rating(rider_id.clone()).await?;

    Ok(Average {
        id: rider_id,
        average_rating,
    }
    .into())
}
