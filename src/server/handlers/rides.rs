use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Location, Ride, RideId};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    rider_id: String,
    pickup: Location,
    dropoff: Location,
}

#[derive(Serialize, Deserialize)]
pub struct UpdateStatusParams {
    status: String,
}

#[derive(Serialize, Deserialize)]
pub struct Assignment {
    ride_id: RideId,
    driver_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct Release {
    ride_id: RideId,
    driver_id: String,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Ride>, Error> {
    let ride = api
        .create_ride(params.rider_id, params.pickup, params.dropoff)
        .await?;

    Ok(ride.into())
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Ride>>, Error> {
    let rides = api.list_rides().await?;

    Ok(rides.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<RideId>,
) -> Result<Json<Ride>, Error> {
    let ride = api.find_ride(id).await?;

    Ok(ride.into())
}

pub async fn assign_driver(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<RideId>,
) -> Result<Json<Assignment>, Error> {
    let driver_id = api.assign_driver(id).await?;

    Ok(Assignment {
        ride_id: id,
        driver_id,
    }
    .into())
}

pub async fn release_driver(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<RideId>,
) -> Result<Json<Release>, Error> {
    let driver_id = api.release_driver(id).await?;

    Ok(Release {
        ride_id: id,
        driver_id,
    }
    .into())
}

pub async fn update_status(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<RideId>,
    Json(params): Json<UpdateStatusParams>,
) -> Result<Json<Ride>, Error> {
    let ride = api.update_status(id, &params.status).await?;

    Ok(ride.into())
}
