use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Driver, Vehicle};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    id: String,
    name: String,
    license_number: String,
    vehicle: Vehicle,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Driver>, Error> {
    let driver = api
        .register_driver(params.id, params.name, params.license_number, params.vehicle)
        .await?;

    Ok(driver.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Driver>, Error> {
    let driver = api.find_driver(id).await?;

    Ok(driver.into())
}

pub async fn update_vehicle(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    Json(vehicle): Json<Vehicle>,
) -> Result<Json<Driver>, Error> {
    let driver = api.update_vehicle(id, vehicle).await?;

    Ok(driver.into())
}

pub async fn available(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<String>>, Error> {
    let drivers = api.available_drivers().await?;

    Ok(drivers.into())
}
