use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Fare, Payment, RideId};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct FareParams {
    distance_km: f64,
    duration_minutes: f64,
}

pub async fn calculate_fare(
    Extension(api): Extension<DynAPI>,
    Path(ride_id): Path<RideId>,
    Json(params): Json<FareParams>,
) -> Result<Json<Fare>, Error> {
    let fare = api
        .calculate_fare(ride_id, params.distance_km, params.duration_minutes)
        .await?;

    Ok(fare.into())
}

pub async fn charge(
    Extension(api): Extension<DynAPI>,
    Path(ride_id): Path<RideId>,
) -> Result<Json<Payment>, Error> {
    let payment = api.process_payment(ride_id).await?;

    Ok(payment.into())
}

pub async fn payout(
    Extension(api): Extension<DynAPI>,
    Path(ride_id): Path<RideId>,
) -> Result<Json<Payment>, Error> {
    let payment = api.payout_driver(ride_id).await?;

    Ok(payment.into())
}
