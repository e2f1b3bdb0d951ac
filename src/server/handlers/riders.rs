use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::Rider;
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    id: String,
    name: String,
    phone_number: String,
    payment_method: String,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Rider>, Error> {
    let rider = api
        .register_rider(
            params.id,
            params.name,
            params.phone_number,
            params.payment_method,
        )
        .await?;

    Ok(rider.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Rider>, Error> {
    let rider = api.find_rider(id).await?;

    Ok(rider.into())
}
