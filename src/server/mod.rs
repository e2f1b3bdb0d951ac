mod handlers;

use std::net::SocketAddr;

use axum::{
    extract::Extension,
    routing::{get, patch, post, put},
    Router,
};

use crate::api::DynAPI;
use crate::error::Error;
use crate::server::handlers::{drivers, payments, ratings, riders, rides};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/riders", post(riders::create))
        .route("/riders/:id", get(riders::find))
        .route("/drivers", post(drivers::create))
        .route("/drivers/available", get(drivers::available))
        .route("/drivers/:id", get(drivers::find))
        .route("/drivers/:id/vehicle", put(drivers::update_vehicle))
        .route("/rides", post(rides::create).get(rides::list))
        .route("/rides/:id", get(rides::find))
        .route("/rides/:id/driver/assign", patch(rides::assign_driver))
        .route("/rides/:id/driver/release", patch(rides::release_driver))
        .route("/rides/:id/status", put(rides::update_status))
        .route("/payments/:ride_id/fare", post(payments::calculate_fare))
        .route("/payments/:ride_id/charge", post(payments::charge))
        .route("/payments/:ride_id/payout", post(payments::payout))
        .route("/ratings/driver/:ride_id", post(ratings::rate_driver))
        .route("/ratings/rider/:ride_id", post(ratings::rate_rider))
        .route("/ratings/drivers/:driver_id", get(ratings::driver_average))
        .route("/ratings/riders/:rider_id", get(ratings::rider_average))
        .layer(Extension(api))
}

pub async fn serve(api: DynAPI, addr: SocketAddr) -> Result<(), Error> {
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(%err, "server stopped");
            Error::unexpected_error()
        })
}
