use std::sync::Arc;

use rideshare::api::DynAPI;
use rideshare::config::Config;
use rideshare::engine::{Engine, Stores};
use rideshare::error::Error;
use rideshare::{server, sweeper};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    tracing::info!(drivers = config.drivers.len(), "seeding driver pool");

    let engine = Arc::new(Engine::new(Stores::with_drivers(config.drivers.clone())));

    if let Some(timeout) = config.pending_timeout {
        tokio::spawn(sweeper::run(engine.clone(), timeout, config.sweep_interval));
    }

    server::serve(engine as DynAPI, config.addr()).await
}
