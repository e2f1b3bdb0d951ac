use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::Duration;

use crate::error::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub drivers: Vec<String>,
    pub pending_timeout: Option<Duration>,
    pub sweep_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            drivers: vec![],
            pending_timeout: None,
            sweep_interval: Duration::seconds(30),
        }
    }
}

impl Config {
    /// Reads `RIDESHARE_*` variables, falling back to defaults for unset ones.
    /// A variable holding non-Unicode bytes is a config error, not a silent default.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(err) => Err(err),
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<Option<String>, env::VarError>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("RIDESHARE_HOST")? {
            config.host = host
                .parse()
                .map_err(|_| Error::config_error("RIDESHARE_HOST is not an IP address"))?;
        }

        if let Some(port) = lookup("RIDESHARE_PORT")? {
            config.port = port.parse()?;
        }

        if let Some(drivers) = lookup("RIDESHARE_DRIVERS")? {
            config.drivers = drivers
                .split(',')
                .map(str::trim)
                .filter(|driver_id| !driver_id.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(secs) = lookup("RIDESHARE_PENDING_TIMEOUT_SECS")? {
            let secs: u32 = secs.parse()?;
            config.pending_timeout = Some(Duration::seconds(secs.into()));
        }

        if let Some(secs) = lookup("RIDESHARE_SWEEP_INTERVAL_SECS")? {
            let secs: u32 = secs.parse()?;
            if secs == 0 {
                return Err(Error::config_error("RIDESHARE_SWEEP_INTERVAL_SECS must be positive"));
            }
            config.sweep_interval = Duration::seconds(secs.into());
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
