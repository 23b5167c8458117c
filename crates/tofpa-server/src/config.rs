//! Server configuration from environment.

use std::env;

use crate::state::GeoOrigin;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Geographic position used for KMZ export when neither the layer nor the request gives one.
    pub default_origin: Option<GeoOrigin>,
    /// Oldest layers are dropped once this many are stored.
    pub max_layers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_origin: None,
            max_layers: 256,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let origin_lat = parse_env::<f64>("TOFPA_ORIGIN_LAT");
        let origin_lon = parse_env::<f64>("TOFPA_ORIGIN_LON");
        Self {
            server_port: parse_env("TOFPA_PORT").unwrap_or(defaults.server_port),
            default_origin: origin_lat
                .zip(origin_lon)
                .map(|(lat, lon)| GeoOrigin { lat, lon })
                .filter(|origin| {
                    let valid = origin.is_valid();
                    if !valid {
                        tracing::warn!("Ignoring out-of-range TOFPA_ORIGIN_LAT/LON {:?}", origin);
                    }
                    valid
                }),
            max_layers: parse_env("TOFPA_MAX_LAYERS")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_layers),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
