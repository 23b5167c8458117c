//! In-memory layer store using DashMap.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tofpa_core::{LocalFrame, Point2D, Point3D, Surface};
use uuid::Uuid;

use crate::config::Config;

/// Geographic position of a planar anchor, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoOrigin {
    pub lat: f64,
    pub lon: f64,
}

impl GeoOrigin {
    pub fn is_valid(&self) -> bool {
        LocalFrame::checked_anchored(self.lat, self.lon, Point2D::new(0.0, 0.0)).is_ok()
    }
}

/// A computed surface kept under a layer name, like a memory layer in a map project.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceLayer {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub runway_length_m: f64,
    pub runway_slope: f64,
    /// Geographic position of the threshold, when the caller supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<GeoOrigin>,
    pub surface: Surface,
    pub back_azimuth: f64,
    /// Closed polygon ring, first vertex repeated last.
    pub ring: Vec<Point3D>,
    #[serde(skip)]
    pub(crate) sequence: u64,
}

/// Application state - thread-safe store of generated layers.
pub struct AppState {
    config: Config,
    layers: DashMap<Uuid, SurfaceLayer>,
    sequence: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            layers: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Next insertion sequence number.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst)
    }

    /// Store a layer, evicting the oldest ones beyond the configured limit.
    pub fn insert_layer(&self, layer: SurfaceLayer) {
        self.layers.insert(layer.id, layer);

        while self.layers.len() > self.config.max_layers {
            let oldest = self
                .layers
                .iter()
                .min_by_key(|entry| entry.sequence)
                .map(|entry| *entry.key());
            match oldest {
                Some(id) => {
                    self.layers.remove(&id);
                    tracing::debug!(%id, "evicted oldest surface layer");
                }
                None => break,
            }
        }
    }

    pub fn get_layer(&self, id: &Uuid) -> Option<SurfaceLayer> {
        self.layers.get(id).map(|entry| entry.value().clone())
    }

    /// All layers, oldest first.
    pub fn list_layers(&self) -> Vec<SurfaceLayer> {
        let mut layers: Vec<SurfaceLayer> =
            self.layers.iter().map(|entry| entry.value().clone()).collect();
        layers.sort_by_key(|layer| layer.sequence);
        layers
    }

    pub fn remove_layer(&self, id: &Uuid) -> bool {
        self.layers.remove(id).is_some()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tofpa_core::{generate, SurfaceParameters, ThresholdPoint};

    fn layer(state: &AppState, name: &str) -> SurfaceLayer {
        let surface = generate(
            &ThresholdPoint::new(0.0, 0.0),
            &SurfaceParameters::default(),
            0.0,
        )
        .unwrap();
        SurfaceLayer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
            runway_length_m: 1000.0,
            runway_slope: 0.0,
            origin: None,
            back_azimuth: surface.back_azimuth(),
            ring: surface.closed_ring(),
            surface,
            sequence: state.next_sequence(),
        }
    }

    #[test]
    fn evicts_oldest_when_full() {
        let config = Config {
            max_layers: 2,
            ..Config::default()
        };
        let state = AppState::new(config);
        let first = layer(&state, "first");
        let first_id = first.id;
        state.insert_layer(first);
        state.insert_layer(layer(&state, "second"));
        state.insert_layer(layer(&state, "third"));

        assert_eq!(state.layer_count(), 2);
        assert!(state.get_layer(&first_id).is_none());
        let names: Vec<String> = state.list_layers().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["second", "third"]);
    }

    #[test]
    fn origin_range_check() {
        assert!(GeoOrigin { lat: 47.46, lon: -122.31 }.is_valid());
        assert!(!GeoOrigin { lat: 95.0, lon: 0.0 }.is_valid());
        assert!(!GeoOrigin { lat: 0.0, lon: f64::NAN }.is_valid());
    }

    #[test]
    fn remove_reports_missing() {
        let state = AppState::new(Config::default());
        let l = layer(&state, "only");
        let id = l.id;
        state.insert_layer(l);
        assert!(state.remove_layer(&id));
        assert!(!state.remove_layer(&id));
    }
}
