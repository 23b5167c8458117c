pub mod store;

pub use store::{AppState, GeoOrigin, SurfaceLayer};
