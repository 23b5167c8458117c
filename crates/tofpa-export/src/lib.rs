//! Export of takeoff climb surfaces as a single KML placemark, optionally zipped as KMZ.

pub mod error;
pub mod kml;
pub mod kmz;

pub use error::{ExportError, Result};
pub use kml::{Placemark, PlacemarkStyle};
pub use kmz::{to_kmz, write_kmz, KMZ_CONTENT_TYPE};
