//! TOFPA CLI - command line front end for the surface generator.
//!
//! Parameters come from flags, a JSON request file, or both (flags win).

pub mod args;
pub mod request;

pub use args::Args;
pub use request::{SurfaceReport, SurfaceRequest};
