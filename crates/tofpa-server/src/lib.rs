//! Shared library surface for the surface service and its tests.

pub mod api;
pub mod config;
pub mod state;
