//! The step-driven ride controller and its configuration surface.

mod config;
mod controller;

pub use config::{RideConfig, RideOverrides, DEFAULT_RIDE_SPEED};
pub use controller::{HeadTrackingSource, RideController, RigSink, SEAT_HEIGHT};
