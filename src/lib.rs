//! railrider - closed-loop track traversal for a rider-camera rig.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **rig**: Orientation/pose primitives (Rotator, Pose, ViewPoint)
//! - **track**: Track graph, chord-subdivision sampler, loop ordering
//! - **ride**: Step-driven ride controller and configuration
//!
//! # Usage
//!
//! ```ignore
//! use railrider::{RideConfig, RideController, TrackGraph};
//!
//! let mut controller = RideController::new(RideConfig::default());
//! controller.on_possess(&track, &evaluator, rider_position);
//! // once per simulation step:
//! controller.advance(&track, &evaluator, &head, &mut sink, delta_time);
//! ```
//!
//! The host supplies the curve geometry, head-tracking device, and pose
//! outputs through the `CurveEvaluator`, `HeadTrackingSource`, and `RigSink`
//! traits; the controller keeps no engine state of its own.

pub mod ride;
pub mod rig;
pub mod track;

// Re-export commonly used types at crate root
pub use ride::{HeadTrackingSource, RideConfig, RideController, RigSink};
pub use rig::{Pose, Rotator, ViewPoint};
pub use track::{build_ordered_track, CurveEvaluator, OrderedTrack, TrackGraph, TrackOrderError};
