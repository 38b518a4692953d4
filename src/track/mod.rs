//! Track data model, arc-length sampling, and closed-loop ordering.
//!
//! A [`TrackGraph`] is a snapshot of an externally owned track: directed
//! curve segments joined at control points. Curve geometry stays behind the
//! [`CurveEvaluator`] collaborator; this module only reasons about
//! connectivity and arc length.

mod graph;
mod order;
mod sampler;

pub use graph::{
    ConnectedSegment, Connection, ControlPoint, ControlPointId, CurveEvaluator, CurveSegment,
    SegmentId, Socket, TrackGraph,
};
pub use order::{build_ordered_track, OrderedTrack, TrackOrderError};
pub use sampler::{
    approx_arc_length, parameter_for_distance, segment_arc_length, DEFAULT_SECTIONS,
};
