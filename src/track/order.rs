use glam::Vec3;
use thiserror::Error;

use super::graph::{ControlPointId, SegmentId, TrackGraph};

/// Why a track graph failed to order into a single closed loop.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackOrderError {
    #[error("track has no control points")]
    NoControlPoints,
    #[error("dead end at control point {0:?}: no segment leads onward")]
    DeadEnd(ControlPointId),
    #[error("segment {0:?} has an unbound far connection")]
    OpenConnection(SegmentId),
    #[error("loop closed after {walked} segments but the track has {total}")]
    Disconnected { walked: usize, total: usize },
    #[error("walk exceeded {total} segments without returning to its start")]
    NeverCloses { total: usize },
}

/// A single closed cyclic traversal order over a track graph.
///
/// Consecutive entries (cyclically) share a control point, and every segment
/// of the source graph appears exactly once. Built once per possession and
/// discarded on unpossession.
#[derive(Debug, Clone)]
pub struct OrderedTrack {
    segments: Vec<SegmentId>,
    start: ControlPointId,
}

impl OrderedTrack {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> SegmentId {
        self.segments[index]
    }

    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    /// The control point the walk was anchored at; the ride begins on the
    /// first segment leaving it.
    pub fn start_control_point(&self) -> ControlPointId {
        self.start
    }
}

/// Discovers the cyclic traversal order of `track`, anchored at the control
/// point nearest `reference_world`.
///
/// Storage order of segments is arbitrary; a consistent ride needs one
/// cyclic order, found here by walking the connection graph. The walk
/// follows segment direction (a segment is only taken from its entry end),
/// never revisits the edge it just arrived by, and succeeds when it returns
/// to its anchor having covered every segment. The input graph is not
/// modified.
pub fn build_ordered_track(
    track: &TrackGraph,
    reference_world: Vec3,
) -> Result<OrderedTrack, TrackOrderError> {
    let reference = reference_world - track.origin;
    let start = nearest_control_point(track, reference).ok_or(TrackOrderError::NoControlPoints)?;
    let total = track.segment_count();

    let mut ordered: Vec<SegmentId> = Vec::with_capacity(total);
    let mut cursor = start;
    loop {
        let point = track.control_point(cursor);
        let latest = ordered.last().copied();
        let next = point
            .connected_segments
            .iter()
            .find(|entry| entry.own_connection == 0 && Some(entry.segment) != latest)
            .ok_or(TrackOrderError::DeadEnd(cursor))?;

        ordered.push(next.segment);
        if ordered.len() > total {
            return Err(TrackOrderError::NeverCloses { total });
        }

        cursor = next
            .far
            .control_point
            .ok_or(TrackOrderError::OpenConnection(next.segment))?;
        if cursor == start {
            break;
        }
    }

    if ordered.len() != total {
        return Err(TrackOrderError::Disconnected {
            walked: ordered.len(),
            total,
        });
    }

    Ok(OrderedTrack {
        segments: ordered,
        start,
    })
}

fn nearest_control_point(track: &TrackGraph, reference: Vec3) -> Option<ControlPointId> {
    let mut best = None;
    let mut best_dist = f32::MAX;
    for (i, point) in track.control_points.iter().enumerate() {
        let dist = point.location.distance_squared(reference);
        if dist < best_dist {
            best_dist = dist;
            best = Some(ControlPointId(i));
        }
    }
    best
}
