use glam::Vec3;

use crate::rig::Rotator;

/// Index of a curve segment within its [`TrackGraph`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SegmentId(pub usize);

/// Index of a control point within its [`TrackGraph`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ControlPointId(pub usize);

/// One endpoint attachment of a segment.
///
/// `control_point` may be unbound (an open end). Consumers must tolerate
/// open ends: ordering treats them as a broken loop and roll blending
/// degrades to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connection {
    pub control_point: Option<ControlPointId>,
    pub socket_name: String,
}

impl Connection {
    pub fn bound(control_point: ControlPointId, socket_name: &str) -> Self {
        Self {
            control_point: Some(control_point),
            socket_name: socket_name.to_owned(),
        }
    }

    pub fn open() -> Self {
        Self::default()
    }
}

/// Named attachment orientation on a control point.
#[derive(Debug, Clone)]
pub struct Socket {
    pub name: String,
    pub rotation: Rotator,
}

/// Back-reference from a control point to a segment attached to it.
#[derive(Debug, Clone)]
pub struct ConnectedSegment {
    pub segment: SegmentId,
    /// Which of the segment's two connections attaches here (0 or 1).
    pub own_connection: usize,
    /// The segment's other endpoint.
    pub far: Connection,
}

/// A track graph node where segments meet.
///
/// `location` is in the track's local frame. `connected_segments` is kept in
/// enumeration order; walk results depend on it, so callers should register
/// segments in a stable order.
#[derive(Debug, Clone)]
pub struct ControlPoint {
    pub location: Vec3,
    pub rotation: Rotator,
    pub sockets: Vec<Socket>,
    pub connected_segments: Vec<ConnectedSegment>,
}

impl ControlPoint {
    /// Orientation of the named attachment socket. An empty or unknown name
    /// falls back to the control point's own rotation.
    pub fn socket_rotation(&self, name: &str) -> Rotator {
        self.sockets
            .iter()
            .find(|socket| socket.name == name)
            .map(|socket| socket.rotation)
            .unwrap_or(self.rotation)
    }
}

/// A directed curve segment's connectivity. Connection 0 is the entry end,
/// connection 1 the exit end; the curve geometry itself lives behind the
/// [`CurveEvaluator`].
#[derive(Debug, Clone)]
pub struct CurveSegment {
    pub connections: [Connection; 2],
}

/// Snapshot of a renderable track: directed curve segments plus the control
/// points they connect at, all positioned relative to `origin`.
#[derive(Debug, Clone)]
pub struct TrackGraph {
    /// World-space location of the track's local frame.
    pub origin: Vec3,
    pub segments: Vec<CurveSegment>,
    pub control_points: Vec<ControlPoint>,
}

impl TrackGraph {
    pub fn new(origin: Vec3) -> Self {
        Self {
            origin,
            segments: Vec::new(),
            control_points: Vec::new(),
        }
    }

    pub fn add_control_point(&mut self, location: Vec3, rotation: Rotator) -> ControlPointId {
        let id = ControlPointId(self.control_points.len());
        self.control_points.push(ControlPoint {
            location,
            rotation,
            sockets: Vec::new(),
            connected_segments: Vec::new(),
        });
        id
    }

    pub fn add_socket(&mut self, point: ControlPointId, name: &str, rotation: Rotator) {
        self.control_points[point.0].sockets.push(Socket {
            name: name.to_owned(),
            rotation,
        });
    }

    /// Adds a directed segment running from `entry` to `exit` and registers
    /// the back-reference on each bound endpoint.
    pub fn add_segment(&mut self, entry: Connection, exit: Connection) -> SegmentId {
        let id = SegmentId(self.segments.len());
        let connections = [entry, exit];

        for own in 0..2 {
            let Some(point) = connections[own].control_point else {
                continue;
            };
            self.control_points[point.0]
                .connected_segments
                .push(ConnectedSegment {
                    segment: id,
                    own_connection: own,
                    far: connections[1 - own].clone(),
                });
        }

        self.segments.push(CurveSegment { connections });
        id
    }

    pub fn segment(&self, id: SegmentId) -> &CurveSegment {
        &self.segments[id.0]
    }

    pub fn control_point(&self, id: ControlPointId) -> &ControlPoint {
        &self.control_points[id.0]
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

/// Curve geometry collaborator.
///
/// Given a segment and a parameter `t` in `[0, 1]`, yields the track-local
/// position on the curve and the (unnormalized) derivative. Implementations
/// must be pure with respect to `t`; the sampler resamples freely.
pub trait CurveEvaluator {
    fn position_at(&self, segment: SegmentId, t: f32) -> Vec3;
    fn tangent_at(&self, segment: SegmentId, t: f32) -> Vec3;
}
