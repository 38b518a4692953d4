use glam::Vec3;
use tracing::{info, trace, warn};

use crate::rig::{wrap_angle, Pose, Rotator, ViewPoint};
use crate::track::{
    build_ordered_track, parameter_for_distance, segment_arc_length, CurveEvaluator, OrderedTrack,
    SegmentId, TrackGraph, DEFAULT_SECTIONS,
};

use super::config::{RideConfig, RideOverrides};

/// Height of the seated viewpoint above the rig pivot, along the rig's up
/// axis.
pub const SEAT_HEIGHT: f32 = 5.0;

/// Speed change rate on level track, units/sec^2.
const LEVEL_ACCELERATION: f32 = 20.0;
/// Speed change rate on vertical track; slopes interpolate between the two.
const SLOPE_ACCELERATION: f32 = 49.0;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Head-tracking device collaborator.
pub trait HeadTrackingSource {
    fn is_available(&self) -> bool;
    fn is_head_tracking_allowed(&self) -> bool;
    /// Current device orientation and position. Only meaningful while the
    /// device is available and tracking is allowed.
    fn sample(&self) -> (Rotator, Vec3);
}

/// Receives the published pose once per step: the rigid-body placement and
/// the view rotation (which may differ while head tracking is active).
pub trait RigSink {
    fn set_body_pose(&mut self, position: Vec3, rotation: Rotator);
    fn set_view_rotation(&mut self, rotation: Rotator);
}

/// Traversal state while riding. Exists only between possession events;
/// nothing resumable survives unpossession.
#[derive(Debug, Clone)]
struct RideState {
    ordered: OrderedTrack,
    segment_index: usize,
    /// Cached arc length of the current segment.
    segment_length: f32,
    distance_into_segment: f32,
    current_speed: f32,
    target_speed: f32,
}

/// Drives the rider rig along an ordered closed track, one step at a time.
///
/// Possession builds the ordered track from the rider's current world
/// position; each `advance` moves the rig by the evolving speed, derives the
/// pose from the curve evaluator and the endpoint socket orientations, and
/// publishes it to the sink. All collaborators are injected; the controller
/// holds no engine state of its own.
#[derive(Debug)]
pub struct RideController {
    config: RideConfig,
    overrides: RideOverrides,
    possessed: bool,
    state: Option<RideState>,
    chair_view_rotation: Rotator,
    camera_offset: Vec3,
    last_pose: Option<Pose>,
}

impl RideController {
    pub fn new(config: RideConfig) -> Self {
        Self {
            config,
            overrides: RideOverrides::default(),
            possessed: false,
            state: None,
            chair_view_rotation: Rotator::IDENTITY,
            camera_offset: Vec3::ZERO,
            last_pose: None,
        }
    }

    pub fn config(&self) -> &RideConfig {
        &self.config
    }

    /// Target speed currently in effect: the runtime override when set,
    /// otherwise the persisted default.
    pub fn effective_ride_speed(&self) -> f32 {
        self.overrides.ride_speed.unwrap_or(self.config.ride_speed)
    }

    fn preserve_base_pitch(&self) -> bool {
        self.overrides
            .preserve_base_pitch
            .unwrap_or(self.config.preserve_base_pitch_on_head_tracking)
    }

    fn preserve_base_roll(&self) -> bool {
        self.overrides
            .preserve_base_roll
            .unwrap_or(self.config.preserve_base_roll_on_head_tracking)
    }

    /// Sets the target speed. A live ride re-targets immediately and ramps
    /// toward the new value over the following steps.
    pub fn set_ride_speed(&mut self, speed: f32) {
        self.overrides.ride_speed = Some(speed);
        if let Some(state) = self.state.as_mut() {
            state.target_speed = speed;
        }
    }

    pub fn set_preserve_base_pitch(&mut self, preserve: bool) {
        self.overrides.preserve_base_pitch = Some(preserve);
    }

    pub fn set_preserve_base_roll(&mut self, preserve: bool) {
        self.overrides.preserve_base_roll = Some(preserve);
    }

    pub fn is_possessed(&self) -> bool {
        self.possessed
    }

    /// Whether a valid ordered track is bound.
    pub fn has_track(&self) -> bool {
        self.state.is_some()
    }

    pub fn segment_index(&self) -> Option<usize> {
        self.state.as_ref().map(|state| state.segment_index)
    }

    pub fn current_segment(&self) -> Option<SegmentId> {
        self.state
            .as_ref()
            .map(|state| state.ordered.segment(state.segment_index))
    }

    pub fn current_speed(&self) -> Option<f32> {
        self.state.as_ref().map(|state| state.current_speed)
    }

    /// The last rigid-body pose published by `advance`.
    pub fn last_pose(&self) -> Option<Pose> {
        self.last_pose
    }

    /// Begins a ride: orders the track around the rider's current world
    /// position and primes the traversal state on the first segment.
    ///
    /// If the graph does not form a single closed loop the rider is left
    /// idle; `advance` then does nothing until the next possession.
    pub fn on_possess<E>(&mut self, track: &TrackGraph, evaluator: &E, reference_world: Vec3)
    where
        E: CurveEvaluator + ?Sized,
    {
        self.possessed = true;
        // Any previous ride is fully discarded before the new walk begins.
        self.state = None;

        match build_ordered_track(track, reference_world) {
            Ok(ordered) => {
                let first = ordered.segment(0);
                let segment_length = segment_arc_length(evaluator, first);
                let target = self.effective_ride_speed();
                info!(segments = ordered.len(), "ordered track built, ride primed");
                self.state = Some(RideState {
                    ordered,
                    segment_index: 0,
                    segment_length,
                    distance_into_segment: 0.0,
                    current_speed: target,
                    target_speed: target,
                });
            }
            Err(err) => {
                warn!(%err, "track ordering failed, rider stays idle");
            }
        }
    }

    /// Ends the ride and discards all traversal state.
    pub fn on_unpossess(&mut self) {
        self.possessed = false;
        self.state = None;
        self.chair_view_rotation = Rotator::IDENTITY;
        self.camera_offset = Vec3::ZERO;
        self.last_pose = None;
    }

    /// Advances the ride by `delta_time` seconds and publishes the resulting
    /// pose. Does nothing while no ordered track is bound.
    pub fn advance<E, H, S>(
        &mut self,
        track: &TrackGraph,
        evaluator: &E,
        head: &H,
        sink: &mut S,
        delta_time: f32,
    ) where
        E: CurveEvaluator + ?Sized,
        H: HeadTrackingSource + ?Sized,
        S: RigSink + ?Sized,
    {
        let delta_time = delta_time.max(0.0);
        let preserve_pitch = self.preserve_base_pitch();
        let preserve_roll = self.preserve_base_roll();
        let Some(state) = self.state.as_mut() else {
            return;
        };

        // Stopping is instantaneous; only nonzero targets are ramped toward.
        if state.target_speed == 0.0 {
            state.current_speed = 0.0;
        }

        state.distance_into_segment += state.current_speed * delta_time;

        // Cross as many boundaries as the step covered, carrying the
        // remainder so the motion stays continuous. The crossing cap guards
        // against a track whose segments have all collapsed to zero length.
        let mut crossings = 0;
        while state.distance_into_segment > state.segment_length {
            crossings += 1;
            if crossings > state.ordered.len() {
                state.distance_into_segment = 0.0;
                break;
            }
            let carry = state.distance_into_segment - state.segment_length;
            state.segment_index = (state.segment_index + 1) % state.ordered.len();
            state.segment_length =
                segment_arc_length(evaluator, state.ordered.segment(state.segment_index));
            state.distance_into_segment = carry;
            trace!(segment = state.segment_index, "crossed segment boundary");
        }

        let segment = state.ordered.segment(state.segment_index);
        let t = parameter_for_distance(
            evaluator,
            segment,
            state.distance_into_segment,
            DEFAULT_SECTIONS,
        );

        let position = track.origin + evaluator.position_at(segment, t);
        let tangent = evaluator.tangent_at(segment, t).normalize_or_zero();
        let mut heading = Rotator::from_forward(tangent);
        heading.roll = blended_roll(track, segment, t);

        // The chair view follows the heading; while the device tracks the
        // head, pitch and roll are leveled out unless explicitly preserved.
        let mut view = heading;
        if head.is_available() && head.is_head_tracking_allowed() {
            if !preserve_pitch {
                view.pitch = 0.0;
            }
            if !preserve_roll {
                view.roll = 0.0;
            }
        }

        // Steeper track allows a faster approach toward the target speed;
        // the step is capped by the remaining gap so it never overshoots.
        let acceleration = lerp(LEVEL_ACCELERATION, SLOPE_ACCELERATION, tangent.y.abs());
        let diff = state.target_speed - state.current_speed;
        state.current_speed += acceleration.min(diff.abs()) * delta_time * diff.signum();

        sink.set_view_rotation(view);
        sink.set_body_pose(position, heading);

        self.chair_view_rotation = view;
        self.camera_offset = heading.up() * SEAT_HEIGHT;
        self.last_pose = Some(Pose {
            position,
            rotation: heading,
        });
    }

    /// Camera viewpoint for the current step: the seat offset plus the view
    /// rotation, composed with the head-tracking sample when the device is
    /// active. The device supplies pitch and roll; yaw is the device yaw on
    /// top of the track-derived yaw so the rider keeps facing forward.
    pub fn view_point<H>(&self, head: &H) -> ViewPoint
    where
        H: HeadTrackingSource + ?Sized,
    {
        let chair = self.chair_view_rotation;
        let mut rotation = chair;
        if head.is_available() && head.is_head_tracking_allowed() {
            let (device, _position) = head.sample();
            rotation = device;
            rotation.yaw = wrap_angle(rotation.yaw + chair.yaw);
            rotation.pitch += chair.pitch;
            rotation.roll += chair.roll;
        }
        ViewPoint {
            offset: self.camera_offset,
            rotation,
        }
    }
}

/// Roll at parameter `t`, blended between the negated roll components of the
/// two endpoint socket orientations. Zero when either end is unbound.
fn blended_roll(track: &TrackGraph, segment: SegmentId, t: f32) -> f32 {
    let ends = &track.segment(segment).connections;
    let (Some(entry_point), Some(exit_point)) = (ends[0].control_point, ends[1].control_point)
    else {
        return 0.0;
    };
    let start = track
        .control_point(entry_point)
        .socket_rotation(&ends[0].socket_name);
    let end = track
        .control_point(exit_point)
        .socket_rotation(&ends[1].socket_name);
    lerp(-start.roll, -end.roll, t)
}
