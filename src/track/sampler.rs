use super::graph::{CurveEvaluator, SegmentId};

/// Chord-subdivision count used for in-ride sampling. Coarser values are
/// acceptable for rough length estimates at track-analysis time.
pub const DEFAULT_SECTIONS: u32 = 32;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Approximate arc length of a segment over `[t_start, t_end]`.
///
/// Sums straight-line chord lengths between `sections` uniformly spaced
/// evaluator samples. Higher `sections` trades compute for accuracy; the
/// result is 0 for an empty interval.
pub fn approx_arc_length<E>(
    evaluator: &E,
    segment: SegmentId,
    t_start: f32,
    t_end: f32,
    sections: u32,
) -> f32
where
    E: CurveEvaluator + ?Sized,
{
    let mut length = 0.0;
    let mut prev = evaluator.position_at(segment, t_start);
    for i in 1..=sections {
        let t = lerp(t_start, t_end, i as f32 / sections as f32);
        let next = evaluator.position_at(segment, t);
        length += prev.distance(next);
        prev = next;
    }
    length
}

/// Full-segment arc length at the in-ride fidelity.
pub fn segment_arc_length<E>(evaluator: &E, segment: SegmentId) -> f32
where
    E: CurveEvaluator + ?Sized,
{
    approx_arc_length(evaluator, segment, 0.0, 1.0, DEFAULT_SECTIONS)
}

/// Parameter whose arc-length distance from the segment start is `distance`.
///
/// Walks the same chord subdivision as [`approx_arc_length`], accumulating
/// length; once the running total would meet `distance`, interpolates
/// linearly within that chord's parameter span. Clamps rather than erring:
/// 0.0 for `distance <= 0`, and 1.0 when `distance` meets or exceeds the
/// approximate total length (zero-length segments included, so callers never
/// divide by a zero length).
pub fn parameter_for_distance<E>(
    evaluator: &E,
    segment: SegmentId,
    distance: f32,
    sections: u32,
) -> f32
where
    E: CurveEvaluator + ?Sized,
{
    if distance <= 0.0 {
        return 0.0;
    }

    let mut walked = 0.0;
    let mut prev = evaluator.position_at(segment, 0.0);
    for i in 1..=sections {
        let t = i as f32 / sections as f32;
        let next = evaluator.position_at(segment, t);
        let chord = prev.distance(next);
        if chord > 0.0 && walked + chord >= distance {
            let t_prev = (i - 1) as f32 / sections as f32;
            return t_prev + (t - t_prev) * ((distance - walked) / chord);
        }
        walked += chord;
        prev = next;
    }
    1.0
}
