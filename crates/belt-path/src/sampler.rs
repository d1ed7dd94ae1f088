//! Arc-length sampling: global progress → point on the curve.

use belt_core::DVec3;

use crate::{Path, hermite};

/// Map progress `t ∈ [0, 1]` to a position with near-constant speed.
///
/// `t` is clamped (NaN counts as 0).  `t = 0` returns the start anchor and
/// any `t` that resolves at or past the last segment returns the final anchor
/// exactly, so items always terminate on the authored sink point.
pub fn position_at(path: &Path, t: f64) -> DVec3 {
    let t = clamp_progress(t);
    match path.table().locate(t * path.total_length()) {
        Some((i, u)) => {
            let (p0, m0, p1, m1) = path.segment(i);
            hermite::point(p0, m0, p1, m1, u)
        }
        None => path.end().position,
    }
}

/// Unit travel direction at progress `t`.
///
/// Falls back to the end anchor's tangent past the last segment.
pub fn tangent_at(path: &Path, t: f64) -> DVec3 {
    let t = clamp_progress(t);
    match path.table().locate(t * path.total_length()) {
        Some((i, u)) => {
            let (p0, m0, p1, m1) = path.segment(i);
            let d = hermite::derivative(p0, m0, p1, m1, u).normalize_or_zero();
            if d == DVec3::ZERO { (p1 - p0).normalize_or_zero() } else { d }
        }
        None => path.end().tangent,
    }
}

/// Evenly spaced positions along the path, both ends included.
///
/// This is what a renderer strings quads along.
pub fn sample_points(path: &Path, samples: usize) -> Vec<DVec3> {
    let samples = samples.max(1);
    (0..=samples)
        .map(|k| position_at(path, k as f64 / samples as f64))
        .collect()
}

/// Polyline length of the curve from progress 0 to `t`.
///
/// The curve is sampled on a fixed grid of `samples` cells; the cell that
/// contains `t` contributes the matching fraction of its chord.  The result
/// is therefore non-decreasing in `t`.
pub fn sampled_length(path: &Path, t: f64, samples: usize) -> f64 {
    let samples = samples.max(1);
    let t = clamp_progress(t);
    let scaled = t * samples as f64;
    let full = (scaled.floor() as usize).min(samples);

    let mut length = 0.0;
    let mut prev = position_at(path, 0.0);
    for k in 1..=full {
        let next = position_at(path, k as f64 / samples as f64);
        length += prev.distance(next);
        prev = next;
    }
    if full < samples {
        let frac = scaled - full as f64;
        if frac > 0.0 {
            let next = position_at(path, (full + 1) as f64 / samples as f64);
            length += prev.distance(next) * frac;
        }
    }
    length
}

#[inline]
fn clamp_progress(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}
