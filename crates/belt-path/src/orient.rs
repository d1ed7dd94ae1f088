//! Sign selection for bidirectional waypoints.
//!
//! Every anchor has an entry handle `p - h·d` and an exit handle `p + h·d`.
//! The cost of a chain of anchors is the sum of squared distances from each
//! exit handle to the next entry handle.  Flipping a waypoint swaps its
//! handles, so the cost only depends on the sign choices of neighbouring
//! anchors and the optimum is found with a two-state dynamic programme
//! instead of trying all `2^n` combinations.
//!
//! Ties keep the authored sign, earliest waypoint first.

use belt_core::DVec3;

use crate::{Anchor, Orientation, Waypoint};

/// Handle length used when comparing orientations.
pub const WAYPOINT_HANDLE: f64 = 0.3;

const SIGNS: [f64; 2] = [1.0, -1.0];

#[inline]
fn entry(a: &Anchor) -> DVec3 {
    a.position - a.tangent * WAYPOINT_HANDLE
}

#[inline]
fn exit(a: &Anchor) -> DVec3 {
    a.position + a.tangent * WAYPOINT_HANDLE
}

/// Squared handle-gap cost of the chain `start, middle.., end`.
pub fn handle_cost(start: &Anchor, middle: &[Anchor], end: &Anchor) -> f64 {
    let mut prev = exit(start);
    let mut cost = 0.0;
    for a in middle {
        cost += prev.distance_squared(entry(a));
        prev = exit(a);
    }
    cost + prev.distance_squared(entry(end))
}

/// Resolve every waypoint into an anchor, flipping bidirectional ones where
/// that shortens the chain.
pub fn orient_waypoints(start: &Anchor, waypoints: &[Waypoint], end: &Anchor) -> Vec<Anchor> {
    let n = waypoints.len();
    if n == 0 {
        return Vec::new();
    }

    let allowed = |i: usize, s: usize| -> bool {
        s == 0 || waypoints[i].orientation == Orientation::Bidirectional
    };
    let cand = |i: usize, s: usize| -> Anchor { waypoints[i].anchor(SIGNS[s]) };

    // best[i][s]: cheapest cost from waypoint i (with sign s) to the end.
    let mut best = vec![[f64::INFINITY; 2]; n];
    let end_entry = entry(end);
    for s in 0..2 {
        if allowed(n - 1, s) {
            best[n - 1][s] = exit(&cand(n - 1, s)).distance_squared(end_entry);
        }
    }
    for i in (0..n - 1).rev() {
        for s in 0..2 {
            if !allowed(i, s) {
                continue;
            }
            let from = exit(&cand(i, s));
            best[i][s] = (0..2)
                .filter(|&t| allowed(i + 1, t))
                .map(|t| from.distance_squared(entry(&cand(i + 1, t))) + best[i + 1][t])
                .fold(f64::INFINITY, f64::min);
        }
    }

    let mut out = Vec::with_capacity(n);
    let mut prev = exit(start);
    for i in 0..n {
        let cost = |s: usize| prev.distance_squared(entry(&cand(i, s))) + best[i][s];
        let keep = cost(0);
        let flip = if allowed(i, 1) { cost(1) } else { f64::INFINITY };
        let s = if flip < keep { 1 } else { 0 };
        if s == 1 {
            log::trace!("waypoint {i} at {} flipped ({flip:.4} < {keep:.4})", waypoints[i].position);
        }
        let chosen = cand(i, s);
        prev = exit(&chosen);
        out.push(chosen);
    }
    out
}
