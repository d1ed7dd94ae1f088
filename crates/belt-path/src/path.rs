//! The `Path` type and its builder.

use belt_core::DVec3;

use crate::{Anchor, PathError, PathResult, Waypoint, orient_waypoints};

/// Multiplier applied to a segment's length to get its Hermite tangent
/// magnitude.  1.5 keeps bends round without overshooting; speed along a
/// straight segment then varies by a few percent.  A strength of 1.0 makes
/// a straight segment exactly linear, see [`Path::with_tangent_strength`].
pub const TANGENT_STRENGTH: f64 = 1.5;

/// Below this total length a path is treated as degenerate.
const MIN_LENGTH: f64 = 1e-9;

// ── ArcLengthTable ────────────────────────────────────────────────────────────

/// Cumulative segment lengths: `cumulative[i]` is the distance from the start
/// to anchor `i`.  Length = segment count + 1.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcLengthTable {
    cumulative: Vec<f64>,
}

impl ArcLengthTable {
    pub fn from_lengths(lengths: &[f64]) -> Self {
        let mut cumulative = Vec::with_capacity(lengths.len() + 1);
        let mut acc = 0.0;
        cumulative.push(acc);
        for &len in lengths {
            acc += len;
            cumulative.push(acc);
        }
        Self { cumulative }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.cumulative.len().saturating_sub(1)
    }

    /// Segment containing `distance` and the local parameter inside it.
    ///
    /// A segment `i` contains `d` when `cumulative[i] <= d < cumulative[i+1]`,
    /// so zero-length segments are never selected.  Returns `None` when
    /// `distance` lies at or past the end.
    pub fn locate(&self, distance: f64) -> Option<(usize, f64)> {
        if self.segment_count() == 0 || distance.is_nan() {
            return None;
        }
        let distance = distance.max(0.0);
        // First i whose upper bound exceeds `distance`.
        let i = self.cumulative[1..].partition_point(|&upper| upper <= distance);
        if i >= self.segment_count() {
            return None;
        }
        let start = self.cumulative[i];
        let len = self.cumulative[i + 1] - start;
        Some((i, (distance - start) / len))
    }

    /// Distance from the start to anchor `i`.
    #[inline]
    pub fn distance_to(&self, anchor: usize) -> Option<f64> {
        self.cumulative.get(anchor).copied()
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// A continuous curve through an ordered list of anchors.
///
/// Immutable once built.  A belt rebuilds its path whenever an endpoint or
/// the waypoint set changes, and can hand out `&Path` to renderers freely.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    anchors: Vec<Anchor>,
    segment_lengths: Vec<f64>,
    table: ArcLengthTable,
    tangent_strength: f64,
}

/// Build a path through already-oriented anchors.
///
/// Fails with [`PathError::TooFewAnchors`] below two anchors and with
/// [`PathError::Degenerate`] when the summed chord length is zero.
pub fn build(anchors: &[Anchor]) -> PathResult<Path> {
    if anchors.len() < 2 {
        return Err(PathError::TooFewAnchors(anchors.len()));
    }
    if let Some(i) = anchors.iter().position(|a| !a.is_finite()) {
        return Err(PathError::NonFinite(i));
    }

    let anchors: Vec<Anchor> = anchors
        .iter()
        .map(|a| Anchor::new(a.position, a.tangent))
        .collect();
    let segment_lengths: Vec<f64> = anchors
        .windows(2)
        .map(|w| chord_length(w[0].position, w[1].position))
        .collect();
    let table = ArcLengthTable::from_lengths(&segment_lengths);

    if table.total() <= MIN_LENGTH {
        return Err(PathError::Degenerate);
    }

    Ok(Path {
        anchors,
        segment_lengths,
        table,
        tangent_strength: TANGENT_STRENGTH,
    })
}

/// Chord approximation of a segment's arc length.
#[inline]
fn chord_length(from: DVec3, to: DVec3) -> f64 {
    from.distance(to)
}

impl Path {
    /// Build from start and end anchors with waypoints in traversal order,
    /// orienting bidirectional waypoints first.
    pub fn through(start: Anchor, waypoints: &[Waypoint], end: Anchor) -> PathResult<Path> {
        let start = Anchor::new(start.position, start.tangent);
        let end = Anchor::new(end.position, end.tangent);
        let mut anchors = Vec::with_capacity(waypoints.len() + 2);
        anchors.push(start);
        anchors.extend(orient_waypoints(&start, waypoints, &end));
        anchors.push(end);
        build(&anchors)
    }

    /// Same anchors and lengths, different tangent multiplier.  Positions at
    /// `t = 0` and `t = 1` are unaffected.
    pub fn with_tangent_strength(mut self, strength: f64) -> Self {
        self.tangent_strength = if strength.is_finite() { strength.max(0.0) } else { TANGENT_STRENGTH };
        self
    }

    #[inline]
    pub fn tangent_strength(&self) -> f64 {
        self.tangent_strength
    }

    /// Read-only view of the anchors, start first.
    #[inline]
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    #[inline]
    pub fn start(&self) -> &Anchor {
        &self.anchors[0]
    }

    #[inline]
    pub fn end(&self) -> &Anchor {
        &self.anchors[self.anchors.len() - 1]
    }

    #[inline]
    pub fn segment_lengths(&self) -> &[f64] {
        &self.segment_lengths
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_lengths.len()
    }

    /// Sum of per-segment lengths.
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.table.total()
    }

    #[inline]
    pub fn table(&self) -> &ArcLengthTable {
        &self.table
    }

    /// The two anchors and scaled tangents of segment `i`.
    pub(crate) fn segment(&self, i: usize) -> (DVec3, DVec3, DVec3, DVec3) {
        let a = &self.anchors[i];
        let b = &self.anchors[i + 1];
        let scale = self.segment_lengths[i] * self.tangent_strength;
        (a.position, a.tangent * scale, b.position, b.tangent * scale)
    }
}
