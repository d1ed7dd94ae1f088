//! Anchor and waypoint types.

use belt_core::{DVec3, Facing};

/// A position plus the direction the path travels through it.
///
/// `tangent` is unit-scale; path evaluation multiplies it by a per-segment
/// strength.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub position: DVec3,
    pub tangent: DVec3,
}

impl Anchor {
    /// Build an anchor, normalising `tangent` (a zero tangent stays zero).
    #[inline]
    pub fn new(position: DVec3, tangent: DVec3) -> Self {
        Self {
            position,
            tangent: tangent.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn facing(position: DVec3, facing: Facing) -> Self {
        Self::new(position, facing.vector())
    }

    /// Same point, travel direction reversed.
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            position: self.position,
            tangent: -self.tangent,
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.tangent.is_finite()
    }
}

/// Whether a waypoint's tangent sign is authored or free.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// The author chose the direction; it is used as given.
    Fixed,
    /// A physical support has no forward or backward; the builder picks the
    /// sign that keeps the path shortest.
    #[default]
    Bidirectional,
}

/// An authored intermediate point of a belt.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub position: DVec3,
    pub tangent: DVec3,
    pub orientation: Orientation,
}

impl Waypoint {
    /// A support block: bidirectional, tangent along `facing`.
    pub fn support(position: DVec3, facing: Facing) -> Self {
        Self {
            position,
            tangent: facing.vector(),
            orientation: Orientation::Bidirectional,
        }
    }

    /// A waypoint whose direction is used exactly as authored.
    pub fn fixed(position: DVec3, tangent: DVec3) -> Self {
        Self {
            position,
            tangent: tangent.normalize_or_zero(),
            orientation: Orientation::Fixed,
        }
    }

    #[inline]
    pub fn anchor(&self, sign: f64) -> Anchor {
        Anchor::new(self.position, self.tangent * sign)
    }
}
