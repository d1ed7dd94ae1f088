//! Axis directions and small vector helpers.
//!
//! Positions and tangents are `glam::DVec3`.  Path construction works in
//! `f64` so that `position_at(1.0)` lands on the sink point exactly; only
//! item progress is stored as `f32`.

pub use glam::DVec3;

/// One of the six axis-aligned directions an endpoint or support can face.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Facing {
    /// Unit vector.  North is -Z and East is +X.
    #[inline]
    pub fn vector(self) -> DVec3 {
        match self {
            Facing::North => DVec3::NEG_Z,
            Facing::South => DVec3::Z,
            Facing::East  => DVec3::X,
            Facing::West  => DVec3::NEG_X,
            Facing::Up    => DVec3::Y,
            Facing::Down  => DVec3::NEG_Y,
        }
    }

    #[inline]
    pub fn opposite(self) -> Facing {
        match self {
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::East  => Facing::West,
            Facing::West  => Facing::East,
            Facing::Up    => Facing::Down,
            Facing::Down  => Facing::Up,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::South => "south",
            Facing::East  => "east",
            Facing::West  => "west",
            Facing::Up    => "up",
            Facing::Down  => "down",
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pack an integer-ish position into a stable `i64`, used to spread periodic
/// work across belts.  Coordinates are floored and masked to 26/12/26 bits.
pub fn pack_position(p: DVec3) -> i64 {
    let x = (p.x.floor() as i64) & 0x3FF_FFFF;
    let y = (p.y.floor() as i64) & 0xFFF;
    let z = (p.z.floor() as i64) & 0x3FF_FFFF;
    (x << 38) | (z << 12) | y
}
