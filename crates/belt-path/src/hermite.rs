//! Cubic Hermite basis.
//!
//! `H(u) = h00·p0 + h10·m0 + h01·p1 + h11·m1` for `u ∈ [0, 1]`, where `m0`
//! and `m1` are the (already scaled) tangents.  At `u = 0` every term except
//! `h00·p0` is an exact zero, so the curve starts on `p0` bit-for-bit.

use belt_core::DVec3;

/// Point on the Hermite segment.  `u` is clamped to `[0, 1]`.
#[inline]
pub fn point(p0: DVec3, m0: DVec3, p1: DVec3, m1: DVec3, u: f64) -> DVec3 {
    let u = u.clamp(0.0, 1.0);
    let u2 = u * u;
    let u3 = u2 * u;

    let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
    let h10 = u3 - 2.0 * u2 + u;
    let h01 = -2.0 * u3 + 3.0 * u2;
    let h11 = u3 - u2;

    p0 * h00 + m0 * h10 + p1 * h01 + m1 * h11
}

/// First derivative with respect to `u`.
#[inline]
pub fn derivative(p0: DVec3, m0: DVec3, p1: DVec3, m1: DVec3, u: f64) -> DVec3 {
    let u = u.clamp(0.0, 1.0);
    let u2 = u * u;

    let d00 = 6.0 * u2 - 6.0 * u;
    let d10 = 3.0 * u2 - 4.0 * u + 1.0;
    let d01 = -6.0 * u2 + 6.0 * u;
    let d11 = 3.0 * u2 - 2.0 * u;

    p0 * d00 + m0 * d10 + p1 * d01 + m1 * d11
}
