//! Screen-Space 2D Vector
//!
//! Positions and velocities are in canvas pixels, +y pointing down
//! (matching the 2D drawing surface the games render to).

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// 2D vector with f64 components.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component (pixels, rightward)
    pub x: f64,
    /// Y component (pixels, downward)
    pub y: f64,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale by a scalar.
    #[inline]
    pub fn scale(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }

    /// Squared length (avoids sqrt - prefer this for comparisons).
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Length (magnitude).
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Distance to another point. Prefer `distance_squared` when possible.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Normalize to unit length. Returns ZERO if length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Linear interpolation. t = 0 returns self, t = 1 returns other.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self).scale(t)
    }

    /// Clamp both components into a rectangle spanning (0, 0)..(width, height).
    #[inline]
    pub fn clamp_to(self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.clamp(0.0, width),
            y: self.y.clamp(0.0, height),
        }
    }

    /// Angle of the vector from this point to another, in radians.
    #[inline]
    pub fn angle_to(self, other: Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Unit vector for an angle in radians.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }
}

/// Wrap an angle into [-PI, PI].
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Rotate `current` toward `target` by at most `max_delta` radians,
/// always taking the shorter way around the circle.
///
/// Both input angles may be arbitrary; the result is wrapped to [-PI, PI].
#[inline]
pub fn rotate_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    let diff = wrap_angle(target - current);
    if diff.abs() <= max_delta {
        wrap_angle(target)
    } else {
        wrap_angle(current + max_delta.copysign(diff))
    }
}

// Operator overloads for ergonomics
impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.3}, {:.3})", self.x, self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_vec2_add_sub() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(1.0, 2.0);
        assert_eq!(a + b, Vec2::new(4.0, 6.0));
        assert_eq!(a - b, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_vec2_length() {
        // 3-4-5 triangle
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
    }

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::ZERO;
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_vec2_normalize() {
        let v = Vec2::new(3.0, 4.0).normalize();
        assert!(close(v.length(), 1.0));
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_vec2_lerp() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 20.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_vec2_clamp_to() {
        let inside = Vec2::new(100.0, 200.0);
        assert_eq!(inside.clamp_to(400.0, 600.0), inside);

        let outside = Vec2::new(-10.0, 700.0);
        assert_eq!(outside.clamp_to(400.0, 600.0), Vec2::new(0.0, 600.0));
    }

    #[test]
    fn test_wrap_angle() {
        assert!(close(wrap_angle(0.0), 0.0));
        assert!(wrap_angle(3.0 * PI).abs() <= PI + 1e-9);
        assert!(wrap_angle(-3.0 * PI).abs() <= PI + 1e-9);
        assert!(wrap_angle(123.456).abs() <= PI + 1e-9);
        assert!(close(wrap_angle(PI / 2.0), PI / 2.0));
    }

    #[test]
    fn test_rotate_towards_direct() {
        // Small gap, large step: snaps to the target.
        let r = rotate_towards(0.2, 0.5, 1.0);
        assert!(close(r, 0.5));

        // Large gap, small step: advances by exactly the step.
        let r = rotate_towards(0.0, 1.0, 0.25);
        assert!(close(r, 0.25));
    }

    #[test]
    fn test_rotate_towards_wraps_across_pi() {
        // 3.0 -> -3.0 is only ~0.283 rad going through PI, not ~6 rad back.
        let r = rotate_towards(3.0, -3.0, 0.5);
        assert!(close(r, -3.0));

        // Partial step still crosses the boundary in the short direction.
        let r = rotate_towards(3.0, -3.0, 0.1);
        assert!(close(r, wrap_angle(3.1)));
    }

    #[test]
    fn test_angle_to_and_from_angle() {
        let origin = Vec2::ZERO;
        let right = Vec2::new(10.0, 0.0);
        assert!(close(origin.angle_to(right), 0.0));

        let down = Vec2::new(0.0, 5.0);
        assert!(close(origin.angle_to(down), PI / 2.0));

        let v = Vec2::from_angle(0.0);
        assert!(close(v.x, 1.0) && close(v.y, 0.0));
    }
}
