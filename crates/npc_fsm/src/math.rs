//! Minimal 3D math for agent positions and headings

use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A point or direction in 3D space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared distance (use for ordering, avoids the square root)
    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }

    /// Step towards `target` by at most `max_delta`, never overshooting
    pub fn move_towards(self, target: Self, max_delta: f32) -> Self {
        let offset = target - self;
        let dist = offset.length();
        if dist <= max_delta || dist == 0.0 {
            target
        } else {
            self + offset * (max_delta / dist)
        }
    }

    /// Unit direction on the ground plane for a yaw angle (0 faces +Z)
    #[inline]
    pub fn from_yaw(yaw: f32) -> Self {
        Self::new(yaw.sin(), 0.0, yaw.cos())
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Anything with a readable world position
///
/// Waypoints and agents are only ever observed through this.
pub trait Positioned {
    fn position(&self) -> Vec3;
}

impl Positioned for Vec3 {
    #[inline]
    fn position(&self) -> Vec3 {
        *self
    }
}

impl<P: Positioned + ?Sized> Positioned for &P {
    #[inline]
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

/// Yaw (radians, around +Y) that faces from `from` towards `to`
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    d.x.atan2(d.z)
}

/// Wrap an angle into `(-PI, PI]`
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Rotate `current` towards `target` by at most `max_delta` radians
pub fn rotate_yaw_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = wrap_angle(target - current);
    if diff.abs() <= max_delta {
        wrap_angle(target)
    } else {
        wrap_angle(current + max_delta.copysign(diff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distances() {
        let a = Vec3::ZERO;
        let b = Vec3::new(3.0, 0.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_move_towards() {
        let start = Vec3::ZERO;
        let target = Vec3::new(10.0, 0.0, 0.0);

        let step = start.move_towards(target, 4.0);
        assert_relative_eq!(step.x, 4.0);

        // Never overshoots
        assert_eq!(step.move_towards(target, 100.0), target);
    }

    #[test]
    fn test_yaw() {
        assert_relative_eq!(yaw_towards(Vec3::ZERO, Vec3::Z), 0.0);
        assert_relative_eq!(yaw_towards(Vec3::ZERO, Vec3::X), PI / 2.0);

        let dir = Vec3::from_yaw(PI / 2.0);
        assert_relative_eq!(dir.x, 1.0);
        assert_relative_eq!(dir.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_yaw_takes_short_way() {
        // From just below +PI to just above -PI is a small step across the seam
        let current = PI - 0.1;
        let target = -PI + 0.1;
        let next = rotate_yaw_towards(current, target, 0.05);
        assert_relative_eq!(next, PI - 0.05, epsilon = 1e-5);

        // Snaps when within reach
        assert_relative_eq!(rotate_yaw_towards(0.0, 0.3, 1.0), 0.3);
    }

    #[test]
    fn test_serde_array_form() {
        let v: Vec3 = [1.0, 2.0, 3.0].into();
        let arr: [f32; 3] = v.into();
        assert_eq!(arr, [1.0, 2.0, 3.0]);
    }
}
