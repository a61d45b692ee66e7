//! 2-D/3-D vector primitives in meters.
//!
//! Everything the rule checks need reduces to a handful of operations on
//! plain `f32` vectors: distances, dot products, a rotation, the
//! point-to-segment distance behind the placement corridor test, and the
//! collision-velocity projection behind crash classification.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Planar coordinate or velocity, in meters / meters per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).magnitude()
    }

    /// Rotate counter-clockwise by `angle` radians.
    pub fn rotate(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: cos * self.x - sin * self.y,
            y: sin * self.x + cos * self.y,
        }
    }

    /// Angle between two vectors in degrees. Zero-length input yields 0.
    pub fn angle_to(self, other: Self) -> f32 {
        let denom = self.magnitude() * other.magnitude();
        if denom <= f32::EPSILON {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos().to_degrees()
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vector2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{:.3}, {:.3}}}", self.x, self.y)
    }
}

/// Spatial coordinate or velocity. `z` is height above the carpet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Project onto the ground plane.
    pub fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).magnitude()
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::fmt::Display for Vector3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{:.3}, {:.3}, {:.3}}}", self.x, self.y, self.z)
    }
}

/// Distance from `point` to the segment `a`..`b`.
///
/// The placement-interference corridor is a stadium shape: every point
/// within a fixed radius of this segment. Degenerate segments collapse to a
/// point distance.
pub fn distance_to_segment(a: Vector2, b: Vector2, point: Vector2) -> f32 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Relative velocity of two bodies projected onto the line joining their
/// centers, signed: positive while they close in, negative while they
/// separate.
///
/// This is the approach speed used to decide whether two robots collided
/// hard enough to count as a crash. Coincident positions yield 0.
pub fn collision_velocity(p1: Vector2, v1: Vector2, p2: Vector2, v2: Vector2) -> f32 {
    let velocity_diff = v2 - v1;
    let position_diff = p2 - p1;
    let len = position_diff.magnitude();
    if len <= f32::EPSILON {
        return 0.0;
    }
    -velocity_diff.dot(position_diff) / len
}
