//! Wedge colliders for bricks and pads
//!
//! A wedge covers `segments_count` arena segments starting at `angle_start`
//! and extending clockwise (toward negative angles, see [`ANGLE`]), between
//! `distance` and `distance + BRICK_WIDTH` from the arena center. Bricks and
//! the player's rotating pads share this shape.

use crate::consts::{ANGLE, BRICK_WIDTH};
use crate::geometry::Vector;
use crate::normalize_angle;

/// One of the four points where a wedge's radial and angular edges meet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    InnerStart,
    InnerEnd,
    OuterStart,
    OuterEnd,
}

/// A radial wedge (brick or pad)
#[derive(Debug, Clone, PartialEq)]
pub struct BrickCollider {
    distance: f32,
    segments_count: u32,
    /// Always in (-π, π]
    angle_start: f32,
    height: f32,
    /// Angle of the last rotation, treated as the displacement per tick
    angular_velocity: f32,
}

impl BrickCollider {
    pub fn new(distance: f32, segments_count: u32, angle_start: f32, height: f32) -> Self {
        Self {
            distance,
            segments_count,
            angle_start: normalize_angle(angle_start),
            height,
            angular_velocity: 0.0,
        }
    }

    /// Turn the wedge by `angle` radians and remember it as the current angular velocity
    pub fn rotate(&mut self, angle: f32) {
        self.angle_start = normalize_angle(self.angle_start + angle);
        self.angular_velocity = angle;
    }

    #[inline]
    pub const fn inner_radius(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub const fn outer_radius(&self) -> f32 {
        self.distance + BRICK_WIDTH
    }

    #[inline]
    pub const fn middle_radius(&self) -> f32 {
        self.distance + BRICK_WIDTH / 2.0
    }

    #[inline]
    pub const fn angle_start(&self) -> f32 {
        self.angle_start
    }

    /// Clockwise end of the wedge. Not normalized: may drop below -π.
    #[inline]
    pub fn angle_end(&self) -> f32 {
        self.angle_start + self.segments_count as f32 * ANGLE
    }

    #[inline]
    pub const fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub const fn segments_count(&self) -> u32 {
        self.segments_count
    }

    #[inline]
    pub const fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Whether a radial distance lies within the wedge's ring
    #[inline]
    pub fn ring_contains(&self, radius: f32) -> bool {
        radius >= self.inner_radius() && radius <= self.outer_radius()
    }

    /// Corner point in the `(x, z)` plane
    pub fn corner(&self, corner: Corner) -> Vector<2> {
        let (radius, angle) = match corner {
            Corner::InnerStart => (self.inner_radius(), self.angle_start()),
            Corner::InnerEnd => (self.inner_radius(), self.angle_end()),
            Corner::OuterStart => (self.outer_radius(), self.angle_start()),
            Corner::OuterEnd => (self.outer_radius(), self.angle_end()),
        };
        Vector::new([radius, 0.0]).rotated(angle)
    }

    /// Displacement over the last tick of the wedge point under `point`,
    /// projected to `(x, z)`
    pub fn velocity_at(&self, point: Vector<3>) -> Vector<2> {
        let up = Vector::new([0.0, 1.0, 0.0]);
        (point.rotated(self.angular_velocity, up) - point)
            .inverted()
            .to2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PAD_DISTANCE, PAD_SEGMENTS};
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_radii() {
        let brick = BrickCollider::new(10.0, 3, 0.0, 0.0);
        assert_eq!(brick.inner_radius(), 10.0);
        assert_eq!(brick.outer_radius(), 13.0);
        assert_eq!(brick.middle_radius(), 11.5);
        assert!(brick.ring_contains(11.0));
        assert!(!brick.ring_contains(13.5));
    }

    #[test]
    fn test_angle_end_is_clockwise() {
        let brick = BrickCollider::new(10.0, 9, 0.0, 0.0);
        assert!((brick.angle_end() + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_normalizes_start() {
        let mut pad = BrickCollider::new(PAD_DISTANCE, PAD_SEGMENTS, 3.0, 0.0);
        pad.rotate(0.3);
        assert!((pad.angle_start() - (3.3 - 2.0 * PI)).abs() < 1e-5);
        assert_eq!(pad.angular_velocity(), 0.3);

        pad.rotate(-0.5);
        assert!((pad.angle_start() - 2.8).abs() < 1e-5);
        assert_eq!(pad.angular_velocity(), -0.5);

        pad.rotate(0.0);
        assert_eq!(pad.angular_velocity(), 0.0);
    }

    #[test]
    fn test_new_normalizes_start() {
        let brick = BrickCollider::new(10.0, 3, 4.0, 0.0);
        assert!(brick.angle_start() <= PI && brick.angle_start() > -PI);
    }

    #[test]
    fn test_corners() {
        let brick = BrickCollider::new(10.0, 9, 0.0, 0.0);
        let inner_start = brick.corner(Corner::InnerStart);
        assert!((inner_start.x() - 10.0).abs() < 1e-5);
        assert!(inner_start.y().abs() < 1e-5);

        let outer_end = brick.corner(Corner::OuterEnd);
        assert!(outer_end.x().abs() < 1e-4);
        assert!((outer_end.y() + 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_at_follows_rotation() {
        let mut pad = BrickCollider::new(10.0, 6, 0.0, 0.0);
        assert_eq!(pad.velocity_at(Vector::new([10.0, 0.0, 0.0])), Vector::zero());

        pad.rotate(0.05);
        let v = pad.velocity_at(Vector::new([10.0, 0.0, 0.0]));
        // Counter-clockwise rotation at angle 0 moves points toward +z
        assert!(v.y() > 0.49 && v.y() < 0.51);
        assert!(v.x().abs() < 0.02);
    }
}
