//! Ball collider: detection and response against every other collider
//!
//! All collision math happens in the horizontal plane. Positions are projected
//! to `(x, z)` with [`Vector::to2`] and lifted back with the ball's own Y, and
//! velocities always come back with `y = 0`. Radial tests use the planar
//! distance from the arena axis, so a ball's height never changes a contact.
//!
//! Contact with a wall is not solved exactly. The ball is walked back and
//! forth along its velocity with halving steps until it sits within
//! [`CONTACT_TOLERANCE`] of the surface (at most [`MAX_REFINE_ITERATIONS`]
//! steps). Callers must tolerate a small residual overlap.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::bounds::BoundsCollider;
use super::brick::{BrickCollider, Corner};
use crate::cartesian_to_polar;
use crate::consts::*;
use crate::geometry::Vector;

/// Where a ball touches a wedge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WedgeContact {
    /// One of the four corner points
    Corner(Corner),
    /// Radial edge at `angle_start`
    StartWall,
    /// Radial edge at `angle_end`
    EndWall,
    /// Outer arc
    OuterWall,
    /// Inner arc
    InnerWall,
}

impl WedgeContact {
    /// True for contacts that happen outside the wedge's angular span
    pub const fn is_side(&self) -> bool {
        matches!(self, Self::Corner(_) | Self::StartWall | Self::EndWall)
    }
}

/// A moving ball
#[derive(Debug, Clone, PartialEq)]
pub struct BallCollider {
    position: Vector<3>,
    velocity: Vector<3>,
    radius: f32,
    mass: f32,
    max_velocity: f32,
}

impl BallCollider {
    /// Create a ball with no speed limit. Mass follows from the radius.
    pub fn new(position: Vector<3>, velocity: Vector<3>, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            mass: 4.0 * PI * radius * radius * radius * BALL_DENSITY / 3.0,
            max_velocity: f32::INFINITY,
        }
    }

    /// Speed above which [`BallCollider::step`] starts damping
    pub const fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    #[inline]
    pub const fn position(&self) -> Vector<3> {
        self.position
    }

    #[inline]
    pub const fn velocity(&self) -> Vector<3> {
        self.velocity
    }

    #[inline]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub const fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub const fn max_velocity(&self) -> f32 {
        self.max_velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector<3>) {
        self.velocity = velocity;
    }

    /// Advance by one tick. Over the speed limit the velocity is damped
    /// rather than clamped.
    pub fn step(&mut self) {
        self.position += self.velocity;
        if self.velocity.magnitude() > self.max_velocity {
            self.velocity *= VELOCITY_DAMPING;
        }
    }

    // === Detection ===

    /// Centers closer than the sum of radii. Touching does not count.
    pub fn did_collide_ball(&self, other: &BallCollider) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }

    /// Leading edge past the wall
    pub fn did_collide_bounds(&self, bounds: &BoundsCollider) -> bool {
        self.position.to2().magnitude() > bounds.radius() - self.radius
    }

    pub fn did_collide_brick(&self, wedge: &BrickCollider) -> bool {
        self.wedge_contact(wedge).is_some()
    }

    /// Classify how the ball touches `wedge`, if at all.
    ///
    /// Outside the wedge's angular span only the nearest side wall (or its
    /// corners) can be hit; inside it only the outer or inner arc. A ball
    /// whose center lies inside the wedge itself reports no contact.
    pub fn wedge_contact(&self, wedge: &BrickCollider) -> Option<WedgeContact> {
        let p = self.position.to2();
        let (mag, theta) = cartesian_to_polar(p);

        if mag > wedge.outer_radius() + self.radius || mag < wedge.inner_radius() - self.radius {
            return None;
        }

        let (start, end) = align_wedge(theta, wedge.angle_start(), wedge.angle_end());

        if theta > start {
            self.side_contact(p, mag, theta - start, start, wedge, Side::Start)
        } else if theta < end {
            self.side_contact(p, mag, end - theta, end, wedge, Side::End)
        } else if mag > wedge.outer_radius() {
            (mag - wedge.outer_radius() < self.radius).then_some(WedgeContact::OuterWall)
        } else if mag < wedge.inner_radius() {
            (wedge.inner_radius() - mag < self.radius).then_some(WedgeContact::InnerWall)
        } else {
            None
        }
    }

    fn side_contact(
        &self,
        p: Vector<2>,
        mag: f32,
        angle_diff: f32,
        wall_angle: f32,
        wedge: &BrickCollider,
        side: Side,
    ) -> Option<WedgeContact> {
        // Beyond the ring only the corner can be reached
        if mag > wedge.outer_radius() {
            let corner = side.outer_corner();
            return (p.distance(wedge.corner(corner)) < self.radius)
                .then_some(WedgeContact::Corner(corner));
        }
        if mag < wedge.inner_radius() {
            let corner = side.inner_corner();
            return (p.distance(wedge.corner(corner)) < self.radius)
                .then_some(WedgeContact::Corner(corner));
        }

        // The infinite wall line also passes the far side of the arena
        if angle_diff >= FRAC_PI_2 {
            return None;
        }

        let line = Vector::new([wall_angle.cos(), wall_angle.sin()]);
        let distance = (p - line * p.dot(line)).magnitude();
        (distance < self.radius).then_some(side.wall())
    }

    // === Response ===

    /// Elastic collision with another ball, solved per axis in the plane.
    /// Both balls are rewound one step before taking their new velocities.
    pub fn collide_ball(&mut self, other: &mut BallCollider) -> bool {
        if !self.did_collide_ball(other) {
            return false;
        }

        let (m1, m2) = (self.mass, other.mass);
        let total = m1 + m2;
        let (v1, v2) = (self.velocity, other.velocity);

        let vx1 = (v1.x() * (m1 - m2) + 2.0 * m2 * v2.x()) / total;
        let vz1 = (v1.z() * (m1 - m2) + 2.0 * m2 * v2.z()) / total;
        let vx2 = (v2.x() * (m2 - m1) + 2.0 * m1 * v1.x()) / total;
        let vz2 = (v2.z() * (m2 - m1) + 2.0 * m1 * v1.z()) / total;

        self.position -= self.velocity;
        other.position -= other.velocity;

        self.velocity = Vector::new([vx1, 0.0, vz1]);
        other.velocity = Vector::new([vx2, 0.0, vz2]);

        log::trace!("ball-ball at {} / {}", self.position, other.position);
        true
    }

    /// Bounce off the outer wall: rewind one step and reflect about the
    /// inward normal. Returns whether the ball was past the wall.
    pub fn collide_bounds(&mut self, bounds: &BoundsCollider) -> bool {
        if !self.did_collide_bounds(bounds) {
            return false;
        }

        let normal = self.position.to2().inverted().normalized();
        self.position -= self.velocity;
        self.velocity = reflect(self.velocity.to2(), normal).to3();
        log::trace!("ball-bounds at {}", self.position);
        true
    }

    /// Bounce off a brick or pad. Returns whether the ball touched it.
    ///
    /// The wedge's motion over the last tick is added to the ball's velocity,
    /// scaled by [`RING_MOVEMENT_MULTIPLIER`] when the ball is within the ring
    /// and [`EDGE_MOVEMENT_MULTIPLIER`] otherwise. Within the ring or past a
    /// side wall the ball's position is also carried along with the wedge.
    pub fn collide_brick(&mut self, wedge: &BrickCollider) -> bool {
        let Some(contact) = self.wedge_contact(wedge) else {
            return false;
        };

        let p = self.position.to2();
        let within_ring = wedge.ring_contains(p.magnitude());
        let normal = contact_normal(contact, wedge, p);

        let radius = self.radius;
        self.settle(normal, |pos| contact_gap(contact, wedge, pos) - radius);
        self.velocity = reflect(self.velocity.to2(), normal).to3();

        let wedge_velocity = wedge.velocity_at(self.position);
        let multiplier = if within_ring {
            RING_MOVEMENT_MULTIPLIER
        } else {
            EDGE_MOVEMENT_MULTIPLIER
        };
        self.velocity += (wedge_velocity * multiplier).to3();
        if within_ring || contact.is_side() {
            self.position += wedge_velocity.to3();
        }

        log::trace!("ball-wedge {contact:?} at {}", self.position);
        true
    }

    /// Walk the ball along its velocity line until `gap` (signed distance to
    /// the surface, negative when overlapping) is within tolerance. Backing
    /// off always moves away from the surface with outward `normal`.
    fn settle(&mut self, normal: Vector<2>, gap: impl Fn(Vector<2>) -> f32) {
        let mut position = self.position.to2();
        let velocity = self.velocity.to2();
        let mut step = if velocity.dot(normal) > 0.0 {
            velocity.inverted()
        } else {
            velocity
        };

        for _ in 0..MAX_REFINE_ITERATIONS {
            let g = gap(position);
            if g.abs() <= CONTACT_TOLERANCE || step.magnitude_squared() == 0.0 {
                break;
            }
            if g < 0.0 {
                position -= step;
            } else {
                position += step;
            }
            step = step * 0.5;
        }

        self.position = position.to3().with_y(self.position.y());
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Start,
    End,
}

impl Side {
    const fn outer_corner(self) -> Corner {
        match self {
            Side::Start => Corner::OuterStart,
            Side::End => Corner::OuterEnd,
        }
    }

    const fn inner_corner(self) -> Corner {
        match self {
            Side::Start => Corner::InnerStart,
            Side::End => Corner::InnerEnd,
        }
    }

    const fn wall(self) -> WedgeContact {
        match self {
            Side::Start => WedgeContact::StartWall,
            Side::End => WedgeContact::EndWall,
        }
    }
}

/// Shift a wedge's angular bounds by whole turns so its middle lies within
/// π of `theta`. Keeps the comparison valid for wedges across the ±π seam.
fn align_wedge(theta: f32, mut start: f32, mut end: f32) -> (f32, f32) {
    let mid = 0.5 * (start + end);
    let mut offset = 0.0;
    while mid + offset - theta > PI {
        offset -= TAU;
    }
    while theta - (mid + offset) > PI {
        offset += TAU;
    }
    start += offset;
    end += offset;
    (start, end)
}

/// Unit normal of the touched surface, pointing out of the wedge toward the ball
fn contact_normal(contact: WedgeContact, wedge: &BrickCollider, p: Vector<2>) -> Vector<2> {
    match contact {
        WedgeContact::Corner(corner) => (p - wedge.corner(corner)).normalized(),
        WedgeContact::StartWall => side_normal(wedge.angle_start()),
        WedgeContact::EndWall => side_normal(wedge.angle_end()).inverted(),
        WedgeContact::OuterWall => p.normalized(),
        WedgeContact::InnerWall => p.normalized().inverted(),
    }
}

/// Perpendicular to the radial line at `angle`, toward increasing angles
fn side_normal(angle: f32) -> Vector<2> {
    Vector::new([-angle.sin(), angle.cos()])
}

/// Signed distance from `pos` to the touched surface, positive outside the wedge
fn contact_gap(contact: WedgeContact, wedge: &BrickCollider, pos: Vector<2>) -> f32 {
    match contact {
        WedgeContact::Corner(corner) => pos.distance(wedge.corner(corner)),
        WedgeContact::StartWall => pos.dot(side_normal(wedge.angle_start())),
        WedgeContact::EndWall => -pos.dot(side_normal(wedge.angle_end())),
        WedgeContact::OuterWall => pos.magnitude() - wedge.outer_radius(),
        WedgeContact::InnerWall => wedge.inner_radius() - pos.magnitude(),
    }
}

/// Mirror `velocity` about `normal`: with `u = -v`, `v' = 2(u·n)n - u`
#[inline]
fn reflect(velocity: Vector<2>, normal: Vector<2>) -> Vector<2> {
    let incoming = velocity.inverted();
    2.0 * incoming.dot(normal) * normal - incoming
}
