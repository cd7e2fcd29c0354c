//! Radial Breakout - balls, pads and bricks in a circular arena
//!
//! Core modules:
//! - `geometry`: Small fixed-size vector and matrix algebra
//! - `sim`: Colliders, collision response and the per-tick arena simulation
//! - `settings`: Data-driven arena configuration
//! - `error`: Error types for the few fallible operations
//!
//! All motion happens in the XZ plane. Collision math projects positions to
//! `(x, z)` and works in polar coordinates around the arena center.

pub mod error;
pub mod geometry;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, GeometryError};
pub use geometry::{Matrix, Vector};
pub use settings::ArenaConfig;

/// Arena tessellation and physics constants
pub mod consts {
    use std::f32::consts::TAU;

    /// Number of radial segments the arena is divided into
    pub const SEGMENTS: u32 = 36;
    /// Radius of the arena's outer wall
    pub const ARENA_RADIUS: f32 = 40.0;
    /// Angular step of one segment. Negative: wedges extend clockwise from their start angle.
    pub const ANGLE: f32 = -TAU / SEGMENTS as f32;

    /// Radial thickness of bricks and pads
    pub const BRICK_WIDTH: f32 = 3.0;
    /// Vertical extent of bricks and pads
    pub const BRICK_HEIGHT: f32 = 3.0;

    /// Pads sit three quarters of the way out
    pub const PAD_DISTANCE: f32 = ARENA_RADIUS * 3.0 / 4.0;
    pub const PAD_SEGMENTS: u32 = SEGMENTS / 6;
    /// Innermost brick row
    pub const BRICK_DISTANCE: f32 = ARENA_RADIUS / 4.0;
    pub const BRICK_SEGMENTS: u32 = SEGMENTS / 12;

    /// Density used to derive ball mass from its radius
    pub const BALL_DENSITY: f32 = 11.34;

    /// Accepted gap when settling a ball against a wall
    pub const CONTACT_TOLERANCE: f32 = 0.1;
    /// Upper bound on halvings when settling a ball against a wall
    pub const MAX_REFINE_ITERATIONS: u32 = 256;

    /// Share of a moving wedge's velocity a ball picks up while inside the wedge's ring
    pub const RING_MOVEMENT_MULTIPLIER: f32 = 1.1;
    /// Share of a moving wedge's velocity a ball picks up elsewhere
    pub const EDGE_MOVEMENT_MULTIPLIER: f32 = 0.2;
    /// Applied to a ball's velocity each step while it is over its speed limit
    pub const VELOCITY_DAMPING: f32 = 0.9;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, z)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vector<2> {
    Vector::new([r * theta.cos(), r * theta.sin()])
}

/// Convert cartesian (x, z) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vector<2>) -> (f32, f32) {
    (pos.magnitude(), pos.y().atan2(pos.x()))
}
