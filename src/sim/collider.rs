//! Uniform access to every collidable entity in the arena
//!
//! Stepping and drawing code walks all colliders without caring which kind it
//! holds; anything kind-specific matches on the variant.

use super::ball::BallCollider;
use super::bounds::BoundsCollider;
use super::brick::BrickCollider;
use crate::geometry::{Matrix, Vector};

/// Borrowed view of one collider
#[derive(Debug, Clone, Copy)]
pub enum ColliderRef<'a> {
    Ball(&'a BallCollider),
    Bounds(&'a BoundsCollider),
    /// Bricks and pads
    Brick(&'a BrickCollider),
}

/// Mutable view of one collider
#[derive(Debug)]
pub enum ColliderMut<'a> {
    Ball(&'a mut BallCollider),
    Bounds(&'a mut BoundsCollider),
    Brick(&'a mut BrickCollider),
}

impl ColliderRef<'_> {
    /// Model matrix placing the collider's unit mesh in the world.
    ///
    /// Ball meshes are unit spheres, the bounds mesh a unit ring in the XZ
    /// plane, and wedge meshes are built starting at angle 0.
    pub fn model_matrix(&self) -> Matrix<4> {
        let mut model = Matrix::<4>::identity();
        match self {
            Self::Ball(ball) => {
                model
                    .translate(ball.position())
                    .scale(Vector::splat(ball.radius()));
            }
            Self::Bounds(bounds) => {
                model.scale(Vector::new([bounds.radius(), 1.0, bounds.radius()]));
            }
            Self::Brick(brick) => {
                model
                    .translate(Vector::new([0.0, brick.height(), 0.0]))
                    .rotate(-brick.angle_start(), Vector::new([0.0, 1.0, 0.0]));
            }
        }
        model
    }
}

impl<'a> From<&'a BallCollider> for ColliderRef<'a> {
    fn from(ball: &'a BallCollider) -> Self {
        Self::Ball(ball)
    }
}

impl<'a> From<&'a BoundsCollider> for ColliderRef<'a> {
    fn from(bounds: &'a BoundsCollider) -> Self {
        Self::Bounds(bounds)
    }
}

impl<'a> From<&'a BrickCollider> for ColliderRef<'a> {
    fn from(brick: &'a BrickCollider) -> Self {
        Self::Brick(brick)
    }
}
