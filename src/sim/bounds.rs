//! Outer arena wall

/// The circular wall enclosing the arena, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsCollider {
    radius: f32,
}

impl BoundsCollider {
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }

    #[inline]
    pub const fn radius(&self) -> f32 {
        self.radius
    }
}
