//! Deterministic simulation module
//!
//! All collision and gameplay logic lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bounds, pads, bricks, balls)
//! - No rendering or platform dependencies

pub mod ball;
pub mod bounds;
pub mod brick;
pub mod collider;
pub mod state;
pub mod tick;

pub use ball::{BallCollider, WedgeContact};
pub use bounds::BoundsCollider;
pub use brick::{BrickCollider, Corner};
pub use collider::{ColliderMut, ColliderRef};
pub use state::{Arena, GamePhase, StepReport};
pub use tick::{TickInput, tick};
