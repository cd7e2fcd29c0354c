//! Minimal vector and matrix algebra
//!
//! Value types only, no allocation in the hot paths. Collision code uses
//! `Vector<2>` for planar math and `Vector<3>` for stored state; `Matrix`
//! backs rotation and the model transforms handed to renderers.

pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
