//! Fixed-size vectors
//!
//! `Vector<N>` is a plain value type over `[f32; N]`. Arithmetic is
//! elementwise and never changes the dimension; the `to2`/`to3`/`to4`
//! projections are the only way to move between dimensions.

use std::array;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use super::Matrix;
use crate::error::GeometryError;

/// An N-dimensional vector of `f32`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize> {
    data: [f32; N],
}

impl<const N: usize> Vector<N> {
    #[inline]
    pub const fn new(data: [f32; N]) -> Self {
        Self { data }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { data: [0.0; N] }
    }

    /// Every component set to `value`
    #[inline]
    pub const fn splat(value: f32) -> Self {
        Self { data: [value; N] }
    }

    /// Build from an untyped list, failing when its length is not `N`
    pub fn from_slice(values: &[f32]) -> Result<Self, GeometryError> {
        let data: [f32; N] = values
            .try_into()
            .map_err(|_| GeometryError::size_mismatch(values.len(), N))?;
        Ok(Self { data })
    }

    #[inline]
    pub const fn to_array(self) -> [f32; N] {
        self.data
    }

    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(*self)
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Scale to unit length in place. A zero vector is left untouched.
    pub fn normalize(&mut self) -> &mut Self {
        let mag = self.magnitude();
        if mag != 0.0 {
            for v in &mut self.data {
                *v /= mag;
            }
        }
        self
    }

    #[inline]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Flip every component in place
    pub fn invert(&mut self) -> &mut Self {
        for v in &mut self.data {
            *v = -*v;
        }
        self
    }

    #[inline]
    pub fn inverted(self) -> Self {
        -self
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.data.iter().zip(other.data.iter()).map(|(a, b)| a * b).sum()
    }

    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).magnitude()
    }
}

impl Vector<2> {
    #[inline]
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    #[inline]
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// Rotate counter-clockwise by `angle` radians
    pub fn rotated(self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([self.x() * c - self.y() * s, self.x() * s + self.y() * c])
    }

    /// Lift a planar `(x, z)` vector back into 3D with `y = 0`
    #[inline]
    pub const fn to3(self) -> Vector<3> {
        Vector::new([self.data[0], 0.0, self.data[1]])
    }

    /// Lift a planar `(x, z)` vector into homogeneous coordinates with `y = 0`
    #[inline]
    pub const fn to4(self, w: f32) -> Vector<4> {
        Vector::new([self.data[0], 0.0, self.data[1], w])
    }
}

impl Vector<3> {
    #[inline]
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    #[inline]
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    #[inline]
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    /// Same vector with its Y component replaced
    #[inline]
    pub const fn with_y(mut self, y: f32) -> Self {
        self.data[1] = y;
        self
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new([
            self.y() * other.z() - other.y() * self.z(),
            self.z() * other.x() - other.z() * self.x(),
            self.x() * other.y() - other.x() * self.y(),
        ])
    }

    /// Rotate in place by `angle` radians about `axis` (right-handed)
    pub fn rotate(&mut self, angle: f32, axis: Self) -> &mut Self {
        *self = Matrix::<3>::rotation(angle, axis) * *self;
        self
    }

    #[inline]
    pub fn rotated(mut self, angle: f32, axis: Self) -> Self {
        self.rotate(angle, axis);
        self
    }

    /// Project onto the horizontal plane, keeping `(x, z)`
    #[inline]
    pub const fn to2(self) -> Vector<2> {
        Vector::new([self.data[0], self.data[2]])
    }

    #[inline]
    pub const fn to4(self, w: f32) -> Vector<4> {
        Vector::new([self.data[0], self.data[1], self.data[2], w])
    }
}

impl Vector<4> {
    #[inline]
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    #[inline]
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    #[inline]
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    #[inline]
    pub const fn w(&self) -> f32 {
        self.data[3]
    }

    #[inline]
    pub const fn to3(self) -> Vector<3> {
        Vector::new([self.data[0], self.data[1], self.data[2]])
    }

    #[inline]
    pub const fn to2(self) -> Vector<2> {
        Vector::new([self.data[0], self.data[2]])
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<[f32; N]> for Vector<N> {
    fn from(data: [f32; N]) -> Self {
        Self { data }
    }
}

impl<const N: usize> TryFrom<&[f32]> for Vector<N> {
    type Error = GeometryError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.data[index]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.data[index]
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

// Elementwise vector arithmetic

impl<const N: usize> Add for Vector<N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(array::from_fn(|i| self.data[i] + rhs.data[i]))
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(array::from_fn(|i| self.data[i] - rhs.data[i]))
    }
}

impl<const N: usize> Mul for Vector<N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(array::from_fn(|i| self.data[i] * rhs.data[i]))
    }
}

impl<const N: usize> Div for Vector<N> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(array::from_fn(|i| self.data[i] / rhs.data[i]))
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(self.data.map(|v| -v))
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const N: usize> SubAssign for Vector<N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

// Scalar arithmetic

impl<const N: usize> Add<f32> for Vector<N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: f32) -> Self {
        Self::new(self.data.map(|v| v + rhs))
    }
}

impl<const N: usize> Sub<f32> for Vector<N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: f32) -> Self {
        Self::new(self.data.map(|v| v - rhs))
    }
}

impl<const N: usize> Mul<f32> for Vector<N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.data.map(|v| v * rhs))
    }
}

impl<const N: usize> Mul<Vector<N>> for f32 {
    type Output = Vector<N>;
    #[inline]
    fn mul(self, rhs: Vector<N>) -> Vector<N> {
        rhs * self
    }
}

impl<const N: usize> Div<f32> for Vector<N> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self::new(self.data.map(|v| v / rhs))
    }
}

impl<const N: usize> MulAssign<f32> for Vector<N> {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

// glam interop for rendering hosts

impl From<Vector<2>> for glam::Vec2 {
    fn from(v: Vector<2>) -> Self {
        glam::Vec2::from_array(v.data)
    }
}

impl From<glam::Vec2> for Vector<2> {
    fn from(v: glam::Vec2) -> Self {
        Self::new(v.to_array())
    }
}

impl From<Vector<3>> for glam::Vec3 {
    fn from(v: Vector<3>) -> Self {
        glam::Vec3::from_array(v.data)
    }
}

impl From<glam::Vec3> for Vector<3> {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.to_array())
    }
}

impl From<Vector<4>> for glam::Vec4 {
    fn from(v: Vector<4>) -> Self {
        glam::Vec4::from_array(v.data)
    }
}

impl From<glam::Vec4> for Vector<4> {
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.to_array())
    }
}
