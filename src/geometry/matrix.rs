//! Fixed-size square matrices
//!
//! Storage is column-major and indexing reads `m[col][row]`. Matrices act on
//! column vectors: `m * v`. Composition helpers on `Matrix<4>` multiply the
//! new transform on the right, so the last one applied is the first one a
//! vector sees.

use std::array;
use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

use super::Vector;
use crate::error::GeometryError;

/// An N×N matrix of `f32`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const N: usize> {
    cols: [[f32; N]; N],
}

impl<const N: usize> Matrix<N> {
    /// Every entry set to `value`
    #[inline]
    pub const fn splat(value: f32) -> Self {
        Self {
            cols: [[value; N]; N],
        }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::splat(0.0)
    }

    pub fn identity() -> Self {
        Self {
            cols: array::from_fn(|c| array::from_fn(|r| if c == r { 1.0 } else { 0.0 })),
        }
    }

    #[inline]
    pub const fn from_cols(cols: [[f32; N]; N]) -> Self {
        Self { cols }
    }

    pub fn from_rows(rows: [[f32; N]; N]) -> Self {
        Self {
            cols: array::from_fn(|c| array::from_fn(|r| rows[r][c])),
        }
    }

    /// Build from a row-major list of `N * N` values
    pub fn from_slice(values: &[f32]) -> Result<Self, GeometryError> {
        if values.len() != N * N {
            return Err(GeometryError::size_mismatch(values.len(), N * N));
        }
        Ok(Self {
            cols: array::from_fn(|c| array::from_fn(|r| values[r * N + c])),
        })
    }

    #[inline]
    pub fn col(&self, col: usize) -> Vector<N> {
        Vector::new(self.cols[col])
    }

    #[inline]
    pub fn row(&self, row: usize) -> Vector<N> {
        Vector::new(array::from_fn(|c| self.cols[c][row]))
    }

    pub fn transpose(&mut self) -> &mut Self {
        *self = self.transposed();
        self
    }

    pub fn transposed(&self) -> Self {
        Self {
            cols: array::from_fn(|c| array::from_fn(|r| self.cols[r][c])),
        }
    }

    /// Determinant of the submatrix left after removing `row` and `column`
    pub fn minor(&self, row: usize, column: usize) -> f32 {
        let sub = submatrix(&self.row_major(), N, row, column);
        laplace_determinant(&sub, N - 1)
    }

    /// Matrix of all minors, entry `(r, c)` being `minor(r, c)`
    pub fn minors(&self) -> Self {
        Self {
            cols: array::from_fn(|c| array::from_fn(|r| self.minor(r, c))),
        }
    }

    /// Apply the checkerboard of signs in place
    pub fn cofactor(&mut self) -> &mut Self {
        for (c, col) in self.cols.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                if (c + r) % 2 == 1 {
                    *v = -*v;
                }
            }
        }
        self
    }

    /// Cofactor matrix
    pub fn cofactors(&self) -> Self {
        let mut out = self.minors();
        out.cofactor();
        out
    }

    pub fn adjugate(&self) -> Self {
        self.cofactors().transposed()
    }

    pub fn determinant(&self) -> f32 {
        laplace_determinant(&self.row_major(), N)
    }

    /// Invert in place as `adjugate / determinant`.
    ///
    /// A singular matrix is not rejected: the division produces non-finite
    /// entries. Use [`Matrix::checked_inverse`] when the input is not known to be
    /// well conditioned.
    pub fn invert(&mut self) -> &mut Self {
        *self = self.adjugate() / self.determinant();
        self
    }

    pub fn inverted(&self) -> Self {
        let mut out = *self;
        out.invert();
        out
    }

    /// Inverse, or [`GeometryError::SingularMatrix`] when the determinant is
    /// zero or not finite
    pub fn checked_inverse(&self) -> Result<Self, GeometryError> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(GeometryError::SingularMatrix(det));
        }
        Ok(self.adjugate() / det)
    }

    fn row_major(&self) -> Vec<f32> {
        (0..N)
            .flat_map(|r| self.cols.iter().map(move |col| col[r]))
            .collect()
    }
}

/// Copy of a row-major `size`×`size` matrix without one row and one column
fn submatrix(values: &[f32], size: usize, row: usize, column: usize) -> Vec<f32> {
    (0..size)
        .filter(|&r| r != row)
        .flat_map(|r| {
            (0..size)
                .filter(move |&c| c != column)
                .map(move |c| values[r * size + c])
        })
        .collect()
}

/// Laplace expansion along the first row. Sizes below 3 are computed directly.
fn laplace_determinant(values: &[f32], size: usize) -> f32 {
    match size {
        0 => 1.0,
        1 => values[0],
        2 => values[0] * values[3] - values[1] * values[2],
        _ => (0..size)
            .map(|column| {
                let sign = if column % 2 == 0 { 1.0 } else { -1.0 };
                let minor = laplace_determinant(&submatrix(values, size, 0, column), size - 1);
                sign * values[column] * minor
            })
            .sum(),
    }
}

impl Matrix<3> {
    /// Rodrigues rotation of `angle` radians about `axis` (normalized here):
    /// `R = I·cosθ + (a⊗a)(1 − cosθ) + [a]×·sinθ`
    pub fn rotation(angle: f32, axis: Vector<3>) -> Self {
        let axis = axis.normalized();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let [x, y, z] = axis.to_array();
        Self::from_rows([
            [c + t * x * x, t * x * y - s * z, t * x * z + s * y],
            [t * x * y + s * z, c + t * y * y, t * y * z - s * x],
            [t * x * z - s * y, t * y * z + s * x, c + t * z * z],
        ])
    }
}

impl From<Matrix<3>> for Matrix<4> {
    /// Embed a linear 3×3 transform in the upper-left corner
    fn from(m: Matrix<3>) -> Self {
        let mut out = Self::identity();
        for c in 0..3 {
            for r in 0..3 {
                out.cols[c][r] = m.cols[c][r];
            }
        }
        out
    }
}

impl Matrix<4> {
    pub fn translate(&mut self, offset: Vector<3>) -> &mut Self {
        let mut translation = Self::identity();
        translation[3][0] = offset.x();
        translation[3][1] = offset.y();
        translation[3][2] = offset.z();
        *self = *self * translation;
        self
    }

    pub fn rotate(&mut self, angle: f32, axis: Vector<3>) -> &mut Self {
        *self = *self * Self::from(Matrix::<3>::rotation(angle, axis));
        self
    }

    pub fn scale(&mut self, factors: Vector<3>) -> &mut Self {
        let mut scale = Self::identity();
        scale[0][0] = factors.x();
        scale[1][1] = factors.y();
        scale[2][2] = factors.z();
        *self = *self * scale;
        self
    }

    /// Transform a point (w = 1)
    pub fn transform_point(&self, point: Vector<3>) -> Vector<3> {
        (*self * point.to4(1.0)).to3()
    }
}

impl<const N: usize> Default for Matrix<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> TryFrom<&[f32]> for Matrix<N> {
    type Error = GeometryError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

impl<const N: usize> Index<usize> for Matrix<N> {
    type Output = [f32; N];

    #[inline]
    fn index(&self, col: usize) -> &[f32; N] {
        &self.cols[col]
    }
}

impl<const N: usize> IndexMut<usize> for Matrix<N> {
    #[inline]
    fn index_mut(&mut self, col: usize) -> &mut [f32; N] {
        &mut self.cols[col]
    }
}

impl<const N: usize> Add for Matrix<N> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            cols: array::from_fn(|c| array::from_fn(|r| self.cols[c][r] + rhs.cols[c][r])),
        }
    }
}

impl<const N: usize> Sub for Matrix<N> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            cols: array::from_fn(|c| array::from_fn(|r| self.cols[c][r] - rhs.cols[c][r])),
        }
    }
}

impl<const N: usize> Mul for Matrix<N> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            cols: array::from_fn(|c| {
                array::from_fn(|r| (0..N).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum())
            }),
        }
    }
}

impl<const N: usize> Mul<Vector<N>> for Matrix<N> {
    type Output = Vector<N>;
    fn mul(self, rhs: Vector<N>) -> Vector<N> {
        Vector::new(array::from_fn(|r| {
            (0..N).map(|c| self.cols[c][r] * rhs[c]).sum()
        }))
    }
}

impl<const N: usize> Mul<f32> for Matrix<N> {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self {
            cols: self.cols.map(|col| col.map(|v| v * rhs)),
        }
    }
}

impl<const N: usize> Div<f32> for Matrix<N> {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self {
            cols: self.cols.map(|col| col.map(|v| v / rhs)),
        }
    }
}

impl<const N: usize> fmt::Display for Matrix<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for r in 0..N {
            write!(f, "{{ ")?;
            for c in 0..N {
                let sep = if c + 1 < N { ", " } else { " " };
                write!(f, "{}{sep}", self.cols[c][r])?;
            }
            write!(f, "}}{}", if r + 1 < N { ", " } else { " " })?;
        }
        write!(f, "}}")
    }
}

impl From<Matrix<4>> for glam::Mat4 {
    fn from(m: Matrix<4>) -> Self {
        glam::Mat4::from_cols_array_2d(&m.cols)
    }
}

impl From<glam::Mat4> for Matrix<4> {
    fn from(m: glam::Mat4) -> Self {
        Self::from_cols(m.to_cols_array_2d())
    }
}

impl From<Matrix<3>> for glam::Mat3 {
    fn from(m: Matrix<3>) -> Self {
        glam::Mat3::from_cols_array_2d(&m.cols)
    }
}

impl From<glam::Mat3> for Matrix<3> {
    fn from(m: glam::Mat3) -> Self {
        Self::from_cols(m.to_cols_array_2d())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_matrix_close<const N: usize>(a: &Matrix<N>, b: &Matrix<N>, tol: f32) {
        for c in 0..N {
            for r in 0..N {
                assert!(
                    (a[c][r] - b[c][r]).abs() <= tol,
                    "entry [{c}][{r}] differs:\n{a}\n{b}"
                );
            }
        }
    }

    fn sample3() -> Matrix<3> {
        Matrix::from_rows([[2.0, -1.0, 0.5], [1.0, 3.0, 2.0], [0.0, 1.0, 4.0]])
    }

    fn sample4() -> Matrix<4> {
        Matrix::from_rows([
            [4.0, 1.0, 0.0, 2.0],
            [1.0, 3.0, -1.0, 0.0],
            [0.0, 2.0, 5.0, 1.0],
            [1.0, 0.0, 1.0, 2.0],
        ])
    }

    #[test]
    fn test_indexing_is_column_row() {
        let m = Matrix::<2>::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m[0][0], 1.0);
        assert_eq!(m[1][0], 2.0);
        assert_eq!(m[0][1], 3.0);
        assert_eq!(m[1][1], 4.0);
        assert_eq!(m.row(0), Vector::new([1.0, 2.0]));
        assert_eq!(m.col(0), Vector::new([1.0, 3.0]));
    }

    #[test]
    fn test_from_slice_size_mismatch() {
        let err = Matrix::<3>::from_slice(&[1.0; 4]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: Can't initialize with list of size 4. Size must be 9."
        );
        assert!(Matrix::<2>::try_from(&[0.0; 4][..]).is_ok());
    }

    #[test]
    fn test_identity_and_arithmetic() {
        let m = sample3();
        assert_eq!(m * Matrix::identity(), m);
        assert_eq!(Matrix::identity() * m, m);
        assert_eq!(m + m, m * 2.0);
        assert_eq!(m - m, Matrix::zero());
        assert_eq!((m * 4.0) / 2.0, m + m);
        assert_eq!(Matrix::<3>::splat(1.0)[2][1], 1.0);
    }

    #[test]
    fn test_transpose() {
        let mut m = sample3();
        let t = m.transposed();
        assert_eq!(t.row(0), m.col(0));
        m.transpose();
        assert_eq!(m, t);
    }

    #[test]
    fn test_determinant() {
        let m2 = Matrix::<2>::from_rows([[3.0, 8.0], [4.0, 6.0]]);
        assert_eq!(m2.determinant(), -14.0);

        let m3 = sample3();
        let expected = glam::Mat3::from(m3).determinant();
        assert!((m3.determinant() - expected).abs() < 1e-4);

        let m4 = sample4();
        let expected = glam::Mat4::from(m4).determinant();
        assert!((m4.determinant() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_minor_and_cofactor() {
        let m = sample3();
        // Remove row 0 and column 0: [[3, 2], [1, 4]]
        assert_eq!(m.minor(0, 0), 10.0);
        // Remove row 1 and column 2: [[2, -1], [0, 1]]
        assert_eq!(m.minor(1, 2), 2.0);
        let cof = m.cofactors();
        assert_eq!(cof[2][1], -2.0);
        assert_eq!(cof[0][0], 10.0);
    }

    #[test]
    fn test_inverse_gives_identity() {
        let m3 = sample3();
        assert_matrix_close(&(m3 * m3.inverted()), &Matrix::identity(), 1e-5);

        let m4 = sample4();
        assert_matrix_close(&(m4 * m4.inverted()), &Matrix::identity(), 1e-5);
        assert_matrix_close(
            &m4.inverted(),
            &Matrix::from(glam::Mat4::from(m4).inverse()),
            1e-5,
        );
    }

    #[test]
    fn test_singular_inverse() {
        let singular = Matrix::<3>::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert!(matches!(
            singular.checked_inverse(),
            Err(GeometryError::SingularMatrix(_))
        ));
        // The unchecked path propagates non-finite values
        let inv = singular.inverted();
        assert!(!inv[0][0].is_finite());

        assert!(sample3().checked_inverse().is_ok());
    }

    #[test]
    fn test_rotation_matches_glam() {
        let axis = Vector::new([1.0, 2.0, -0.5]);
        let ours = Matrix::<3>::rotation(0.9, axis);
        let theirs = glam::Mat3::from_axis_angle(glam::Vec3::from(axis.normalized()), 0.9);
        assert_matrix_close(&ours, &Matrix::from(theirs), 1e-5);
    }

    #[test]
    fn test_rotation_inverse_is_transpose() {
        let r = Matrix::<3>::rotation(1.3, Vector::new([0.3, 1.0, 0.2]));
        assert_matrix_close(&r.inverted(), &r.transposed(), 1e-5);
    }

    #[test]
    fn test_translate_rotate_scale() {
        let mut m = Matrix::<4>::identity();
        m.translate(Vector::new([1.0, 2.0, 3.0]))
            .rotate(FRAC_PI_2, Vector::new([0.0, 1.0, 0.0]))
            .scale(Vector::splat(2.0));

        let expected = glam::Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0))
            * glam::Mat4::from_rotation_y(FRAC_PI_2)
            * glam::Mat4::from_scale(glam::Vec3::splat(2.0));
        assert_matrix_close(&m, &Matrix::from(expected), 1e-5);

        let p = m.transform_point(Vector::new([1.0, 0.0, 0.0]));
        assert!((p.x() - 1.0).abs() < 1e-5);
        assert!((p.y() - 2.0).abs() < 1e-5);
        assert!((p.z() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_matrix_vector_product() {
        let m = Matrix::<2>::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m * Vector::new([1.0, 1.0]), Vector::new([3.0, 7.0]));
    }

    #[test]
    fn test_display() {
        let m = Matrix::<2>::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m.to_string(), "{ { 1, 2 }, { 3, 4 } }");
    }
}
