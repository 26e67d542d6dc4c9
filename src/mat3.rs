use std::fmt;
use std::ops::{Index, IndexMut, Mul};

use crate::error::{XformError, XformResult};
use crate::vec3::Vector3;

/// Determinant magnitude below which [`Transform3x3::inverse`] refuses.
///
/// Fixed, not scale-relative: a uniform scale of 0.01 has a determinant of
/// 1e-4 and inverts, a uniform scale of 0.0005 (det 2.5e-7) is rejected even
/// though it is invertible in exact arithmetic.
pub const SINGULAR_EPSILON: f32 = 1e-6;

/// A 3x3 matrix over homogeneous 2D coordinates.
///
/// Stored as three row vectors. Composition reads right to left: in
/// `a * b` the matrix `b` acts on a point first, then `a`. A pivot rotation
/// about `q` is therefore `translate(q) * rotate(t) * translate(-q)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform3x3 {
    // Row-major.
    rows: [Vector3; 3],
}

impl Transform3x3 {
    pub const ZERO: Self = Self::from_rows(Vector3::ZERO, Vector3::ZERO, Vector3::ZERO);

    pub const IDENTITY: Self = Self::from_rows(
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    );

    pub const fn from_rows(r0: Vector3, r1: Vector3, r2: Vector3) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// `x' = x + dx`, `y' = y + dy`.
    pub const fn translate(dx: f32, dy: f32) -> Self {
        Self::from_rows(
            Vector3::new(1.0, 0.0, dx),
            Vector3::new(0.0, 1.0, dy),
            Vector3::new(0.0, 0.0, 1.0),
        )
    }

    /// Translation by the `x, y` of `v`; `v.z` is ignored.
    pub const fn translate_by(v: Vector3) -> Self {
        Self::translate(v.x, v.y)
    }

    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::from_rows(
            Vector3::new(sx, 0.0, 0.0),
            Vector3::new(0.0, sy, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
    }

    /// Counter-clockwise rotation about the origin. `angle` is in radians
    /// unless `use_degrees` is set.
    pub fn rotate(angle: f32, use_degrees: bool) -> Self {
        let rad = if use_degrees { angle.to_radians() } else { angle };
        let (sin, cos) = rad.sin_cos();
        Self::from_rows(
            Vector3::new(cos, -sin, 0.0),
            Vector3::new(sin, cos, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
    }

    /// Rotation about `pivot` (only its `x, y` are used).
    pub fn rotate_about(pivot: Vector3, angle: f32, use_degrees: bool) -> Self {
        Self::translate_by(pivot) * Self::rotate(angle, use_degrees) * Self::translate_by(-pivot)
    }

    /// Scale about `pivot` (only its `x, y` are used).
    pub fn scale_about(pivot: Vector3, sx: f32, sy: f32) -> Self {
        Self::translate_by(pivot) * Self::scale(sx, sy) * Self::translate_by(-pivot)
    }

    /// `Translate(tx, ty) * self`: the translation acts after this transform.
    #[inline]
    pub fn then_translate(self, tx: f32, ty: f32) -> Self {
        Self::translate(tx, ty) * self
    }

    /// Element at `(row, column)`.
    pub fn get(&self, row: usize, column: usize) -> XformResult<f32> {
        self.row(row)?.get(column)
    }

    pub fn set(&mut self, row: usize, column: usize, value: f32) -> XformResult<()> {
        let r = self.rows.get_mut(row).ok_or(XformError::index(row))?;
        r.set(column, value)
    }

    /// Copy of a row. Mutating the returned vector does not touch the matrix.
    pub fn row(&self, index: usize) -> XformResult<Vector3> {
        self.rows.get(index).copied().ok_or(XformError::index(index))
    }

    pub fn set_row(&mut self, index: usize, row: Vector3) -> XformResult<()> {
        let r = self.rows.get_mut(index).ok_or(XformError::index(index))?;
        *r = row;
        Ok(())
    }

    /// A column gathered into a fresh vector.
    pub fn column(&self, index: usize) -> XformResult<Vector3> {
        if index > 2 {
            return Err(XformError::index(index));
        }
        Ok(self.col(index))
    }

    pub fn set_column(&mut self, index: usize, column: Vector3) -> XformResult<()> {
        if index > 2 {
            return Err(XformError::index(index));
        }
        for (r, row) in self.rows.iter_mut().enumerate() {
            row[index] = column[r];
        }
        Ok(())
    }

    /// Cofactor expansion along row 0.
    pub fn determinant(&self) -> f32 {
        let [a, b, c] = &self.rows;
        a.x * (b.y * c.z - b.z * c.y) - a.y * (b.x * c.z - b.z * c.x)
            + a.z * (b.x * c.y - b.y * c.x)
    }

    /// Adjugate (transposed cofactor matrix) divided by the determinant.
    ///
    /// Fails with [`XformError::NonInvertible`] when
    /// `|det| < SINGULAR_EPSILON`.
    pub fn inverse(&self) -> XformResult<Self> {
        let det = self.determinant();
        if det.abs() < SINGULAR_EPSILON {
            return Err(XformError::NonInvertible { determinant: det });
        }

        let [a, b, c] = &self.rows;
        let cofactors = Self::from_rows(
            Vector3::new(
                b.y * c.z - b.z * c.y,
                -(b.x * c.z - b.z * c.x),
                b.x * c.y - b.y * c.x,
            ),
            Vector3::new(
                -(a.y * c.z - a.z * c.y),
                a.x * c.z - a.z * c.x,
                -(a.x * c.y - a.y * c.x),
            ),
            Vector3::new(
                a.y * b.z - a.z * b.y,
                -(a.x * b.z - a.z * b.x),
                a.x * b.y - a.y * b.x,
            ),
        );
        Ok((1.0 / det) * cofactors.transpose())
    }

    pub fn transpose(&self) -> Self {
        let [a, b, c] = &self.rows;
        Self::from_rows(
            Vector3::new(a.x, b.x, c.x),
            Vector3::new(a.y, b.y, c.y),
            Vector3::new(a.z, b.z, c.z),
        )
    }

    /// Exact comparison against [`IDENTITY`](Self::IDENTITY), no tolerance.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Row-by-column product. `self` is applied *after* `rhs` when the result
    /// transforms a point.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let cols = [rhs.col(0), rhs.col(1), rhs.col(2)];
        let row = |r: &Vector3| Vector3::new(r.dot(&cols[0]), r.dot(&cols[1]), r.dot(&cols[2]));
        Self::from_rows(row(&self.rows[0]), row(&self.rows[1]), row(&self.rows[2]))
    }

    /// Every entry multiplied by `scalar`.
    pub fn scaled(&self, scalar: f32) -> Self {
        let [a, b, c] = self.rows;
        Self::from_rows(a * scalar, b * scalar, c * scalar)
    }

    /// Treats `p` as `(x, y, 1)` and returns the full product, including the
    /// computed homogeneous `z`.
    ///
    /// For matrices built from the generators the bottom row is `(0, 0, 1)`,
    /// so the returned `z` is exactly 1.
    #[inline]
    pub fn transform_point_homogeneous(&self, p: Vector3) -> Vector3 {
        let h = Vector3::new(p.x, p.y, 1.0);
        Vector3::new(self.rows[0].dot(&h), self.rows[1].dot(&h), self.rows[2].dot(&h))
    }

    /// Same `x, y` as [`transform_point_homogeneous`], but hands back the
    /// input's `z` untouched. Used for mesh vertices whose `z` carries depth.
    ///
    /// [`transform_point_homogeneous`]: Self::transform_point_homogeneous
    #[inline]
    pub fn transform_point_preserve_z(&self, p: Vector3) -> Vector3 {
        let (x, y) = self.transform_point2(p.x, p.y);
        Vector3::new(x, y, p.z)
    }

    /// `(x, y)` of the homogeneous point transform, without building a `Vector3`.
    #[inline]
    pub fn transform_point2(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, _] = &self.rows;
        (a.x * x + a.y * y + a.z, b.x * x + b.y * y + b.z)
    }

    /// Free-vector transform: only the upper-left 2x2 block acts, so any
    /// translation in the matrix is ignored. `v.z` is not read.
    #[inline]
    pub fn transform_direction(&self, v: Vector3) -> (f32, f32) {
        let [a, b, _] = &self.rows;
        (a.x * v.x + a.y * v.y, b.x * v.x + b.y * v.y)
    }

    /// Plain matrix-vector product over all three components. Use this when
    /// `z` is a genuine unknown or constant (e.g. a 3x3 linear solve), not a
    /// homogeneous coordinate.
    #[inline]
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        Vector3::new(self.rows[0].dot(&v), self.rows[1].dot(&v), self.rows[2].dot(&v))
    }

    #[inline]
    fn col(&self, index: usize) -> Vector3 {
        Vector3::new(self.rows[0][index], self.rows[1][index], self.rows[2][index])
    }
}

impl Index<(usize, usize)> for Transform3x3 {
    type Output = f32;

    /// Panics outside `[0, 2] x [0, 2]`; see [`Transform3x3::get`] for the
    /// fallible form.
    fn index(&self, (row, column): (usize, usize)) -> &f32 {
        match self.rows.get(row) {
            Some(r) => &r[column],
            None => panic!("Transform3x3 row {row} out of range (valid range: 0-2)"),
        }
    }
}

impl IndexMut<(usize, usize)> for Transform3x3 {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f32 {
        match self.rows.get_mut(row) {
            Some(r) => &mut r[column],
            None => panic!("Transform3x3 row {row} out of range (valid range: 0-2)"),
        }
    }
}

impl Mul for Transform3x3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<f32> for Transform3x3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        self.scaled(scalar)
    }
}

impl Mul<Transform3x3> for f32 {
    type Output = Transform3x3;

    fn mul(self, m: Transform3x3) -> Transform3x3 {
        m.scaled(self)
    }
}

/// Three lines of three entries, each left-aligned in a 12-wide column with
/// 5 decimals.
impl fmt::Display for Transform3x3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.rows {
            writeln!(f, "{:<12.5}{:<12.5}{:<12.5}", r.x, r.y, r.z)?;
        }
        Ok(())
    }
}
