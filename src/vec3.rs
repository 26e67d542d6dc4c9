//! Three-component single-precision vector.
//!
//! `Vector3` doubles as a real 3D value and, with `z` used as the homogeneous
//! coordinate, as a 2D point or direction fed to [`Transform3x3`]. Which
//! interpretation applies is decided by the transform call, not by the type.
//!
//! Arithmetic follows IEEE-754 as-is: dividing by zero gives inf/NaN rather
//! than an error. Equality is exact per component.
//!
//! [`Transform3x3`]: crate::mat3::Transform3x3

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use crate::error::{XformError, XformResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACKWARD: Self = Self::new(0.0, 0.0, -1.0);

    /// "Invalid / unset" marker: `f32::MIN` (the most negative finite float)
    /// in every component.
    ///
    /// This is an ordinary, finite vector as far as arithmetic is concerned.
    /// Nothing in this crate produces it; callers that use it as a sentinel
    /// must test for it with [`is_reserved`](Self::is_reserved) before
    /// doing math on the value.
    pub const RESERVED: Self = Self::new(f32::MIN, f32::MIN, f32::MIN);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A 2D point or direction with `z = 0`.
    #[inline]
    pub const fn from_xy(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0)
    }

    #[inline]
    pub fn xy(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    pub fn is_reserved(&self) -> bool {
        *self == Self::RESERVED
    }

    /// Component by index (0=x, 1=y, 2=z).
    ///
    /// Use `v[i]` when an out-of-range index should panic instead.
    pub fn get(&self, index: usize) -> XformResult<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(XformError::index(index)),
        }
    }

    pub fn set(&mut self, index: usize, value: f32) -> XformResult<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => return Err(XformError::index(index)),
        }
        Ok(())
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    ///
    /// Only meaningful for true 3D directions; for homogeneous 2D points the
    /// `z = 1` component takes part in the result.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A magnitude at or below `f32::MIN_POSITIVE` (the smallest normal
    /// positive float) yields [`Vector3::ZERO`] instead of dividing. The
    /// guard only catches zero and subnormal lengths; tiny-but-normal vectors
    /// still normalize.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag <= f32::MIN_POSITIVE {
            return Self::ZERO;
        }
        *self / mag
    }

    pub fn distance(a: Self, b: Self) -> f32 {
        (a - b).magnitude()
    }

    /// Linear blend from `a` (t=0) to `b` (t=1). `t` is clamped to `[0, 1]`.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }

    /// Lexicographic ordering on `(x, y, z)`, total so it can drive
    /// `sort_by`.
    ///
    /// `-0.0` and `0.0` compare equal (matching `==`). NaN compares equal to
    /// NaN and below every number.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        cmp_component(self.x, other.x)
            .then_with(|| cmp_component(self.y, other.y))
            .then_with(|| cmp_component(self.z, other.z))
    }
}

fn cmp_component(a: f32, b: f32) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ord) => ord,
        None => match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            _ => Ordering::Greater,
        },
    }
}

impl Index<usize> for Vector3 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index {index} out of range (valid range: 0-2)"),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3 index {index} out of range (valid range: 0-2)"),
        }
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        v * self
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(arr: [f32; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_is_zero() {
        assert_eq!(Vector3::default(), Vector3::ZERO);
    }

    #[test]
    fn indexed_access() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.get(0).unwrap(), 1.0);
        assert_eq!(v[2], 3.0);
        v.set(1, 9.0).unwrap();
        v[0] = -1.0;
        assert_eq!(v, Vector3::new(-1.0, 9.0, 3.0));
        assert!(matches!(
            v.get(3),
            Err(XformError::IndexOutOfRange { index: 3, .. })
        ));
        assert!(v.set(5, 0.0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_operator_panics_past_z() {
        let v = Vector3::UP;
        let _z = v[3];
    }

    #[test]
    fn arithmetic_is_componentwise() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0_f32 * a, a * 2.0);
        assert_eq!(b / 2.0, Vector3::new(2.0, 2.5, 3.0));
        assert_eq!(a.dot(&b), 32.0);
        assert_eq!(Vector3::RIGHT.cross(&Vector3::UP), Vector3::FORWARD);
    }

    #[test]
    fn divide_by_zero_is_not_an_error() {
        let v = Vector3::new(1.0, -1.0, 0.0) / 0.0;
        assert_eq!(v.x, f32::INFINITY);
        assert_eq!(v.y, f32::NEG_INFINITY);
        assert!(v.z.is_nan());
    }

    #[test]
    fn magnitude_and_normalize() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(v.magnitude(), 5.0);
        let n = v.normalized();
        assert_abs_diff_eq!(n.x, 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(n.y, 0.8, epsilon = 1e-6);
        assert_abs_diff_eq!(n.magnitude(), 1.0, epsilon = 1e-6);
        assert_eq!(Vector3::ZERO.normalized(), Vector3::ZERO);
        // Subnormal length falls under the guard.
        assert_eq!(Vector3::new(1e-40, 0.0, 0.0).normalized(), Vector3::ZERO);
    }

    #[test]
    fn lerp_clamps_t() {
        let a = Vector3::ZERO;
        let b = Vector3::new(10.0, 20.0, -10.0);
        assert_eq!(Vector3::lerp(a, b, 0.5), Vector3::new(5.0, 10.0, -5.0));
        assert_eq!(Vector3::lerp(a, b, -3.0), a);
        assert_eq!(Vector3::lerp(a, b, 7.0), b);
        assert_eq!(Vector3::distance(a, Vector3::new(0.0, 3.0, 4.0)), 5.0);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut vs = vec![
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 9.0, 9.0),
            Vector3::new(1.0, 2.0, -1.0),
            Vector3::new(1.0, -5.0, 0.0),
        ];
        vs.sort_by(Vector3::compare_to);
        assert_eq!(
            vs,
            vec![
                Vector3::new(0.0, 9.0, 9.0),
                Vector3::new(1.0, -5.0, 0.0),
                Vector3::new(1.0, 2.0, -1.0),
                Vector3::new(1.0, 2.0, 3.0),
            ]
        );
        assert!(Vector3::UP > Vector3::DOWN);
        assert_eq!(
            Vector3::new(0.0, 0.0, 0.0).compare_to(&Vector3::new(-0.0, 0.0, 0.0)),
            Ordering::Equal
        );
        let nan = Vector3::new(f32::NAN, 0.0, 0.0);
        assert_eq!(nan.compare_to(&Vector3::ZERO), Ordering::Less);
        assert_eq!(nan.compare_to(&nan), Ordering::Equal);
    }

    #[test]
    fn equality_is_exact() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        assert_ne!(a, Vector3::new(1.0 + f32::EPSILON, 0.0, 0.0));
        assert_eq!(a, Vector3::RIGHT);
        let nan = Vector3::new(f32::NAN, 0.0, 0.0);
        assert_ne!(nan, nan);
    }

    #[test]
    fn reserved_sentinel() {
        assert!(Vector3::RESERVED.is_reserved());
        assert!(!Vector3::ZERO.is_reserved());
        assert_eq!(Vector3::RESERVED.x, f32::MIN);
    }

    #[test]
    fn array_and_xy_views() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(Vector3::from_array(v.to_array()), v);
        assert_eq!(v.xy(), (1.0, 2.0));
        let (x, y) = v.xy();
        assert_eq!(Vector3::from_xy(x, y), Vector3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn display() {
        assert_eq!(Vector3::new(1.0, -2.5, 0.0).to_string(), "Vector3(1, -2.5, 0)");
    }
}
