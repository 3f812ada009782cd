use std::ops::MulAssign;

use num_complex::Complex64;

pub trait CommutativeRing:
    core::fmt::Debug
    + PartialEq
    + Clone
    + std::ops::AddAssign
    + std::ops::SubAssign
    + for<'a> MulAssign<&'a Self>
    + num_traits::Zero
    + num_traits::One
{
}

pub trait Field
where
    Self: CommutativeRing
        + for<'a> std::ops::Mul<&'a Self, Output = Self>
        + num_traits::ops::inv::Inv<Output = Self>,
{
    /// Calculate elimination factor, so that self - factor*rhs = 0, and rhs_inv = 1/rhs.
    fn elimination_factor(self, rhs_inv: &Self) -> Self {
        let mut factor = Self::zero();
        factor -= self * rhs_inv;
        factor
    }
}

/// A field whose elements have a size, so that values indistinguishable from
/// floating point noise can be flushed to zero.
pub trait Scalar: Field {
    fn magnitude(&self) -> f64;

    fn is_negligible(&self, tolerance: f64) -> bool {
        self.magnitude() < tolerance
    }
}

impl CommutativeRing for f64 {}
impl Field for f64 {}

impl Scalar for f64 {
    fn magnitude(&self) -> f64 {
        self.abs()
    }
}

impl CommutativeRing for Complex64 {}
impl Field for Complex64 {}

impl Scalar for Complex64 {
    fn magnitude(&self) -> f64 {
        self.norm()
    }
}
