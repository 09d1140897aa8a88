//! Degree-valued rotation scalar.
//!
//! [`Angle`] wraps an `f32` measured in degrees. It is deliberately **not**
//! normalized to any canonical range: arithmetic is plain real arithmetic,
//! and repeated integration can grow a rotation past a full turn. Callers
//! that need a wrapped value must wrap it themselves; the rotation
//! controller's candidate selection depends on unwrapped differences.
//!
//! The bearing helper uses screen-space axes: 0° points "up" (+y), 90°
//! points "right" (+x), so displacement is `(sin, cos)` of the rotation
//! rather than the mathematical `(cos, sin)`.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rotation measured in degrees.
///
/// Supports comparison and arithmetic; carries no range invariant. The
/// default value is [`Angle::ZERO`].
///
/// # Example
///
/// ```
/// use starfall_core::Angle;
///
/// let a = Angle::from_degrees(90.0);
/// let b = Angle::from_degrees(30.0);
///
/// assert_eq!((a - b).degrees(), 60.0);
/// assert!(b < a);
/// ```
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(f32);

impl Angle {
    /// Zero rotation.
    pub const ZERO: Self = Self(0.0);
    /// Half a turn (180°).
    pub const HALF_TURN: Self = Self(180.0);
    /// A full turn (360°).
    pub const FULL_TURN: Self = Self(360.0);
    /// The largest representable angle, used as the "unlimited" rate cap.
    pub const MAX: Self = Self(f32::MAX);

    /// Creates an angle from a degree value.
    #[must_use]
    pub const fn from_degrees(degrees: f32) -> Self {
        Self(degrees)
    }

    /// Returns the raw degree value.
    #[must_use]
    pub const fn degrees(self) -> f32 {
        self.0
    }

    /// Returns the value in radians.
    #[must_use]
    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Sine of the angle.
    #[must_use]
    pub fn sin(self) -> f32 {
        self.radians().sin()
    }

    /// Cosine of the angle.
    #[must_use]
    pub fn cos(self) -> f32 {
        self.radians().cos()
    }

    /// Absolute angular magnitude.
    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Clamps into the symmetric range `[-limit, limit]`.
    ///
    /// Out-of-range values become the boundary value, not the original.
    /// `limit` must be non-negative.
    #[must_use]
    pub fn clamp_symmetric(self, limit: Self) -> Self {
        Self(self.0.clamp(-limit.0, limit.0))
    }

    /// Bearing from `from` to `to` in screen convention (0° = +y, 90° = +x).
    ///
    /// Coincident points yield 0°.
    ///
    /// # Example
    ///
    /// ```
    /// use starfall_core::Angle;
    /// use glam::Vec2;
    ///
    /// let east = Angle::bearing_between(Vec2::ZERO, Vec2::new(10.0, 0.0));
    /// assert!((east.degrees() - 90.0).abs() < 1e-4);
    /// ```
    #[must_use]
    pub fn bearing_between(from: Vec2, to: Vec2) -> Self {
        let d = to - from;
        Self(d.x.atan2(d.y).to_degrees())
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Angle({}°)", self.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

impl From<f32> for Angle {
    fn from(degrees: f32) -> Self {
        Self(degrees)
    }
}

impl From<Angle> for f32 {
    fn from(angle: Angle) -> Self {
        angle.0
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f32> for Angle {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}
