use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use super::Vector;

/// An unbounded angular difference in degrees.
///
/// Unlike [`Heading`], an `Angle` is linear: `+720` means two full
/// turns to the left. Angles and headings are deliberately distinct
/// types that never convert into each other implicitly; a heading
/// plus an angle is a heading, the difference of two headings is an
/// angle.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    #[must_use]
    pub fn new(degrees: f64) -> Self {
        Self(degrees)
    }

    #[must_use]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    #[must_use]
    pub fn from_radians(radians: f64) -> Self {
        Self(radians.to_degrees())
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Rotates a vector by this angle, consistently with the heading
    /// convention: rotating the unit vector of heading `h` by `t`
    /// yields the unit vector of heading `h + t`.
    #[must_use]
    pub fn rotate(self, v: Vector) -> Vector {
        let (sin, cos) = self.to_radians().sin_cos();
        Vector::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle(self.0 * rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, rhs: f64) -> Angle {
        Angle(self.0 / rhs)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl Rem<f64> for Angle {
    type Output = Angle;

    /// Euclidean remainder: the result takes the sign of the divisor,
    /// so `Angle::new(-90.0) % 360.0` is `Angle::new(270.0)`.
    fn rem(self, rhs: f64) -> Angle {
        Angle(self.0.rem_euclid(rhs))
    }
}

/// An absolute compass direction in degrees, normalized to `[0, 360)`.
///
/// Heading `0` points along the positive x-axis; headings grow
/// counter-clockwise on the y-down canvas, so heading `90` points
/// toward negative y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading(f64);

impl Heading {
    #[must_use]
    pub fn new(degrees: f64) -> Self {
        let mut theta = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negatives.
        if theta >= 360.0 {
            theta = 0.0;
        }
        Self(theta)
    }

    #[must_use]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    #[must_use]
    pub fn from_radians(radians: f64) -> Self {
        Self::new(radians.to_degrees())
    }

    /// The heading a vector points in, or `None` for the zero vector.
    #[must_use]
    pub fn of_vector(v: Vector) -> Option<Self> {
        if v.x == 0.0 && v.y == 0.0 {
            return None;
        }
        Some(Self::from_radians((-v.y).atan2(v.x)))
    }

    /// Unit vector pointing along this heading (y-down convention).
    #[must_use]
    pub fn unit_vector(self) -> Vector {
        let rad = self.to_radians();
        Vector::new(rad.cos(), -rad.sin())
    }

    /// The smallest rotation that turns `self` into `other`, in
    /// `(-180, 180]`. Exactly opposite headings report `+180`, never
    /// `-180`.
    #[must_use]
    pub fn angle_to(self, other: Heading) -> Angle {
        let diff = other - self;
        if diff.degrees() > 180.0 {
            diff - Angle::new(360.0)
        } else {
            diff
        }
    }

    /// Whether turning counter-clockwise from `other` reaches `self`
    /// within `(0, 180]` degrees.
    ///
    /// This is not an ordering: opposing headings are each
    /// counter-clockwise of the other, which is exactly what
    /// joint-angle bisection needs.
    #[must_use]
    pub fn counter_clockwise_of(self, other: Heading) -> bool {
        if self == other {
            return false;
        }
        let diff = (self - other).degrees();
        diff > 0.0 && diff <= 180.0
    }

    /// Whether turning counter-clockwise from `lo` to `hi` passes
    /// strictly through `self`. Coinciding with either bound, or
    /// `lo == hi`, counts as not between.
    #[must_use]
    pub fn between(self, lo: Heading, hi: Heading) -> bool {
        let lo = lo.0;
        let mut mid = self.0;
        let mut hi = hi.0;
        if lo == hi || mid == lo || mid == hi {
            return false;
        }
        if mid < lo {
            mid += 360.0;
            hi += 360.0;
        }
        if hi < mid {
            hi += 360.0;
        }
        hi - lo < 360.0
    }
}

impl Add<Angle> for Heading {
    type Output = Heading;

    fn add(self, rhs: Angle) -> Heading {
        Heading::new(self.0 + rhs.degrees())
    }
}

impl Sub<Angle> for Heading {
    type Output = Heading;

    fn sub(self, rhs: Angle) -> Heading {
        Heading::new(self.0 - rhs.degrees())
    }
}

impl Sub for Heading {
    type Output = Angle;

    /// Difference between two headings as an angle in `[0, 360)`:
    /// 360 is added whenever the raw difference is negative.
    fn sub(self, rhs: Heading) -> Angle {
        let mut a = self.0;
        let b = rhs.0;
        if a < b {
            a += 360.0;
        }
        Angle::new(a - b)
    }
}
