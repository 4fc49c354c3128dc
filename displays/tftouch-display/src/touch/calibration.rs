//! Three-point touch calibration
//!
//! Maps raw ADC readings onto screen coordinates with an integer affine
//! transform over a common divisor:
//!
//! ```text
//! sx = (a·tx + b·ty + c) / div
//! sy = (d·tx + e·ty + f) / div
//! ```
//!
//! The coefficients come from three non-collinear point pairs (Cramer's
//! rule, as in TI application report SLYT277). All arithmetic is `i64`; the
//! products of 12-bit readings and 9-bit screen coordinates stay far inside
//! that range.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pair of unsigned coordinates, either on screen or in raw ADC units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Calibration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// The raw points are collinear (or coincide), so no transform exists
    Degenerate,
}

/// Affine transform from raw touch readings to landscape screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Calibration {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
    pub e: i64,
    pub f: i64,
    pub div: i64,
}

impl Calibration {
    /// Solve the transform taking each `touch[i]` onto `screen[i]`
    pub fn from_points(screen: &[Point; 3], touch: &[Point; 3]) -> Result<Self, CalibrationError> {
        let [l0, l1, l2] = screen.map(|p| (i64::from(p.x), i64::from(p.y)));
        let [t0, t1, t2] = touch.map(|p| (i64::from(p.x), i64::from(p.y)));

        let div = (t0.0 - t2.0) * (t1.1 - t2.1) - (t1.0 - t2.0) * (t0.1 - t2.1);
        if div == 0 {
            return Err(CalibrationError::Degenerate);
        }

        let a = (l0.0 - l2.0) * (t1.1 - t2.1) - (l1.0 - l2.0) * (t0.1 - t2.1);
        let b = (t0.0 - t2.0) * (l1.0 - l2.0) - (l0.0 - l2.0) * (t1.0 - t2.0);
        let c = (t2.0 * l1.0 - t1.0 * l2.0) * t0.1
            + (t0.0 * l2.0 - t2.0 * l0.0) * t1.1
            + (t1.0 * l0.0 - t0.0 * l1.0) * t2.1;

        let d = (l0.1 - l2.1) * (t1.1 - t2.1) - (l1.1 - l2.1) * (t0.1 - t2.1);
        let e = (t0.0 - t2.0) * (l1.1 - l2.1) - (l0.1 - l2.1) * (t1.0 - t2.0);
        let f = (t2.0 * l1.1 - t1.0 * l2.1) * t0.1
            + (t0.0 * l2.1 - t2.0 * l0.1) * t1.1
            + (t1.0 * l0.1 - t0.0 * l1.1) * t2.1;

        Ok(Self {
            a,
            b,
            c,
            d,
            e,
            f,
            div,
        })
    }

    /// Identity transform
    pub const fn identity() -> Self {
        Self {
            a: 1,
            b: 0,
            c: 0,
            d: 0,
            e: 1,
            f: 0,
            div: 1,
        }
    }

    /// Whether the transform can be applied
    pub const fn is_valid(&self) -> bool {
        self.div != 0
    }

    /// Screen x for a raw reading, before clamping
    ///
    /// Evaluated in 128 bits and saturated, so any coefficients are safe.
    pub fn apply_x(&self, tx: u16, ty: u16) -> i64 {
        affine(self.a, self.b, self.c, self.div, tx, ty)
    }

    /// Screen y for a raw reading, before clamping
    pub fn apply_y(&self, tx: u16, ty: u16) -> i64 {
        affine(self.d, self.e, self.f, self.div, tx, ty)
    }
}

/// `(p·tx + q·ty + r) / div`, saturated to the i64 range
///
/// Returns 0 for a zero divisor.
fn affine(p: i64, q: i64, r: i64, div: i64, tx: u16, ty: u16) -> i64 {
    if div == 0 {
        return 0;
    }
    let num = i128::from(p) * i128::from(tx) + i128::from(q) * i128::from(ty) + i128::from(r);
    let value = num / i128::from(div);
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// The three screen targets used by the calibration procedure
pub const fn targets(width: u16, height: u16) -> [Point; 3] {
    [
        Point::new(20, 20),
        Point::new(width - 20, height / 2),
        Point::new(width / 2, height - 20),
    ]
}
