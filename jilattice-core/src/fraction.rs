// ji-lattice -- a just intonation lattice engine for microtonal keyboards
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Exact fractions for just intonation pitch ratios.
//!
//! Unlike plain integer math, every operation here is checked: lattice
//! products grow quickly with depth, and a wrapped numerator would silently
//! produce a wrong pitch.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;

use snafu::Snafu;

/// Underlying integral type for the fractions.
pub type Int = i64;

/// A fraction of two integers.
///
/// Values produced by [`Fraction::new`], [`Fraction::normalize`] and the
/// arithmetic methods are always fully reduced. [`Fraction::raw`] can hold
/// an unreduced pair until it is normalized.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Fraction {
    /// The numerator of the fraction.
    /// If the fraction is negative, the numerator will be made negative.
    num: Int,
    /// The denominator of the fraction, positive once normalized.
    denom: Int,
}

/// Errors of fraction arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
pub enum FractionError {
    #[snafu(display("Fraction {}/0 has a zero denominator", num))]
    ZeroDenominator { num: Int },
    #[snafu(display("Integer overflow while computing {} {} {}", lhs, op, rhs))]
    ArithmeticOverflow {
        lhs: Fraction,
        op: char,
        rhs: Fraction,
    },
    #[snafu(display("Ratio {} is not positive", value))]
    NotPositive { value: Fraction },
}

impl Fraction {
    pub const ONE: Fraction = Fraction { num: 1, denom: 1 };

    // ==================== Constructors ====================

    /// Create a new, reduced fraction.
    ///
    /// # Examples
    ///
    /// ```
    /// # use jilattice_core::fraction::*;
    ///
    /// assert_eq!(Fraction::new(10, 5), Ok(Fraction::int(2)));
    /// assert_eq!(Fraction::new(-10, -5), Fraction::new(6, 3));
    /// assert_eq!(Fraction::new(-6, 8), Fraction::new(3, -4));
    /// assert!(Fraction::new(1, 0).is_err());
    /// ```
    pub fn new(num: Int, denom: Int) -> Result<Fraction, FractionError> {
        Fraction::raw(num, denom).normalize()
    }

    /// Hold a pair of integers without reducing or validating them.
    pub const fn raw(num: Int, denom: Int) -> Fraction {
        Fraction { num, denom }
    }

    pub const fn int(int: Int) -> Fraction {
        Fraction { num: int, denom: 1 }
    }

    // ==================== Transformations ====================

    /// Reduce by the greatest common divisor and move the sign to the numerator.
    ///
    /// ```
    /// # use jilattice_core::fraction::*;
    /// let f = Fraction::raw(12, -18).normalize().unwrap();
    /// assert_eq!((f.numerator(), f.denominator()), (-2, 3));
    /// assert_eq!(f.normalize(), Ok(f));
    /// ```
    pub fn normalize(self) -> Result<Fraction, FractionError> {
        if self.denom == 0 {
            return Err(FractionError::ZeroDenominator { num: self.num });
        }
        let div = gcd(self.num, self.denom);
        let (mut num, mut denom) = (self.num / div, self.denom / div);
        if denom < 0 {
            // only reachable with `Int::MIN` as denominator
            num = num.checked_neg().ok_or(FractionError::ArithmeticOverflow {
                lhs: self,
                op: '-',
                rhs: Fraction::ONE,
            })?;
            denom = denom.checked_neg().ok_or(FractionError::ArithmeticOverflow {
                lhs: self,
                op: '-',
                rhs: Fraction::ONE,
            })?;
        }
        Ok(Fraction { num, denom })
    }

    pub fn recip(self) -> Result<Fraction, FractionError> {
        Fraction::new(self.denom, self.num)
    }

    /// Multiply two fractions, reducing crosswise first to keep the magnitudes small.
    ///
    /// ```
    /// # use jilattice_core::fraction::*;
    /// let fifth = Fraction::new(3, 2).unwrap();
    /// let fourth = Fraction::new(4, 3).unwrap();
    /// assert_eq!(fifth.multiply(fourth), Ok(Fraction::int(2)));
    /// assert!(Fraction::int(i64::MAX).multiply(Fraction::int(3)).is_err());
    /// ```
    pub fn multiply(self, rhs: Fraction) -> Result<Fraction, FractionError> {
        let lhs = self.normalize()?;
        let rhs = rhs.normalize()?;
        let overflow = FractionError::ArithmeticOverflow { lhs, op: '*', rhs };

        let g1 = gcd(lhs.num, rhs.denom).max(1);
        let g2 = gcd(rhs.num, lhs.denom).max(1);
        let num = (lhs.num / g1).checked_mul(rhs.num / g2).ok_or(overflow)?;
        let denom = (lhs.denom / g2)
            .checked_mul(rhs.denom / g1)
            .ok_or(overflow)?;
        Fraction::raw(num, denom).normalize()
    }

    /// ```
    /// # use jilattice_core::fraction::*;
    /// let fifth = Fraction::new(3, 2).unwrap();
    /// assert_eq!(Fraction::int(2).divide(fifth), Fraction::new(4, 3));
    /// assert!(fifth.divide(Fraction::int(0)).is_err());
    /// ```
    pub fn divide(self, rhs: Fraction) -> Result<Fraction, FractionError> {
        let rhs = rhs.normalize()?;
        if rhs.num == 0 {
            return Err(FractionError::ZeroDenominator { num: rhs.denom });
        }
        self.multiply(Fraction::raw(rhs.denom, rhs.num))
    }

    /// Compute an integer power of the fraction.
    ///
    /// ```
    /// # use jilattice_core::fraction::*;
    /// assert_eq!(Fraction::int(3).powi(0), Ok(Fraction::ONE));
    /// assert_eq!(Fraction::int(3).powi(4), Ok(Fraction::int(81)));
    /// assert_eq!(Fraction::int(3).powi(-2), Fraction::new(1, 9));
    /// assert_eq!(Fraction::new(5, 4).unwrap().powi(-1), Fraction::new(4, 5));
    /// ```
    pub fn powi(self, power: i32) -> Result<Fraction, FractionError> {
        if power == 0 {
            return Ok(Fraction::ONE);
        }
        let mut accum = if power > 0 { self.normalize()? } else { self.recip()? };
        let mut correction = Fraction::ONE;
        let mut remaining_power = power.unsigned_abs();

        while remaining_power > 1 {
            if remaining_power % 2 == 1 {
                correction = correction.multiply(accum)?;
                remaining_power -= 1;
            }
            accum = accum.multiply(accum)?;
            remaining_power /= 2;
        }

        accum.multiply(correction)
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.denom as f64
    }

    /// Format as `n/d`, keeping a denominator of one.
    ///
    /// ```
    /// # use jilattice_core::fraction::*;
    /// assert_eq!(Fraction::ONE.label(), "1/1");
    /// assert_eq!(Fraction::new(6, 4).unwrap().label(), "3/2");
    /// ```
    pub fn label(self) -> String {
        format!("{}/{}", self.num, self.denom)
    }

    // ==================== Predicates ====================

    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    // ==================== Destructors ====================

    pub const fn numerator(self) -> Int {
        self.num
    }

    pub const fn denominator(self) -> Int {
        self.denom
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Fraction) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compares normalized fractions by value.
///
/// ```
/// use jilattice_core::fraction::*;
///
/// assert!(Fraction::new(4, 3).unwrap() < Fraction::new(3, 2).unwrap());
/// ```
impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // a / b < c / d  <=>  a * d < c * b, for positive b and d
        let l = self.num as i128 * other.denom as i128;
        let r = other.num as i128 * self.denom as i128;
        l.cmp(&r)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.num)?;
        if self.denom != 1 {
            write!(f, "/{}", self.denom)?;
        }
        Ok(())
    }
}

/// An error which can be returned when parsing a fraction.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ParseFractionError {
    #[snafu(display("invalid integer literal {:?}", literal))]
    InvalidInt { literal: String },
    #[snafu(display("denominator is zero"))]
    ZeroDivisor,
    #[snafu(display("malformed fraction {:?}", input))]
    Malformed { input: String },
}

/// ```
/// # use jilattice_core::fraction::*;
/// assert_eq!("7/4".parse::<Fraction>().unwrap(), Fraction::new(7, 4).unwrap());
/// assert_eq!("-12/8".parse::<Fraction>().unwrap(), Fraction::new(-3, 2).unwrap());
/// assert_eq!("5".parse::<Fraction>().unwrap(), Fraction::int(5));
/// assert_eq!("5/0".parse::<Fraction>(), Err(ParseFractionError::ZeroDivisor));
/// assert!("1/2/3".parse::<Fraction>().is_err());
/// ```
impl std::str::FromStr for Fraction {
    type Err = ParseFractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_int = |part: &str| {
            part.trim()
                .parse::<Int>()
                .map_err(|_| ParseFractionError::InvalidInt {
                    literal: part.to_string(),
                })
        };

        let mut parts = s.split('/');
        let numerator = match parts.next() {
            Some(numerator_str) => parse_int(numerator_str)?,
            None => {
                return Err(ParseFractionError::Malformed {
                    input: s.to_string(),
                })
            }
        };

        if let Some(denominator_str) = parts.next() {
            let denominator = parse_int(denominator_str)?;
            if denominator == 0 {
                Err(ParseFractionError::ZeroDivisor)
            } else if parts.next().is_some() {
                Err(ParseFractionError::Malformed {
                    input: s.to_string(),
                })
            } else {
                Fraction::new(numerator, denominator).map_err(|_| ParseFractionError::Malformed {
                    input: s.to_string(),
                })
            }
        } else {
            Ok(Fraction::int(numerator))
        }
    }
}

/// Computes the greates common divisor of two numbers using euclids algorithm.
///
/// # Example
///
/// ```
/// use jilattice_core::fraction::*;
///
/// assert_eq!(gcd(20, 15), 5);
/// assert_eq!(gcd(20, 19), 1);
/// assert_eq!(gcd(10, 0), 10);
/// assert_eq!(gcd(0, 10), 10);
/// assert_eq!(gcd(0, 0), 0);
/// assert_eq!(gcd(10, -10), 10);
/// ```
pub fn gcd(a: Int, b: Int) -> Int {
    // work on magnitudes so that `Int::MIN` does not overflow
    let mut a = a.unsigned_abs();
    let mut b = b.unsigned_abs();

    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    // only gcd(MIN, 0) or gcd(MIN, MIN) exceeds the signed range
    Int::try_from(a).unwrap_or(Int::MAX)
}
