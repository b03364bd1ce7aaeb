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

//! The axes of the lattice and per-axis storage.
//!
//! Each axis is spanned by one odd number. Besides the primes 3 to 13 this
//! includes the composite axes 9 and 15, which are independent basis
//! vectors of their own: a step along the 9-axis is not the same lattice
//! point as two steps along the 3-axis, even though both land on `9/8`.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::Serialize;
use snafu::Snafu;

use crate::fraction::{Fraction, FractionError, Int};

/// One axis of the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    Three,
    Five,
    Seven,
    Nine,
    Eleven,
    Thirteen,
    Fifteen,
}

/// Generator ratio of each axis, in [`Axis::ALL`] order.
const AXIS_RATIOS: [(Int, Int); Axis::COUNT] = [(3, 1), (5, 1), (7, 1), (9, 1), (11, 1), (13, 1), (15, 1)];

impl Axis {
    pub const COUNT: usize = 7;

    /// All axes in canonical order. Enumeration and edge building follow this order.
    pub const ALL: [Axis; Axis::COUNT] = [
        Axis::Three,
        Axis::Five,
        Axis::Seven,
        Axis::Nine,
        Axis::Eleven,
        Axis::Thirteen,
        Axis::Fifteen,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The odd number spanning this axis.
    ///
    /// ```
    /// # use jilattice_core::axis::Axis;
    /// assert_eq!(Axis::Three.limit(), 3);
    /// assert_eq!(Axis::Fifteen.limit(), 15);
    /// ```
    pub const fn limit(self) -> Int {
        match self {
            Axis::Three => 3,
            Axis::Five => 5,
            Axis::Seven => 7,
            Axis::Nine => 9,
            Axis::Eleven => 11,
            Axis::Thirteen => 13,
            Axis::Fifteen => 15,
        }
    }

    /// ```
    /// # use jilattice_core::axis::Axis;
    /// assert_eq!(Axis::from_limit(11), Some(Axis::Eleven));
    /// assert_eq!(Axis::from_limit(17), None);
    /// ```
    pub fn from_limit(limit: Int) -> Option<Axis> {
        Axis::ALL.iter().copied().find(|axis| axis.limit() == limit)
    }

    /// The ratio of a single positive step along this axis.
    pub fn ratio(self) -> Result<Fraction, FractionError> {
        let (num, denom) = AXIS_RATIOS[self.index()];
        Fraction::new(num, denom)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.limit())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("unknown axis {:?}, expected one of 3, 5, 7, 9, 11, 13, 15", input))]
pub struct ParseAxisError {
    input: String,
}

/// Parse an axis from its limit number.
///
/// ```
/// # use jilattice_core::axis::Axis;
/// assert_eq!("13".parse::<Axis>(), Ok(Axis::Thirteen));
/// assert!("4".parse::<Axis>().is_err());
/// ```
impl FromStr for Axis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Int>()
            .ok()
            .and_then(Axis::from_limit)
            .ok_or_else(|| ParseAxisError {
                input: s.to_string(),
            })
    }
}

/// A value for every axis, indexed by [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct AxisMap<T>([T; Axis::COUNT]);

impl<T> AxisMap<T> {
    pub const fn new(values: [T; Axis::COUNT]) -> Self {
        AxisMap(values)
    }

    pub fn from_fn<F: FnMut(Axis) -> T>(mut f: F) -> Self {
        AxisMap([
            f(Axis::Three),
            f(Axis::Five),
            f(Axis::Seven),
            f(Axis::Nine),
            f(Axis::Eleven),
            f(Axis::Thirteen),
            f(Axis::Fifteen),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> + '_ {
        Axis::ALL.iter().copied().zip(self.0.iter())
    }

    pub fn values(&self) -> &[T] {
        &self.0
    }
}

impl<T> Index<Axis> for AxisMap<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        &self.0[axis.index()]
    }
}

impl<T> IndexMut<Axis> for AxisMap<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        &mut self.0[axis.index()]
    }
}

/// A point of the lattice: one signed exponent per axis.
pub type Coord = AxisMap<i32>;

impl AxisMap<i32> {
    pub const ORIGIN: Coord = AxisMap([0; Axis::COUNT]);

    /// Number of single steps needed to reach this point from the origin.
    ///
    /// ```
    /// # use jilattice_core::axis::Coord;
    /// assert_eq!(Coord::new([1, -2, 0, 0, 0, 0, 3]).distance(), 6);
    /// ```
    pub fn distance(&self) -> u32 {
        self.0.iter().map(|e| e.unsigned_abs()).sum()
    }

    /// The neighbouring point one step further along `axis`.
    pub fn step(&self, axis: Axis, delta: i32) -> Coord {
        let mut next = *self;
        next[axis] += delta;
        next
    }
}

/// Comma separated exponents, e.g. `1,0,-1,0,0,0,0`.
impl fmt::Display for AxisMap<i32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, exponent) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", exponent)?;
        }
        Ok(())
    }
}
