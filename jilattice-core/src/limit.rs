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

//! Classification of integers and ratios by prime limit and odd limit.

use crate::fraction::{Fraction, Int};

/// The odd part of a number, i.e. the number with all factors of two removed.
/// Returns 1 for non-positive inputs.
///
/// ```
/// # use jilattice_core::limit::odd_limit;
/// assert_eq!(odd_limit(1), 1);
/// assert_eq!(odd_limit(8), 1);
/// assert_eq!(odd_limit(12), 3);
/// assert_eq!(odd_limit(45), 45);
/// assert_eq!(odd_limit(0), 1);
/// assert_eq!(odd_limit(-6), 1);
/// ```
pub fn odd_limit(n: Int) -> Int {
    if n <= 0 {
        return 1;
    }
    n >> n.trailing_zeros()
}

/// The largest prime factor of a number. Returns 1 for inputs below 2.
///
/// ```
/// # use jilattice_core::limit::max_prime;
/// assert_eq!(max_prime(1), 1);
/// assert_eq!(max_prime(2), 2);
/// assert_eq!(max_prime(9), 3);
/// assert_eq!(max_prime(15), 5);
/// assert_eq!(max_prime(1001), 13);
/// assert_eq!(max_prime(-7), 1);
/// ```
pub fn max_prime(n: Int) -> Int {
    if n < 2 {
        return 1;
    }
    let mut rest = n;
    let mut largest = 1;
    if rest % 2 == 0 {
        largest = 2;
        rest >>= rest.trailing_zeros();
    }
    let mut factor: Int = 3;
    while factor <= rest / factor {
        while rest % factor == 0 {
            largest = factor;
            rest /= factor;
        }
        factor += 2;
    }
    if rest > 1 {
        largest = largest.max(rest);
    }
    largest
}

/// The odd limit of a ratio: the larger odd part of its numerator and denominator.
///
/// ```
/// # use jilattice_core::{fraction::Fraction, limit::ratio_odd_limit};
/// assert_eq!(ratio_odd_limit(Fraction::new(3, 2).unwrap()), 3);
/// assert_eq!(ratio_odd_limit(Fraction::new(16, 15).unwrap()), 15);
/// assert_eq!(ratio_odd_limit(Fraction::ONE), 1);
/// ```
pub fn ratio_odd_limit(ratio: Fraction) -> Int {
    odd_limit(ratio.numerator().abs()).max(odd_limit(ratio.denominator()))
}

/// The prime limit of one side of a ratio, ignoring octaves.
///
/// This is what colors the numerator and denominator of a lattice node:
/// `3/2` has a top limit of 3 and a bottom limit of 1.
pub fn side_limit(n: Int) -> Int {
    max_prime(odd_limit(n.abs()))
}
