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

//! Turning lattice coordinates into pitch ratios.

use crate::axis::{Axis, AxisMap, Coord};
use crate::fraction::{Fraction, FractionError, Int};

const OCTAVE: Fraction = Fraction::int(2);

/// The pitch of a lattice point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// The ratio reduced into the octave `[1, 2)`.
    pub reduced: Fraction,
    /// Number of octaves removed during the reduction, so that the
    /// unreduced ratio equals `reduced * 2^octave`.
    pub octave: i32,
}

impl Resolved {
    /// The unreduced ratio as a float.
    pub fn ratio(&self) -> f64 {
        self.reduced.to_f64() * 2f64.powi(self.octave)
    }

    pub fn frequency(&self, base_frequency: f64) -> f64 {
        base_frequency * self.ratio()
    }
}

/// Resolves coordinates against the validated ratio of every axis.
#[derive(Debug, Clone)]
pub struct Resolver {
    ratios: AxisMap<Fraction>,
}

impl Resolver {
    /// Validate the axis ratio table. This only fails if the static table is broken.
    pub fn new() -> Result<Resolver, FractionError> {
        let mut ratios = AxisMap::new([Fraction::ONE; Axis::COUNT]);
        for axis in Axis::ALL.iter().copied() {
            let ratio = axis.ratio()?;
            if ratio.numerator() <= 0 {
                return Err(FractionError::NotPositive { value: ratio });
            }
            ratios[axis] = ratio;
        }
        Ok(Resolver { ratios })
    }

    /// Multiply the axis ratios raised to their exponents, then octave reduce.
    ///
    /// ```
    /// # use jilattice_core::axis::{Axis, Coord};
    /// # use jilattice_core::fraction::Fraction;
    /// # use jilattice_core::resolve::Resolver;
    /// let resolver = Resolver::new().unwrap();
    /// let fifth = resolver.resolve(&Coord::ORIGIN.step(Axis::Three, 1)).unwrap();
    /// assert_eq!(fifth.reduced, Fraction::new(3, 2).unwrap());
    /// assert_eq!(fifth.octave, 1);
    /// assert_eq!(fifth.ratio(), 3.0);
    ///
    /// let fourth = resolver.resolve(&Coord::ORIGIN.step(Axis::Three, -1)).unwrap();
    /// assert_eq!(fourth.reduced, Fraction::new(4, 3).unwrap());
    /// assert_eq!(fourth.octave, -2);
    /// ```
    pub fn resolve(&self, coord: &Coord) -> Result<Resolved, FractionError> {
        let mut product = Fraction::ONE;
        for (axis, exponent) in coord.iter() {
            if *exponent != 0 {
                product = product.multiply(self.ratios[axis].powi(*exponent)?)?;
            }
        }
        octave_reduce(product)
    }
}

/// Move a positive ratio into `[1, 2)` by powers of two.
///
/// ```
/// # use jilattice_core::fraction::Fraction;
/// # use jilattice_core::resolve::octave_reduce;
/// let r = octave_reduce(Fraction::new(9, 1).unwrap()).unwrap();
/// assert_eq!((r.reduced, r.octave), (Fraction::new(9, 8).unwrap(), 3));
/// let r = octave_reduce(Fraction::new(1, 5).unwrap()).unwrap();
/// assert_eq!((r.reduced, r.octave), (Fraction::new(8, 5).unwrap(), -3));
/// ```
pub fn octave_reduce(ratio: Fraction) -> Result<Resolved, FractionError> {
    let mut reduced = ratio.normalize()?;
    if reduced.numerator() <= 0 {
        return Err(FractionError::NotPositive { value: reduced });
    }
    let mut octave = 0;
    while reduced >= OCTAVE {
        reduced = reduced.divide(OCTAVE)?;
        octave += 1;
    }
    while reduced < Fraction::ONE {
        reduced = reduced.multiply(OCTAVE)?;
        octave -= 1;
    }
    Ok(Resolved { reduced, octave })
}

/// Find the first axis whose complexity ceiling the point violates.
///
/// The complexity an axis contributes is its limit raised to the absolute
/// exponent, e.g. `3^2 = 9` for two steps along the 3-axis. Each ceiling is
/// checked against its own axis only, so that restricting one axis leaves
/// the others untouched.
///
/// ```
/// # use jilattice_core::axis::{Axis, AxisMap, Coord};
/// # use jilattice_core::resolve::complexity_violation;
/// let mut ceilings = AxisMap::default();
/// ceilings[Axis::Three] = Some(27);
/// assert_eq!(complexity_violation(&Coord::new([3, 4, 0, 0, 0, 0, 0]), &ceilings), None);
/// assert_eq!(
///     complexity_violation(&Coord::new([-4, 0, 0, 0, 0, 0, 0]), &ceilings),
///     Some(Axis::Three)
/// );
/// ```
pub fn complexity_violation(coord: &Coord, ceilings: &AxisMap<Option<Int>>) -> Option<Axis> {
    ceilings.iter().find_map(|(axis, ceiling)| {
        let ceiling = (*ceiling)?;
        let exponent = coord[axis].unsigned_abs();
        if exponent == 0 {
            return None;
        }
        match axis.limit().checked_pow(exponent) {
            Some(complexity) if complexity <= ceiling => None,
            _ => Some(axis),
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn coord(values: [i32; Axis::COUNT]) -> Coord {
        Coord::new(values)
    }

    #[test]
    fn unison() {
        let resolved = Resolver::new().unwrap().resolve(&Coord::ORIGIN).unwrap();
        assert_eq!(resolved.reduced, Fraction::ONE);
        assert_eq!(resolved.octave, 0);
        assert_eq!(resolved.ratio(), 1.0);
        assert_eq!(resolved.frequency(440.0), 440.0);
    }

    #[test]
    fn five_limit_triad() {
        let resolver = Resolver::new().unwrap();
        let third = resolver.resolve(&coord([0, 1, 0, 0, 0, 0, 0])).unwrap();
        assert_eq!(third.reduced.label(), "5/4");
        assert_eq!(third.octave, 2);
        let seventh = resolver.resolve(&coord([1, 1, 0, 0, 0, 0, 0])).unwrap();
        assert_eq!(seventh.reduced.label(), "15/8");
        let minor_sixth = resolver.resolve(&coord([0, -1, 0, 0, 0, 0, 0])).unwrap();
        assert_eq!(minor_sixth.reduced.label(), "8/5");
    }

    #[test]
    fn composite_axes_are_independent_points_with_equal_pitch() {
        let resolver = Resolver::new().unwrap();
        let two_fifths = resolver.resolve(&coord([2, 0, 0, 0, 0, 0, 0])).unwrap();
        let ninth = resolver.resolve(&coord([0, 0, 0, 1, 0, 0, 0])).unwrap();
        assert_eq!(two_fifths, ninth);
        let cancelled = resolver.resolve(&coord([2, 0, 0, -1, 0, 0, 0])).unwrap();
        assert_eq!(cancelled.reduced, Fraction::ONE);
    }

    #[test]
    fn always_within_one_octave() {
        let resolver = Resolver::new().unwrap();
        for a in -4..=4 {
            for b in -3..=3 {
                for c in -2..=2 {
                    let r = resolver.resolve(&coord([a, b, c, 0, 1, 0, -1])).unwrap();
                    assert!(r.reduced >= Fraction::ONE && r.reduced < OCTAVE);
                    let scaled = r.ratio() / 2f64.powi(r.octave);
                    assert!((1.0..2.0).contains(&scaled));
                }
            }
        }
    }

    #[test]
    fn overflow_is_an_error() {
        let resolver = Resolver::new().unwrap();
        assert!(resolver.resolve(&coord([0, 0, 0, 0, 0, 0, 40])).is_err());
    }

    #[test]
    fn ceilings_only_apply_to_used_axes() {
        let mut ceilings = AxisMap::default();
        ceilings[Axis::Three] = Some(3);

        assert_eq!(
            complexity_violation(&coord([2, 0, 0, 0, 0, 0, 0]), &ceilings),
            Some(Axis::Three)
        );
        assert_eq!(complexity_violation(&coord([1, 0, 0, 0, 0, 0, 0]), &ceilings), None);
        assert_eq!(complexity_violation(&coord([0, 2, 0, 0, 0, 0, 0]), &ceilings), None);
    }

    #[test]
    fn ceilings_ignore_other_axes_factors() {
        let mut ceilings = AxisMap::default();
        ceilings[Axis::Three] = Some(243);
        ceilings[Axis::Five] = Some(125);

        // 225/128: the 3-part is 9 and the 5-part is 25
        let both = coord([2, 2, 0, 0, 0, 0, 0]);
        assert_eq!(complexity_violation(&both, &ceilings), None);
        assert_eq!(
            complexity_violation(&coord([2, 4, 0, 0, 0, 0, 0]), &ceilings),
            Some(Axis::Five)
        );
        assert_eq!(
            complexity_violation(&coord([-6, 1, 0, 0, 0, 0, 0]), &ceilings),
            Some(Axis::Three)
        );
    }

    #[test]
    fn huge_exponent_violates() {
        let mut ceilings = AxisMap::default();
        ceilings[Axis::Fifteen] = Some(10_000);
        assert_eq!(
            complexity_violation(&coord([0, 0, 0, 0, 0, 0, 40]), &ceilings),
            Some(Axis::Fifteen)
        );
    }
}
