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

//! Linear projection of lattice coordinates onto the screen.

use serde::Serialize;

use crate::axis::{Axis, Coord};
use crate::settings::GenerationSettings;

/// Screen displacement of one step along each axis, in units of the spacing.
/// Screen `y` grows downwards, so rising axes have a negative `y`.
const DIRECTIONS: [(f64, f64); Axis::COUNT] = [
    // 3: horizontal
    (1.0, 0.0),
    // 5: vertical
    (0.0, -1.0),
    (0.45, -0.55),
    // 9: close to two steps of 3, but not on top of them
    (1.6, -0.3),
    (-0.6, -0.35),
    (-0.3, -0.7),
    // 15: close to 3 * 5
    (1.25, -0.75),
];

/// A position on the screen, with the 1/1 at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    spacing: f64,
    aspect_ratio: f64,
}

impl Projector {
    pub fn new(spacing: f64, aspect_ratio: f64) -> Self {
        Self {
            spacing,
            aspect_ratio,
        }
    }

    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self::new(
            settings.spacing.into_inner(),
            settings.aspect_ratio.into_inner(),
        )
    }

    pub fn direction(axis: Axis) -> (f64, f64) {
        DIRECTIONS[axis.index()]
    }

    /// Sum of the per-axis displacements. The aspect ratio only stretches `x`.
    ///
    /// ```
    /// # use jilattice_core::axis::{Axis, Coord};
    /// # use jilattice_core::project::{Point, Projector};
    /// let projector = Projector::new(100.0, 2.0);
    /// let p = projector.project(&Coord::ORIGIN.step(Axis::Three, 1).step(Axis::Five, -2));
    /// assert_eq!(p, Point { x: 200.0, y: 200.0 });
    /// ```
    pub fn project(&self, coord: &Coord) -> Point {
        let (dx, dy) = coord
            .iter()
            .filter(|(_, exponent)| **exponent != 0)
            .fold((0.0, 0.0), |(x, y), (axis, exponent)| {
                let (ux, uy) = Self::direction(axis);
                let steps = f64::from(*exponent);
                (x + ux * steps, y + uy * steps)
            });
        Point {
            x: dx * self.spacing * self.aspect_ratio,
            y: dy * self.spacing,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn directions_are_distinct_and_nonzero() {
        for (i, a) in DIRECTIONS.iter().enumerate() {
            assert!(a.0 != 0.0 || a.1 != 0.0);
            for b in DIRECTIONS.iter().skip(i + 1) {
                assert!(a != b);
            }
        }
    }

    #[test]
    fn composite_axes_do_not_overlap_their_factors() {
        let projector = Projector::new(1.0, 1.0);
        let two_threes = projector.project(&Coord::ORIGIN.step(Axis::Three, 2));
        let nine = projector.project(&Coord::ORIGIN.step(Axis::Nine, 1));
        assert_ne!(two_threes, nine);
        let three_five = projector.project(&Coord::ORIGIN.step(Axis::Three, 1).step(Axis::Five, 1));
        let fifteen = projector.project(&Coord::ORIGIN.step(Axis::Fifteen, 1));
        assert_ne!(three_five, fifteen);
    }

    #[test]
    fn origin_stays_put() {
        let projector = Projector::new(120.0, 1.7);
        assert_eq!(projector.project(&Coord::ORIGIN), Point { x: 0.0, y: 0.0 });
    }

    #[test]
    fn linear() {
        let projector = Projector::new(50.0, 1.5);
        let a = Coord::ORIGIN.step(Axis::Seven, 1);
        let b = Coord::ORIGIN.step(Axis::Seven, -1);
        let pa = projector.project(&a);
        let pb = projector.project(&b);
        assert_eq!(pa.x, -pb.x);
        assert_eq!(pa.y, -pb.y);
    }
}
