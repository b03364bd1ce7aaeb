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

//! Enumeration of the lattice points within the configured bounds.

use crate::axis::{Axis, AxisMap, Coord};

/// The coordinates found by [`enumerate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    pub coords: Vec<Coord>,
    /// Set when the node ceiling cut the enumeration short.
    pub truncated: bool,
}

/// Enumerate all points with `|coord[axis]| <= depths[axis]` and a total
/// distance of at most `max_distance`, stopping after `max_nodes` points.
///
/// Points are collected in shells of increasing distance from the origin, so
/// a lattice cut short by the ceiling keeps the points closest to the 1/1.
/// The result is ordered with the first axis of [`Axis::ALL`] varying
/// slowest, values ascending.
///
/// ```
/// # use jilattice_core::axis::{Axis, AxisMap};
/// # use jilattice_core::enumerate::enumerate;
/// let mut depths = AxisMap::default();
/// depths[Axis::Three] = 1;
/// depths[Axis::Five] = 1;
/// let found = enumerate(&depths, 1, 100);
/// let coords: Vec<String> = found.coords.iter().map(|c| c.to_string()).collect();
/// assert_eq!(coords, vec![
///     "-1,0,0,0,0,0,0",
///     "0,-1,0,0,0,0,0",
///     "0,0,0,0,0,0,0",
///     "0,1,0,0,0,0,0",
///     "1,0,0,0,0,0,0",
/// ]);
/// ```
pub fn enumerate(depths: &AxisMap<u8>, max_distance: u32, max_nodes: usize) -> Enumeration {
    // axes of depth zero only ever contribute a zero
    let active: Vec<(Axis, u8)> = depths
        .iter()
        .filter(|(_, depth)| **depth > 0)
        .map(|(axis, depth)| (axis, *depth))
        .collect();
    let reach: u32 = active.iter().map(|(_, depth)| u32::from(*depth)).sum();

    let mut walker = Walker {
        coords: Vec::new(),
        max_nodes,
        current: Coord::ORIGIN,
    };
    let mut complete = true;
    for shell in 0..=max_distance.min(reach) {
        if !walker.walk(&active, shell) {
            complete = false;
            break;
        }
    }

    let mut coords = walker.coords;
    coords.sort_by(|a, b| a.values().cmp(b.values()));
    Enumeration {
        coords,
        truncated: !complete,
    }
}

struct Walker {
    coords: Vec<Coord>,
    max_nodes: usize,
    current: Coord,
}

impl Walker {
    /// Collect the points whose remaining axes use up exactly `remaining`
    /// steps, assigning the first axis of `axes` and recursing into the others.
    ///
    /// Returns `false` once the node ceiling has been hit.
    fn walk(&mut self, axes: &[(Axis, u8)], remaining: u32) -> bool {
        let ((axis, depth), rest) = match axes.split_first() {
            Some(split) => split,
            None => {
                if remaining > 0 {
                    return true;
                }
                if self.coords.len() >= self.max_nodes {
                    return false;
                }
                self.coords.push(self.current);
                return true;
            }
        };

        let rest_reach: u32 = rest.iter().map(|(_, depth)| u32::from(*depth)).sum();
        let reach = u32::from(*depth).min(remaining) as i32;
        let mut complete = true;
        for value in -reach..=reach {
            let left = remaining - value.unsigned_abs();
            if left > rest_reach {
                continue;
            }
            self.current[*axis] = value;
            if !self.walk(rest, left) {
                complete = false;
                break;
            }
        }
        self.current[*axis] = 0;
        complete
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn depths(values: [u8; Axis::COUNT]) -> AxisMap<u8> {
        AxisMap::new(values)
    }

    #[test]
    fn unison_only() {
        let found = enumerate(&AxisMap::default(), 10, 100);
        assert_eq!(found.coords, vec![Coord::ORIGIN]);
        assert!(!found.truncated);
    }

    #[test]
    fn zero_distance_keeps_origin() {
        let found = enumerate(&depths([3, 3, 3, 0, 0, 0, 0]), 0, 100);
        assert_eq!(found.coords, vec![Coord::ORIGIN]);
    }

    #[test]
    fn distance_cuts_deeper_points() {
        let found = enumerate(&depths([2, 0, 0, 0, 0, 0, 0]), 1, 100);
        let threes: Vec<i32> = found.coords.iter().map(|c| c[Axis::Three]).collect();
        assert_eq!(threes, vec![-1, 0, 1]);
    }

    #[test]
    fn full_box_without_distance_limit() {
        // (2*2+1) * (2*1+1) * (2*1+1)
        let found = enumerate(&depths([2, 1, 0, 0, 1, 0, 0]), 100, 1000);
        assert_eq!(found.coords.len(), 45);
        assert!(!found.truncated);
    }

    #[test]
    fn bounds_hold() {
        let d = depths([3, 2, 2, 1, 1, 0, 1]);
        let found = enumerate(&d, 4, 100_000);
        assert!(!found.coords.is_empty());
        for coord in &found.coords {
            assert!(coord.distance() <= 4);
            for (axis, exponent) in coord.iter() {
                assert!(exponent.unsigned_abs() <= u32::from(d[axis]));
            }
        }
        let mut sorted = found.coords.clone();
        sorted.sort_by_key(|c| c.values().to_vec());
        sorted.dedup();
        assert_eq!(sorted.len(), found.coords.len(), "duplicate coordinates");
    }

    #[test]
    fn deterministic() {
        let d = depths([2, 2, 1, 0, 0, 0, 0]);
        assert_eq!(enumerate(&d, 3, 500), enumerate(&d, 3, 500));
    }

    #[test]
    fn node_ceiling_truncates() {
        let found = enumerate(&depths([12, 12, 12, 0, 0, 0, 0]), 36, 50);
        assert_eq!(found.coords.len(), 50);
        assert!(found.truncated);

        // exactly at the ceiling is not a truncation
        let found = enumerate(&depths([1, 0, 0, 0, 0, 0, 0]), 1, 3);
        assert_eq!(found.coords.len(), 3);
        assert!(!found.truncated);
    }

    #[test]
    fn truncation_keeps_the_center() {
        let found = enumerate(&depths([12, 12, 12, 0, 0, 0, 0]), 36, 50);
        assert!(found.truncated);
        assert!(found.coords.contains(&Coord::ORIGIN));
        // the whole first shell and nothing beyond the third
        for axis in [Axis::Three, Axis::Five, Axis::Seven].iter().copied() {
            assert!(found.coords.contains(&Coord::ORIGIN.step(axis, 1)));
            assert!(found.coords.contains(&Coord::ORIGIN.step(axis, -1)));
        }
        assert!(found.coords.contains(&Coord::ORIGIN.step(Axis::Three, 2)));
        assert!(found.coords.contains(&Coord::ORIGIN.step(Axis::Three, -2)));
        assert!(found.coords.iter().all(|c| c.distance() <= 3));
    }

    #[test]
    fn truncated_result_keeps_order() {
        let found = enumerate(&depths([4, 4, 0, 0, 0, 0, 0]), 8, 20);
        let mut sorted = found.coords.clone();
        sorted.sort_by(|a, b| a.values().cmp(b.values()));
        assert_eq!(found.coords, sorted);
    }
}
