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

//! Lines between lattice nodes that are a single consonant step apart.

use std::collections::HashMap;

use crate::axis::{Axis, AxisMap, Coord};
use crate::lattice::{LatticeLine, LatticeNode};

/// Connect every pair of nodes that differ by exactly one step along one
/// visible axis.
///
/// Only the positive direction of each axis is looked up, so every pair is
/// found exactly once. Lines are ordered by their lower node, then by axis.
pub fn build_edges(nodes: &[LatticeNode], hidden: &AxisMap<bool>) -> Vec<LatticeLine> {
    let index: HashMap<Coord, &LatticeNode> = nodes.iter().map(|node| (node.coord, node)).collect();

    let visible: Vec<Axis> = Axis::ALL.iter().copied().filter(|axis| !hidden[*axis]).collect();

    let mut lines = Vec::new();
    for source in nodes {
        for axis in visible.iter().copied() {
            if let Some(target) = index.get(&source.coord.step(axis, 1)) {
                lines.push(LatticeLine::between(source, target, axis));
            }
        }
    }
    lines
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::project::Point;
    use crate::resolve::Resolver;

    fn nodes(coords: &[[i32; Axis::COUNT]]) -> Vec<LatticeNode> {
        let resolver = Resolver::new().unwrap();
        coords
            .iter()
            .map(|c| {
                let coord = Coord::new(*c);
                let resolved = resolver.resolve(&coord).unwrap();
                LatticeNode::new(coord, resolved, Point { x: 0.0, y: 0.0 }, 440.0)
            })
            .collect()
    }

    #[test]
    fn single_steps_only() {
        let nodes = nodes(&[
            [0, 0, 0, 0, 0, 0, 0],
            [1, 0, 0, 0, 0, 0, 0],
            [2, 0, 0, 0, 0, 0, 0],
            [1, 1, 0, 0, 0, 0, 0],
            // two steps away from every other node
            [0, 1, 1, 0, 0, 0, 0],
        ]);
        let lines = build_edges(&nodes, &AxisMap::default());
        let pairs: Vec<(String, String, i64)> = lines
            .iter()
            .map(|l| (l.source_id.clone(), l.target_id.clone(), l.limit))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (nodes[0].id.clone(), nodes[1].id.clone(), 3),
                (nodes[1].id.clone(), nodes[2].id.clone(), 3),
                (nodes[1].id.clone(), nodes[3].id.clone(), 5),
            ]
        );
    }

    #[test]
    fn hidden_axes_have_no_lines() {
        let nodes = nodes(&[[0, 0, 0, 0, 0, 0, 0], [0, 0, 1, 0, 0, 0, 0], [1, 0, 0, 0, 0, 0, 0]]);
        let mut hidden = AxisMap::default();
        hidden[Axis::Seven] = true;
        let lines = build_edges(&nodes, &hidden);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].limit, 3);
    }

    #[test]
    fn composite_axis_is_its_own_direction() {
        // 9/8 via the 9-axis is adjacent to the origin, 9/8 via two 3-steps is not
        let nodes = nodes(&[[0, 0, 0, 0, 0, 0, 0], [0, 0, 0, 1, 0, 0, 0], [2, 0, 0, 0, 0, 0, 0]]);
        let lines = build_edges(&nodes, &AxisMap::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].limit, 9);
        assert_eq!(lines[0].target_id, nodes[1].id);
    }
}
