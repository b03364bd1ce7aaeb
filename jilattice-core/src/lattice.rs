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

//! The generated lattice: nodes for pitches, lines for single-step relations.

use log::{debug, error, trace, warn};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::axis::{Axis, AxisMap, Coord};
use crate::edges::build_edges;
use crate::enumerate::enumerate;
use crate::fraction::{FractionError, Int};
use crate::limit::{ratio_odd_limit, side_limit};
use crate::project::{Point, Projector};
use crate::resolve::{complexity_violation, Resolved, Resolver};
use crate::settings::GenerationSettings;

/// A playable pitch of the lattice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatticeNode {
    /// Coordinates and octave, e.g. `1,0,0,0,0,0,0:1`.
    pub id: String,
    pub coord: Coord,
    /// Ratio to the 1/1 before octave reduction.
    pub ratio: f64,
    /// Numerator of the octave reduced ratio.
    pub numerator: Int,
    /// Denominator of the octave reduced ratio.
    pub denominator: Int,
    pub label: String,
    pub frequency: f64,
    pub x: f64,
    pub y: f64,
    /// Prime limit of the numerator, for coloring.
    pub top_limit: Int,
    /// Prime limit of the denominator, for coloring.
    pub bottom_limit: Int,
    pub max_prime: Int,
    /// Odd limit of the reduced ratio, e.g. 15 for `16/15`.
    pub odd_limit: Int,
    pub octave: i32,
}

impl LatticeNode {
    pub fn new(coord: Coord, resolved: Resolved, position: Point, base_frequency: f64) -> Self {
        let numerator = resolved.reduced.numerator();
        let denominator = resolved.reduced.denominator();
        let top_limit = side_limit(numerator);
        let bottom_limit = side_limit(denominator);
        LatticeNode {
            id: format!("{}:{}", coord, resolved.octave),
            coord,
            ratio: resolved.ratio(),
            numerator,
            denominator,
            label: resolved.reduced.label(),
            frequency: resolved.frequency(base_frequency),
            x: position.x,
            y: position.y,
            top_limit,
            bottom_limit,
            max_prime: top_limit.max(bottom_limit),
            odd_limit: ratio_odd_limit(resolved.reduced),
            octave: resolved.octave,
        }
    }

    pub fn position(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

/// A line between two nodes one step apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatticeLine {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Limit of the axis the two nodes differ on.
    pub limit: Int,
}

impl LatticeLine {
    pub fn between(source: &LatticeNode, target: &LatticeNode, axis: Axis) -> Self {
        LatticeLine {
            id: format!("{}|{}", source.id, target.id),
            source_id: source.id.clone(),
            target_id: target.id.clone(),
            x1: source.x,
            y1: source.y,
            x2: target.x,
            y2: target.y,
            limit: axis.limit(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Lattice {
    pub nodes: Vec<LatticeNode>,
    pub lines: Vec<LatticeLine>,
}

impl Lattice {
    pub fn node(&self, id: &str) -> Option<&LatticeNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Nodes in drawing order: higher prime limits first, so that the simple
    /// ratios end up on top. Ties keep the generation order.
    pub fn z_ordered(&self) -> Vec<&LatticeNode> {
        let mut ordered: Vec<&LatticeNode> = self.nodes.iter().collect();
        ordered.sort_by(|a, b| b.max_prime.cmp(&a.max_prime));
        ordered
    }
}

/// The axis ratio table, validated on first use.
static RESOLVER: Lazy<Result<Resolver, FractionError>> = Lazy::new(Resolver::new);

/// Generate the lattice for the given settings.
///
/// This is a pure function of the settings: it does not fail, and the same
/// settings always produce the same nodes and lines in the same order.
///
/// ```
/// # use jilattice_core::{axis::Axis, lattice::generate, settings::GenerationSettings};
/// let settings = GenerationSettings::unison()
///     .with_depth(Axis::Three, 1)
///     .with_max_distance(1);
/// let lattice = generate(&settings);
/// let labels: Vec<&str> = lattice.nodes.iter().map(|n| n.label.as_str()).collect();
/// assert_eq!(labels, vec!["4/3", "1/1", "3/2"]);
/// assert_eq!(lattice.lines.len(), 2);
/// ```
pub fn generate(settings: &GenerationSettings) -> Lattice {
    let resolver = match &*RESOLVER {
        Ok(resolver) => resolver,
        Err(err) => {
            if cfg!(debug_assertions) {
                panic!("bug: invalid axis ratio table: {}", err);
            }
            error!("invalid axis ratio table: {}", err);
            return Lattice::default();
        }
    };

    let depths = AxisMap::from_fn(|axis| settings.effective_depth(axis));
    let found = enumerate(&depths, settings.max_distance, settings.max_nodes);
    if found.truncated {
        warn!(
            "lattice truncated to {} nodes, lower the depths or the maximum distance",
            settings.max_nodes
        );
    }

    let projector = Projector::from_settings(settings);
    let base_frequency = settings.base_frequency.into_inner();

    let mut nodes = Vec::with_capacity(found.coords.len());
    for coord in found.coords.iter() {
        let resolved = match resolver.resolve(coord) {
            Ok(resolved) => resolved,
            Err(err) => {
                trace!("dropping {}: {}", coord, err);
                continue;
            }
        };
        if let Some(axis) = complexity_violation(coord, &settings.limit_complexities) {
            trace!(
                "dropping {} ({}): exceeds complexity of axis {}",
                coord,
                resolved.reduced,
                axis
            );
            continue;
        }
        nodes.push(LatticeNode::new(
            *coord,
            resolved,
            projector.project(coord),
            base_frequency,
        ));
    }

    let lines = build_edges(&nodes, &settings.hidden_limits);
    debug!(
        "generated {} nodes and {} lines from {} candidates",
        nodes.len(),
        lines.len(),
        found.coords.len()
    );
    Lattice { nodes, lines }
}
