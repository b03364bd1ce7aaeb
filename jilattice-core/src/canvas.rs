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

//! Size of the canvas the lattice is drawn on.

use serde::Serialize;

use crate::lattice::Lattice;

/// Largest texture size that is safe to assume on current GPUs.
pub const DEFAULT_MAX_TEXTURE_SIZE: u32 = 16_384;

/// A canvas centred on the 1/1, large enough for every node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasExtent {
    pub width: u32,
    pub height: u32,
    /// Canvas pixel of the lattice origin.
    pub center_x: f64,
    pub center_y: f64,
    /// Set when the lattice needed more than the maximum texture size.
    pub clamped: bool,
}

impl CanvasExtent {
    /// Fit a canvas around all nodes, with `padding` on every side.
    ///
    /// The canvas is symmetric around the origin so that the 1/1 stays in the
    /// middle while panning. Each side is clamped to `max_texture_size`.
    ///
    /// ```
    /// # use jilattice_core::canvas::CanvasExtent;
    /// # use jilattice_core::lattice::Lattice;
    /// let extent = CanvasExtent::fit(&Lattice::default(), 50.0, 4096);
    /// assert_eq!((extent.width, extent.height), (100, 100));
    /// assert_eq!((extent.center_x, extent.center_y), (50.0, 50.0));
    /// assert!(!extent.clamped);
    /// ```
    pub fn fit(lattice: &Lattice, padding: f64, max_texture_size: u32) -> Self {
        let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
        let (reach_x, reach_y) = lattice
            .nodes
            .iter()
            .fold((0.0f64, 0.0f64), |(rx, ry), node| {
                (rx.max(node.x.abs()), ry.max(node.y.abs()))
            });

        let wanted_width = 2.0 * (reach_x + padding);
        let wanted_height = 2.0 * (reach_y + padding);
        let max = f64::from(max_texture_size);
        let clamped = wanted_width > max || wanted_height > max;
        let width = wanted_width.ceil().min(max) as u32;
        let height = wanted_height.ceil().min(max) as u32;

        CanvasExtent {
            width,
            height,
            center_x: f64::from(width) / 2.0,
            center_y: f64::from(height) / 2.0,
            clamped,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::axis::Axis;
    use crate::lattice::generate;
    use crate::settings::GenerationSettings;

    #[test]
    fn fits_all_nodes() {
        let lattice = generate(&GenerationSettings::default());
        let extent = CanvasExtent::fit(&lattice, 40.0, DEFAULT_MAX_TEXTURE_SIZE);
        assert!(!extent.clamped);
        for node in &lattice.nodes {
            let x = extent.center_x + node.x;
            let y = extent.center_y + node.y;
            assert!(x >= 40.0 && x <= f64::from(extent.width) - 40.0);
            assert!(y >= 40.0 && y <= f64::from(extent.height) - 40.0);
        }
    }

    #[test]
    fn clamps_to_texture_size() {
        let settings = GenerationSettings::unison()
            .with_depth(Axis::Three, 12)
            .with_max_distance(12);
        let lattice = generate(&settings);
        let extent = CanvasExtent::fit(&lattice, 0.0, 1024);
        assert!(extent.clamped);
        assert_eq!(extent.width, 1024);
        assert!(extent.height <= 1024);
    }
}
