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

//! Command line overrides of individual settings.

use std::str::FromStr;

use log::warn;
use snafu::{ResultExt, Snafu};

use jilattice_core::axis::{Axis, ParseAxisError};
use jilattice_core::fraction::Int;
use jilattice_core::nonnan::F64N;
use jilattice_core::settings::{GenerationSettings, MAX_COMPLEXITY, MAX_DEPTH, MIN_COMPLEXITY};

#[derive(Debug, Snafu)]
pub enum OverrideError {
    #[snafu(display("expected <limit>=<value>, got {:?}", input))]
    Malformed { input: String },
    #[snafu(display("{}", source))]
    BadAxis { source: ParseAxisError },
    #[snafu(display("invalid value {:?} for axis {}", value, axis))]
    BadValue { axis: Axis, value: String },
}

/// A per axis value given as `<limit>=<value>`, e.g. `7=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisValue {
    pub axis: Axis,
    pub value: Int,
}

impl FromStr for AxisValue {
    type Err = OverrideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, '=');
        let (limit, value) = match (parts.next(), parts.next()) {
            (Some(limit), Some(value)) => (limit, value),
            _ => return Malformed { input: s }.fail(),
        };
        let axis: Axis = limit.parse().context(BadAxis)?;
        let value = value
            .trim()
            .parse()
            .ok()
            .ok_or_else(|| OverrideError::BadValue {
                axis,
                value: value.to_string(),
            })?;
        Ok(AxisValue { axis, value })
    }
}

/// Settings given on the command line, applied on top of a settings document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub depths: Vec<AxisValue>,
    pub complexities: Vec<AxisValue>,
    pub hidden: Vec<Axis>,
    pub max_distance: Option<u32>,
    pub aspect_ratio: Option<F64N>,
    pub base_frequency: Option<F64N>,
    pub spacing: Option<F64N>,
    pub max_nodes: Option<usize>,
}

impl Overrides {
    /// Apply the overrides in order, later values for the same axis win.
    ///
    /// Out of range values are clamped the same way a settings document is
    /// sanitized.
    pub fn apply(&self, mut settings: GenerationSettings) -> GenerationSettings {
        for AxisValue { axis, value } in self.depths.iter().copied() {
            let depth = value.max(0).min(Int::from(MAX_DEPTH));
            if depth != value {
                warn!("depth {} of axis {} clamped to {}", value, axis, depth);
            }
            settings.limit_depths[axis] = depth as u8;
        }
        for AxisValue { axis, value } in self.complexities.iter().copied() {
            let ceiling = value.max(MIN_COMPLEXITY).min(MAX_COMPLEXITY);
            if ceiling != value {
                warn!("complexity {} of axis {} clamped to {}", value, axis, ceiling);
            }
            settings.limit_complexities[axis] = Some(ceiling);
        }
        for axis in self.hidden.iter().copied() {
            settings.hidden_limits[axis] = true;
        }
        if let Some(max_distance) = self.max_distance {
            settings.max_distance = max_distance;
        }
        if let Some(max_nodes) = self.max_nodes {
            settings.max_nodes = max_nodes;
        }
        let positive = |what: &str, value: F64N| {
            if value.into_inner() > 0.0 && value.into_inner().is_finite() {
                Some(value)
            } else {
                warn!("ignoring non-positive {} {}", what, value);
                None
            }
        };
        if let Some(aspect_ratio) = self.aspect_ratio.and_then(|v| positive("aspect ratio", v)) {
            settings.aspect_ratio = aspect_ratio;
        }
        if let Some(base) = self.base_frequency.and_then(|v| positive("base frequency", v)) {
            settings.base_frequency = base;
        }
        if let Some(spacing) = self.spacing.and_then(|v| positive("spacing", v)) {
            settings.spacing = spacing;
        }
        settings
    }
}
