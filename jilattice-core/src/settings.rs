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

//! Settings that shape the generated lattice.
//!
//! The application stores these as part of a larger JSON settings object.
//! Loading is lenient: anything malformed inside the recognized keys is
//! replaced by a safe default and reported through the log, so that a
//! corrupt settings file still yields a playable lattice.

use std::collections::hash_map::DefaultHasher;
use std::convert::TryFrom;
use std::hash::{Hash, Hasher};

use log::warn;
use serde::Deserialize;
use serde_json::Value;
use snafu::{ResultExt, Snafu};

use crate::axis::{Axis, AxisMap};
use crate::fraction::Int;
use crate::nonnan::F64N;

/// Maximum number of steps from the center along a single axis.
pub const MAX_DEPTH: u8 = 12;
/// Range of the per-axis complexity ceiling.
pub const MIN_COMPLEXITY: Int = 1;
pub const MAX_COMPLEXITY: Int = 10_000;
/// Hard ceiling on the number of generated nodes.
pub const DEFAULT_MAX_NODES: usize = 4096;

const DEFAULT_MAX_DISTANCE: u32 = 4;
const DEFAULT_ASPECT_RATIO: f64 = 1.0;
/// Middle C.
const DEFAULT_BASE_FREQUENCY: f64 = 261.63;
const DEFAULT_SPACING: f64 = 100.0;

/// Read-only input to lattice generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationSettings {
    /// Maximum number of steps from the center, per axis.
    pub limit_depths: AxisMap<u8>,
    /// Maximum odd limit of a node that uses the axis, if any.
    pub limit_complexities: AxisMap<Option<Int>>,
    /// Hidden axes are collapsed to depth zero.
    pub hidden_limits: AxisMap<bool>,
    /// Maximum total number of steps from the center, summed over all axes.
    pub max_distance: u32,
    /// Horizontal stretch of the projected lattice.
    pub aspect_ratio: F64N,
    /// Frequency of the 1/1 in Hz.
    pub base_frequency: F64N,
    /// Screen distance of a single step.
    pub spacing: F64N,
    pub max_nodes: usize,
}

#[derive(Debug, Snafu)]
pub enum SettingsError {
    #[snafu(display("Could not parse settings JSON: {}", source))]
    Json { source: serde_json::Error },
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let mut limit_depths = AxisMap::default();
        limit_depths[Axis::Three] = 2;
        limit_depths[Axis::Five] = 2;
        Self {
            limit_depths,
            limit_complexities: AxisMap::default(),
            hidden_limits: AxisMap::default(),
            max_distance: DEFAULT_MAX_DISTANCE,
            aspect_ratio: F64N::new(DEFAULT_ASPECT_RATIO).expect("bug: default is nan"),
            base_frequency: F64N::new(DEFAULT_BASE_FREQUENCY).expect("bug: default is nan"),
            spacing: F64N::new(DEFAULT_SPACING).expect("bug: default is nan"),
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl GenerationSettings {
    /// Settings where every axis has depth zero, leaving only the 1/1.
    pub fn unison() -> Self {
        Self {
            limit_depths: AxisMap::default(),
            ..Self::default()
        }
    }

    // ==================== Builders ====================

    /// Set the depth of an axis, clamped to [`MAX_DEPTH`].
    pub fn with_depth(mut self, axis: Axis, depth: u8) -> Self {
        self.limit_depths[axis] = depth.min(MAX_DEPTH);
        self
    }

    /// Set the complexity ceiling of an axis, clamped to the allowed range.
    pub fn with_complexity(mut self, axis: Axis, ceiling: Int) -> Self {
        self.limit_complexities[axis] = Some(ceiling.max(MIN_COMPLEXITY).min(MAX_COMPLEXITY));
        self
    }

    pub fn with_hidden(mut self, axis: Axis) -> Self {
        self.hidden_limits[axis] = true;
        self
    }

    pub fn with_max_distance(mut self, max_distance: u32) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: F64N) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    // ==================== Queries ====================

    pub fn is_hidden(&self, axis: Axis) -> bool {
        self.hidden_limits[axis]
    }

    /// The depth actually walked along an axis, zero for hidden axes.
    pub fn effective_depth(&self, axis: Axis) -> u8 {
        if self.is_hidden(axis) {
            0
        } else {
            self.limit_depths[axis].min(MAX_DEPTH)
        }
    }

    /// Hash of everything that influences generation, for memoization.
    pub fn cache_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    // ==================== Loading ====================

    /// Read the lattice settings out of an application settings JSON document.
    ///
    /// Only broken JSON is an error. Missing or malformed values fall back to
    /// safe defaults.
    ///
    /// ```
    /// # use jilattice_core::{axis::Axis, settings::GenerationSettings};
    /// let settings = GenerationSettings::from_json(r#"{
    ///     "limitDepths": {"3": 2, "5": 1, "7": 0, "9": 0, "11": 0, "13": 0, "15": 0},
    ///     "hiddenLimits": [5],
    ///     "latticeMaxDistance": 3,
    ///     "latticeAspectRatio": 1.5
    /// }"#).unwrap();
    /// assert_eq!(settings.limit_depths[Axis::Three], 2);
    /// assert!(settings.is_hidden(Axis::Five));
    /// assert_eq!(settings.effective_depth(Axis::Five), 0);
    /// assert_eq!(settings.max_distance, 3);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let raw: RawSettings = serde_json::from_str(text).context(Json)?;
        Ok(raw.sanitize())
    }

    pub fn from_value(value: Value) -> Result<Self, SettingsError> {
        let raw: RawSettings = serde_json::from_value(value).context(Json)?;
        Ok(raw.sanitize())
    }
}

/// The lattice related subset of the application settings, as stored.
///
/// Values are kept as untyped JSON so that one bad entry does not reject the
/// whole document.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSettings {
    limit_depths: Option<Value>,
    limit_complexities: Option<Value>,
    hidden_limits: Option<Value>,
    lattice_max_distance: Option<Value>,
    lattice_aspect_ratio: Option<Value>,
    base_frequency: Option<Value>,
    lattice_spacing: Option<Value>,
    max_nodes: Option<Value>,
}

impl RawSettings {
    fn sanitize(self) -> GenerationSettings {
        let defaults = GenerationSettings::default();

        let limit_depths = match &self.limit_depths {
            None | Some(Value::Null) => defaults.limit_depths,
            Some(depths) => per_axis("limitDepths", depths, |axis, value| match value {
                None => {
                    warn!("limitDepths: missing axis {}, using depth 0", axis);
                    0
                }
                Some(value) => match as_int(value) {
                    Some(depth) if depth < 0 => {
                        warn!("limitDepths: negative depth {} for axis {}, using 0", depth, axis);
                        0
                    }
                    Some(depth) if depth > MAX_DEPTH as Int => {
                        warn!(
                            "limitDepths: depth {} for axis {} exceeds {}, clamping",
                            depth, axis, MAX_DEPTH
                        );
                        MAX_DEPTH
                    }
                    Some(depth) => depth as u8,
                    None => {
                        warn!("limitDepths: invalid depth {} for axis {}, using 0", value, axis);
                        0
                    }
                },
            }),
        };

        let limit_complexities = match &self.limit_complexities {
            None | Some(Value::Null) => AxisMap::default(),
            Some(ceilings) => per_axis("limitComplexities", ceilings, |axis, value| {
                let value = value.filter(|v| !v.is_null())?;
                match as_int(value) {
                    Some(ceiling) => Some(ceiling.max(MIN_COMPLEXITY).min(MAX_COMPLEXITY)),
                    None => {
                        warn!(
                            "limitComplexities: invalid ceiling {} for axis {}, using unlimited",
                            value, axis
                        );
                        None
                    }
                }
            }),
        };

        let mut hidden_limits = AxisMap::default();
        match &self.hidden_limits {
            None | Some(Value::Null) => {}
            Some(Value::Array(limits)) => {
                for limit in limits {
                    match as_int(limit).and_then(Axis::from_limit) {
                        Some(axis) => hidden_limits[axis] = true,
                        None => warn!("hiddenLimits: ignoring unknown limit {}", limit),
                    }
                }
            }
            Some(other) => warn!("hiddenLimits: expected a list, got {}", other),
        }

        let max_distance = match self.lattice_max_distance.as_ref().map(|v| (v, as_int(v))) {
            None | Some((Value::Null, _)) => defaults.max_distance,
            Some((_, Some(distance))) if distance >= 0 => distance.min(u32::MAX as Int) as u32,
            Some((value, _)) => {
                warn!(
                    "latticeMaxDistance: invalid value {}, using {}",
                    value, defaults.max_distance
                );
                defaults.max_distance
            }
        };

        let max_nodes = match self.max_nodes.as_ref().map(|v| (v, as_int(v))) {
            None | Some((Value::Null, _)) => defaults.max_nodes,
            Some((_, Some(count))) if count > 0 => usize::try_from(count).unwrap_or(usize::MAX),
            Some((value, _)) => {
                warn!("maxNodes: invalid value {}, using {}", value, defaults.max_nodes);
                defaults.max_nodes
            }
        };

        GenerationSettings {
            limit_depths,
            limit_complexities,
            hidden_limits,
            max_distance,
            aspect_ratio: positive_float(
                "latticeAspectRatio",
                self.lattice_aspect_ratio.as_ref(),
                defaults.aspect_ratio,
            ),
            base_frequency: positive_float(
                "baseFrequency",
                self.base_frequency.as_ref(),
                defaults.base_frequency,
            ),
            spacing: positive_float("latticeSpacing", self.lattice_spacing.as_ref(), defaults.spacing),
            max_nodes,
        }
    }
}

/// Look up every axis in an object keyed by limit number (`{"3": .., "5": ..}`).
fn per_axis<T, F>(name: &str, value: &Value, mut f: F) -> AxisMap<T>
where
    T: Default,
    F: FnMut(Axis, Option<&Value>) -> T,
{
    match value {
        Value::Object(entries) => {
            for key in entries.keys() {
                let known = key.trim().parse::<Int>().ok().and_then(Axis::from_limit);
                if known.is_none() {
                    warn!("{}: ignoring unknown axis {:?}", name, key);
                }
            }
            AxisMap::from_fn(|axis| f(axis, entries.get(&axis.limit().to_string())))
        }
        other => {
            warn!("{}: expected an object, got {}", name, other);
            AxisMap::default()
        }
    }
}

/// Integers may be stored as numbers or numeric strings.
fn as_int(value: &Value) -> Option<Int> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < Int::MAX as f64)
                .map(|f| f as Int)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn positive_float(name: &str, value: Option<&Value>, default: F64N) -> F64N {
    let value = match value {
        None | Some(Value::Null) => return default,
        Some(value) => value,
    };
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    match parsed.filter(|f| f.is_finite() && *f > 0.0).and_then(F64N::new) {
        Some(f) => f,
        None => {
            warn!("{}: invalid value {}, using {}", name, value, default);
            default
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn application_settings_document() {
        let settings = GenerationSettings::from_json(
            r#"{
                "theme": "dark",
                "limitDepths": {"3": 3, "5": 2, "7": 1, "9": 0, "11": 0, "13": 0, "15": 0},
                "limitComplexities": {"3": 243, "5": 125, "7": null},
                "hiddenLimits": [11, 13],
                "latticeMaxDistance": 5,
                "latticeAspectRatio": 0.75,
                "baseFrequency": 440
            }"#,
        )
        .unwrap();

        assert_eq!(settings.limit_depths.values(), &[3, 2, 1, 0, 0, 0, 0]);
        assert_eq!(settings.limit_complexities[Axis::Three], Some(243));
        assert_eq!(settings.limit_complexities[Axis::Five], Some(125));
        assert_eq!(settings.limit_complexities[Axis::Seven], None);
        assert!(settings.is_hidden(Axis::Eleven));
        assert!(settings.is_hidden(Axis::Thirteen));
        assert!(!settings.is_hidden(Axis::Three));
        assert_eq!(settings.max_distance, 5);
        assert_eq!(settings.aspect_ratio.into_inner(), 0.75);
        assert_eq!(settings.base_frequency.into_inner(), 440.0);
        assert_eq!(settings.max_nodes, DEFAULT_MAX_NODES);
    }

    #[test]
    fn malformed_values_fall_back() {
        let settings = GenerationSettings::from_json(
            r#"{
                "limitDepths": {"3": -2, "5": "4", "7": 99, "9": "deep", "17": 3},
                "limitComplexities": {"3": 0, "5": 1000000, "7": "lots"},
                "hiddenLimits": [2, "7"],
                "latticeMaxDistance": -1,
                "latticeAspectRatio": 0,
                "maxNodes": 0
            }"#,
        )
        .unwrap();

        // negative, numeric string, too deep, garbage, missing
        assert_eq!(settings.limit_depths.values(), &[0, 4, MAX_DEPTH, 0, 0, 0, 0]);
        assert_eq!(settings.limit_complexities[Axis::Three], Some(MIN_COMPLEXITY));
        assert_eq!(settings.limit_complexities[Axis::Five], Some(MAX_COMPLEXITY));
        assert_eq!(settings.limit_complexities[Axis::Seven], None);
        assert!(settings.is_hidden(Axis::Seven));
        assert_eq!(settings.max_distance, DEFAULT_MAX_DISTANCE);
        assert_eq!(settings.aspect_ratio.into_inner(), DEFAULT_ASPECT_RATIO);
        assert_eq!(settings.max_nodes, DEFAULT_MAX_NODES);
    }

    #[test]
    fn wrong_shapes_fall_back() {
        let settings =
            GenerationSettings::from_json(r#"{"limitDepths": [1, 2], "hiddenLimits": 3}"#).unwrap();
        assert_eq!(settings.limit_depths, AxisMap::default());
        assert_eq!(settings.hidden_limits, AxisMap::default());
    }

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(
            GenerationSettings::from_json("{}").unwrap(),
            GenerationSettings::default()
        );
    }

    #[test]
    fn nulls_use_defaults() {
        let settings = GenerationSettings::from_json(
            r#"{
                "limitDepths": null,
                "limitComplexities": null,
                "latticeMaxDistance": null,
                "latticeAspectRatio": null,
                "maxNodes": null
            }"#,
        )
        .unwrap();
        assert_eq!(settings, GenerationSettings::default());
    }

    #[test]
    fn huge_node_ceiling_saturates() {
        let settings = GenerationSettings::from_json(r#"{"maxNodes": 9007199254740993}"#).unwrap();
        let expected = usize::try_from(9_007_199_254_740_993i64).unwrap_or(usize::MAX);
        assert_eq!(settings.max_nodes, expected);
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(GenerationSettings::from_json("{\"limitDepths\": ").is_err());
        assert!(GenerationSettings::from_json("42").is_err());
    }

    #[test]
    fn cache_key_tracks_changes() {
        let a = GenerationSettings::default();
        let b = a.clone();
        assert_eq!(a.cache_key(), b.cache_key());
        let c = a.clone().with_depth(Axis::Seven, 1);
        assert_ne!(a.cache_key(), c.cache_key());
    }

    #[test]
    fn hidden_axes_have_no_depth() {
        let settings = GenerationSettings::unison()
            .with_depth(Axis::Five, 20)
            .with_hidden(Axis::Five);
        assert_eq!(settings.limit_depths[Axis::Five], MAX_DEPTH);
        assert_eq!(settings.effective_depth(Axis::Five), 0);
    }
}
