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

//! Floats that cannot be NaN by construction, and hence are `Ord` and `Eq`.
//!
//! Used for the floating point knobs of the lattice (aspect ratio, base
//! frequency) so that they can be compared and hashed for memoization.

use std::hash::{Hash, Hasher};
use std::{fmt::Display, num::ParseFloatError, str::FromStr};

/// A non-nan f64.
#[derive(Debug, Clone, Copy)]
pub struct F64N(f64);

impl F64N {
    pub fn new(value: f64) -> Option<F64N> {
        if value.is_nan() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn into_inner(self) -> f64 {
        self.0
    }
}

impl PartialEq for F64N {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for F64N {}

impl PartialOrd for F64N {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Ord for F64N {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).expect("bug: non-nan is nan")
    }
}

/// Hashes the bit pattern, with both zeros mapped to the same value to stay
/// consistent with `Eq`.
///
/// ```
/// # use jilattice_core::nonnan::F64N;
/// # use std::collections::HashSet;
/// let mut set = HashSet::new();
/// set.insert(F64N::new(0.0).unwrap());
/// assert!(set.contains(&F64N::new(-0.0).unwrap()));
/// ```
impl Hash for F64N {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let canonical = if self.0 == 0.0 { 0.0f64 } else { self.0 };
        canonical.to_bits().hash(state);
    }
}

impl FromStr for F64N {
    type Err = ParseNonNanError;

    /// ```
    /// # use jilattice_core::nonnan::*;
    /// assert_eq!("1.5".parse::<F64N>().unwrap().into_inner(), 1.5);
    /// assert!(matches!("NaN".parse::<F64N>(), Err(ParseNonNanError::Nan)));
    /// assert!("abc".parse::<F64N>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.parse::<f64>()?).ok_or(ParseNonNanError::Nan)
    }
}

impl Display for F64N {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub enum ParseNonNanError {
    Nan,
    Other(std::num::ParseFloatError),
}

impl Display for ParseNonNanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseNonNanError::Nan => write!(f, "float was nan"),
            ParseNonNanError::Other(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for ParseNonNanError {}

impl From<ParseFloatError> for ParseNonNanError {
    fn from(err: ParseFloatError) -> Self {
        ParseNonNanError::Other(err)
    }
}
