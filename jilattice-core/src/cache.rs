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

//! Memoization of the most recently generated lattice.

use log::trace;

use crate::lattice::{generate, Lattice};
use crate::settings::GenerationSettings;

/// Remembers the lattice of the last settings it was asked for.
///
/// Settings panels fire a change for every touched control, most of which
/// leave the lattice relevant settings as they were.
#[derive(Debug, Default)]
pub struct LatticeCache {
    entry: Option<(GenerationSettings, Lattice)>,
    generations: usize,
}

impl LatticeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lattice for `settings`, generating it only if the settings changed.
    pub fn get_or_generate(&mut self, settings: &GenerationSettings) -> &Lattice {
        let fresh = match &self.entry {
            Some((cached, _)) => cached != settings,
            None => true,
        };
        if fresh {
            self.generations += 1;
            trace!("regenerating lattice (key {:016x})", settings.cache_key());
            self.entry = Some((settings.clone(), generate(settings)));
        }
        match &self.entry {
            Some((_, lattice)) => lattice,
            None => unreachable!("entry was just filled"),
        }
    }

    /// Number of times a lattice actually had to be generated.
    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
