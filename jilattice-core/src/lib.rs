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

// Building the lattice
pub mod axis;
pub mod edges;
pub mod enumerate;
pub mod lattice;
pub mod project;
pub mod resolve;
pub mod settings;

// Consumers of the lattice
pub mod cache;
pub mod canvas;

// Utility modules
pub mod fraction;
pub mod limit;
pub mod nonnan;

pub use lattice::{generate, Lattice, LatticeLine, LatticeNode};
pub use settings::GenerationSettings;
