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

//! Writing a generated lattice.

use std::io::{self, Write};
use std::str::FromStr;

use serde::Serialize;

use jilattice_core::canvas::CanvasExtent;
use jilattice_core::{Lattice, LatticeLine, LatticeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human readable listing.
    Text,
    /// The document the keyboard front end consumes.
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format {:?}", other)),
        }
    }
}

#[derive(Serialize)]
struct Document<'a> {
    nodes: &'a [LatticeNode],
    lines: &'a [LatticeLine],
    canvas: &'a CanvasExtent,
}

pub fn write_lattice<W: Write>(
    out: &mut W,
    lattice: &Lattice,
    canvas: &CanvasExtent,
    format: Format,
) -> io::Result<()> {
    match format {
        Format::Text => write_text(out, lattice, canvas),
        Format::Json => {
            let document = Document {
                nodes: &lattice.nodes,
                lines: &lattice.lines,
                canvas,
            };
            serde_json::to_writer_pretty(&mut *out, &document)?;
            writeln!(out)
        }
    }
}

fn write_text<W: Write>(out: &mut W, lattice: &Lattice, canvas: &CanvasExtent) -> io::Result<()> {
    writeln!(
        out,
        "lattice: {} nodes, {} lines",
        lattice.nodes.len(),
        lattice.lines.len()
    )?;
    writeln!(
        out,
        "canvas: {}x{}, origin at ({}, {}){}",
        canvas.width,
        canvas.height,
        canvas.center_x,
        canvas.center_y,
        if canvas.clamped { " (clamped)" } else { "" }
    )?;
    writeln!(out, "nodes:")?;
    for node in &lattice.nodes {
        writeln!(
            out,
            "  {:<6} {:>10.3} Hz  octave {:>2}  limits {}/{}  at ({:.1}, {:.1})",
            node.label,
            node.frequency,
            node.octave,
            node.top_limit,
            node.bottom_limit,
            node.x,
            node.y
        )?;
    }
    writeln!(out, "lines:")?;
    for line in &lattice.lines {
        let label = |id: &str| lattice.node(id).map_or("?", |node| node.label.as_str());
        writeln!(
            out,
            "  {} - {}  ({}-limit)",
            label(&line.source_id),
            label(&line.target_id),
            line.limit
        )?;
    }
    Ok(())
}
