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

//! Implementation of the lattice compiler (latticec).

pub mod output;
pub mod overrides;

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use structopt::StructOpt;

use jilattice_core::axis::Axis;
use jilattice_core::canvas::CanvasExtent;
use jilattice_core::nonnan::F64N;
use jilattice_core::{generate, GenerationSettings};

use output::Format;
use overrides::{AxisValue, Overrides};

#[derive(Debug, StructOpt)]
#[structopt(name = "latticec", about = "Generating just intonation lattices")]
pub struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Settings document (JSON) as stored by the keyboard app. Defaults are used if not given.
    #[structopt(short, long, parse(from_os_str))]
    settings: Option<PathBuf>,

    /// Depth of an axis as `<limit>=<depth>`, e.g. `7=1`.
    #[structopt(short, long, number_of_values = 1)]
    depth: Vec<AxisValue>,

    /// Complexity ceiling of an axis as `<limit>=<ceiling>`, e.g. `3=27`.
    #[structopt(short, long, number_of_values = 1)]
    complexity: Vec<AxisValue>,

    /// Hide an axis, collapsing it to depth zero.
    #[structopt(long, number_of_values = 1)]
    hide: Vec<Axis>,

    /// Maximum sum of absolute exponents of a node.
    #[structopt(long)]
    max_distance: Option<u32>,

    /// Horizontal stretch of the drawing.
    #[structopt(long)]
    aspect_ratio: Option<F64N>,

    /// Frequency of the 1/1 in Hz.
    #[structopt(long)]
    base_frequency: Option<F64N>,

    /// Distance between neighbouring nodes in pixels.
    #[structopt(long)]
    spacing: Option<F64N>,

    /// Upper bound on the number of enumerated coordinates.
    #[structopt(long)]
    max_nodes: Option<usize>,

    /// Output format, `text` or `json`.
    #[structopt(short, long, default_value = "text")]
    format: Format,

    /// Padding around the outermost nodes of the canvas.
    #[structopt(long, default_value = "50")]
    padding: f64,

    /// Largest canvas side the renderer can handle.
    #[structopt(long, default_value = "16384")]
    max_texture_size: u32,

    /// Output file. The lattice is written to stdout if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

impl Opt {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            depths: self.depth.clone(),
            complexities: self.complexity.clone(),
            hidden: self.hide.clone(),
            max_distance: self.max_distance,
            aspect_ratio: self.aspect_ratio,
            base_frequency: self.base_frequency,
            spacing: self.spacing,
            max_nodes: self.max_nodes,
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<GenerationSettings, Box<dyn Error>> {
    match path {
        None => Ok(GenerationSettings::default()),
        Some(path) => {
            debug!("reading settings from {}", path.display());
            let text = std::fs::read_to_string(path)?;
            Ok(GenerationSettings::from_json(&text)?)
        }
    }
}

pub fn lattice_main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level)?;

    run(&opt)
}

pub fn run(opt: &Opt) -> Result<(), Box<dyn Error>> {
    let settings = opt.overrides().apply(load_settings(opt.settings.as_deref())?);
    let lattice = generate(&settings);
    let canvas = CanvasExtent::fit(&lattice, opt.padding, opt.max_texture_size);
    if canvas.clamped {
        warn!(
            "lattice does not fit into {0}x{0}, canvas clamped",
            opt.max_texture_size
        );
    }
    info!(
        "{} nodes, {} lines on a {}x{} canvas",
        lattice.nodes.len(),
        lattice.lines.len(),
        canvas.width,
        canvas.height
    );

    match &opt.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            output::write_lattice(&mut out, &lattice, &canvas, opt.format)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            output::write_lattice(&mut out, &lattice, &canvas, opt.format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_command_line() {
        let opt = Opt::from_iter(&[
            "latticec", "-d", "7=1", "--depth", "3=3", "-c", "3=27", "--hide", "11", "--max-distance",
            "5", "--aspect-ratio", "1.5", "-f", "json",
        ]);
        assert_eq!(opt.format, Format::Json);
        let settings = opt.overrides().apply(GenerationSettings::default());
        assert_eq!(settings.limit_depths[Axis::Seven], 1);
        assert_eq!(settings.limit_depths[Axis::Three], 3);
        assert_eq!(settings.limit_depths[Axis::Five], 2);
        assert_eq!(settings.limit_complexities[Axis::Three], Some(27));
        assert!(settings.hidden_limits[Axis::Eleven]);
        assert_eq!(settings.max_distance, 5);
        assert_eq!(settings.aspect_ratio.into_inner(), 1.5);
    }

    #[test]
    fn rejects_unknown_axis() {
        assert!(Opt::from_iter_safe(&["latticec", "--hide", "4"]).is_err());
        assert!(Opt::from_iter_safe(&["latticec", "-d", "6=1"]).is_err());
    }

    #[test]
    fn writes_output_file() {
        let path = std::env::temp_dir().join(format!("latticec-test-{}.json", std::process::id()));
        let opt = Opt::from_iter(&[
            "latticec",
            "-f",
            "json",
            "-o",
            path.to_str().unwrap(),
        ]);
        run(&opt).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        // 3- and 5-axes at depth two within the default distance
        assert_eq!(value["nodes"].as_array().unwrap().len(), 25);
    }
}
