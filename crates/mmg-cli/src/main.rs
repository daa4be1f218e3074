//! `mmg`: build per-mode street graphs and their switch points from an OSM
//! PBF extract and write them as CSV interchange files.
//!
//! ```text
//! mmg munich.osm.pbf --output-directory out --locator rtree
//! RUST_LOG=debug mmg munich.osm.pbf --config build.toml
//! ```
//!
//! A layer that fails validation aborts the run before any file is written.

mod config;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::{Env, Target};

use mmg_core::Mode;
use mmg_graph::LocatorKind;
use mmg_graph::osm::read_pbf;
use mmg_output::{CsvGraphWriter, write_coords, write_graph};

use crate::config::{BuildConfig, ConfigError};

#[derive(Parser, Debug)]
#[command(author, version, about = "Build a multimodal street graph from OpenStreetMap data", long_about = None)]
struct Cli {
    /// Input PBF file
    #[arg(value_name = "INPUT_FILE")]
    pbf: PathBuf,

    /// TOML file with build parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory the CSV files are written to
    #[arg(long)]
    output_directory: Option<PathBuf>,

    /// Layers to build, comma separated (e.g. private_car,foot)
    #[arg(long, value_delimiter = ',')]
    modes: Option<Vec<Mode>>,

    /// Nearest-vertex search: brute_force or rtree
    #[arg(long)]
    locator: Option<LocatorKind>,

    /// Build the layers one after another
    #[arg(long)]
    sequential: bool,

    /// Also write coords.csv
    #[arg(long)]
    write_coords: bool,
}

impl Cli {
    /// File values (or defaults) with flags applied on top.
    fn build_config(&self) -> Result<BuildConfig, ConfigError> {
        let mut config = match &self.config {
            None => BuildConfig::default(),
            Some(f) => {
                log::info!("reading configuration from {}", f.display());
                BuildConfig::try_from(f.as_path())?
            }
        };
        if let Some(dir) = &self.output_directory {
            config.output_directory = dir.clone();
        }
        if let Some(modes) = &self.modes {
            config.modes = modes.clone();
        }
        if let Some(locator) = self.locator {
            config.locator = locator;
        }
        if self.sequential {
            config.parallelize = false;
        }
        if self.write_coords {
            config.write_coords = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.build_config()?;

    let ingest = read_pbf(&cli.pbf).with_context(|| format!("reading {}", cli.pbf.display()))?;
    let (graph, summary) = config.pipeline().run(&ingest)?;

    let dir = &config.output_directory;
    let mut writer = if config.write_coords {
        CsvGraphWriter::with_coords(dir)
    } else {
        CsvGraphWriter::new(dir)
    }
    .with_context(|| format!("opening output files in {}", dir.display()))?;
    if config.write_coords {
        write_coords(&mut writer, &ingest.coords)?;
    }
    write_graph(&mut writer, &graph)?;

    summary.log();
    log::info!("finished, output in {}", dir.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("mmg failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
