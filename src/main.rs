//! Hollowcave - Entry Point
//!
//! Generates one cave from a preset and command-line overrides, prints it and
//! optionally exports a PNG preview, the JSON result or the effective preset.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hollowcave::render::{self, RenderMode};
use hollowcave::GeneratorConfig;

#[derive(Parser, Debug)]
#[command(name = "hollowcave")]
#[command(about = "Generate seeded cellular-automaton caves")]
#[command(version)]
struct Args {
    /// RON preset to start from (defaults are used otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(short = 'W', long)]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// Seed for the run
    #[arg(short, long)]
    seed: Option<i64>,

    /// Ignore the seed and draw one from the clock
    #[arg(long)]
    random_seed: bool,

    /// Initial wall percentage (0-100)
    #[arg(short, long)]
    fill: Option<u8>,

    /// Wall neighbours needed to turn a floor cell into wall (0-8)
    #[arg(long)]
    birth_limit: Option<u8>,

    /// Wall neighbours below which a wall cell opens up (0-8)
    #[arg(long)]
    death_limit: Option<u8>,

    /// Interior wall regions of at most this many tiles are opened
    #[arg(long)]
    wall_threshold: Option<usize>,

    /// Floor regions of at most this many tiles are closed
    #[arg(long)]
    floor_threshold: Option<usize>,

    /// Fixed number of smoothing passes instead of running to a fixed point
    #[arg(long)]
    steps: Option<u32>,

    /// Bound on smoothing passes when running to a fixed point
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Keep only the largest room and wall up the rest, no corridors
    #[arg(long)]
    quick: bool,

    /// Output style: ascii, unicode or color (detected if not specified)
    #[arg(short, long)]
    mode: Option<RenderMode>,

    /// Don't print the cave
    #[arg(long)]
    quiet: bool,

    /// Write a PNG preview to this path
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per cell in the PNG preview
    #[arg(long, default_value = "8")]
    cell_size: u32,

    /// Write the full result as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the effective configuration as a RON preset to this path
    #[arg(long)]
    export_config: Option<PathBuf>,
}

impl Args {
    /// Build the configuration: preset first, then flags on top
    fn config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load preset {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
            config.use_random_seed = false;
        }
        if self.random_seed {
            config.use_random_seed = true;
        }
        if let Some(fill) = self.fill {
            config.init_fill_percent = fill;
        }
        if let Some(limit) = self.birth_limit {
            config.birth_limit = limit;
        }
        if let Some(limit) = self.death_limit {
            config.death_limit = limit;
        }
        if let Some(threshold) = self.wall_threshold {
            config.wall_threshold_size = threshold;
        }
        if let Some(threshold) = self.floor_threshold {
            config.floor_threshold_size = threshold;
        }
        if let Some(steps) = self.steps {
            config.smoothing_steps = Some(steps);
        }
        if let Some(limit) = self.max_iterations {
            config.max_smoothing_iterations = limit;
        }
        if self.quick {
            config.quick_mode = true;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    // Stdout carries the cave, so logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting Hollowcave v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = args.config()?;

    if let Some(path) = &args.export_config {
        config
            .export(path)
            .with_context(|| format!("Failed to export preset to {}", path.display()))?;
        log::info!("Preset written to {}", path.display());
    }

    let result = hollowcave::generate(&config).context("Cave generation failed")?;

    if !args.quiet {
        let mode = args.mode.unwrap_or_else(render::detect_render_mode);
        let mut stdout = io::stdout().lock();
        render::write_terminal(&mut stdout, &result, mode).context("Failed to print cave")?;
    }

    if let Some(path) = &args.png {
        render::save_png(&result, args.cell_size, path)
            .with_context(|| format!("Failed to write PNG to {}", path.display()))?;
        log::info!("Preview written to {}", path.display());
    }

    if let Some(path) = &args.json {
        let json = result.to_json().context("Failed to serialise result")?;
        fs::write(path, json).with_context(|| format!("Failed to write JSON to {}", path.display()))?;
        log::info!("Result written to {}", path.display());
    }

    log::info!("Seed {}: {} rooms", result.seed, result.rooms.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_quick_help_describes_largest_room() {
        let cmd = Args::command();
        let quick = cmd
            .get_arguments()
            .find(|a| a.get_id() == "quick")
            .unwrap();
        let help = quick.get_help().unwrap().to_string();
        assert!(help.contains("largest room"), "{}", help);
    }

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let args = Args::try_parse_from([
            "hollowcave", "-W", "30", "-H", "20", "--seed", "9", "--steps", "3", "--quick",
        ])
        .unwrap();
        let config = args.config().unwrap();
        assert_eq!((config.width, config.height), (30, 20));
        assert_eq!(config.seed, 9);
        assert!(!config.use_random_seed);
        assert_eq!(config.smoothing_steps, Some(3));
        assert!(config.quick_mode);
        assert_eq!(config.birth_limit, GeneratorConfig::default().birth_limit);
    }

    #[test]
    fn test_mode_flag_parses() {
        let args = Args::try_parse_from(["hollowcave", "--mode", "unicode"]).unwrap();
        assert_eq!(args.mode, Some(RenderMode::Unicode));
        assert!(Args::try_parse_from(["hollowcave", "--mode", "sixel"]).is_err());
    }
}
