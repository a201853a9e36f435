//! Generator configuration
//!
//! Parameters for a generation run, with RON preset loading and export.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GenerationError};

/// Default bound on smoothing passes when running to a fixed point
pub const DEFAULT_MAX_SMOOTHING_ITERATIONS: u32 = 1000;

/// Largest cell count a grid may hold; cell indices are computed in `i32`
pub const MAX_GRID_CELLS: i64 = i32::MAX as i64;

/// Tint colour with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to 8-bit channels
    pub fn to_u8(&self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Probability buckets for cosmetic floor variety
///
/// One draw in `0..=100` per floor cell: above `rare_above` is rare, above
/// `uncommon_above` picks one of `uncommon_variants` uncommon tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    pub rare_above: u8,
    pub uncommon_above: u8,
    pub uncommon_variants: u8,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            rare_above: 99,
            uncommon_above: 90,
            uncommon_variants: 7,
        }
    }
}

impl DecorationConfig {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.rare_above > 100 {
            return Err(GenerationError::InvalidDecoration(format!(
                "rare_above {} exceeds 100",
                self.rare_above
            )));
        }
        if self.uncommon_above > self.rare_above {
            return Err(GenerationError::InvalidDecoration(format!(
                "uncommon_above {} exceeds rare_above {}",
                self.uncommon_above, self.rare_above
            )));
        }
        if self.uncommon_variants == 0 {
            return Err(GenerationError::InvalidDecoration(
                "uncommon_variants must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Full parameter set for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: i32,
    pub height: i32,
    /// Floor cells with more wall neighbours than this become wall
    pub birth_limit: u8,
    /// Wall cells with fewer wall neighbours than this become floor
    pub death_limit: u8,
    pub wall_threshold_size: usize,
    pub floor_threshold_size: usize,
    /// Chance (percent) that a cell starts as wall
    pub init_fill_percent: u8,
    pub seed: i64,
    /// Replace `seed` with a clock-derived value
    pub use_random_seed: bool,
    /// Keep only the largest room instead of carving corridors
    pub quick_mode: bool,
    /// Fixed number of smoothing passes; `None` runs to a fixed point
    pub smoothing_steps: Option<u32>,
    pub max_smoothing_iterations: u32,
    pub color: Rgb,
    pub random_color: bool,
    pub decoration: DecorationConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 50,
            birth_limit: 4,
            death_limit: 3,
            wall_threshold_size: 10,
            floor_threshold_size: 15,
            init_fill_percent: 45,
            seed: 0,
            use_random_seed: false,
            quick_mode: false,
            smoothing_steps: None,
            max_smoothing_iterations: DEFAULT_MAX_SMOOTHING_ITERATIONS,
            color: Rgb::default(),
            random_color: false,
            decoration: DecorationConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Check every parameter range before any randomness is consumed
    pub fn validate(&self) -> Result<(), GenerationError> {
        let cells = self.width as i64 * self.height as i64;
        if self.width <= 0 || self.height <= 0 || cells > MAX_GRID_CELLS {
            return Err(GenerationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.wall_threshold_size < 1 {
            return Err(GenerationError::InvalidThreshold {
                name: "wall",
                value: self.wall_threshold_size,
            });
        }
        if self.floor_threshold_size < 1 {
            return Err(GenerationError::InvalidThreshold {
                name: "floor",
                value: self.floor_threshold_size,
            });
        }
        if self.birth_limit > 8 {
            return Err(GenerationError::InvalidNeighborLimit {
                name: "birth",
                value: self.birth_limit,
            });
        }
        if self.death_limit > 8 {
            return Err(GenerationError::InvalidNeighborLimit {
                name: "death",
                value: self.death_limit,
            });
        }
        if self.init_fill_percent > 100 {
            return Err(GenerationError::InvalidFillPercent(self.init_fill_percent));
        }
        for (name, value) in [("r", self.color.r), ("g", self.color.g), ("b", self.color.b)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GenerationError::InvalidColor {
                    name,
                    value: value.to_string(),
                });
            }
        }
        self.decoration.validate()
    }

    /// Seed actually used for the run
    pub fn effective_seed(&self) -> u64 {
        if self.use_random_seed {
            clock_seed()
        } else {
            self.seed as u64
        }
    }

    /// Load a preset from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&content).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parse a preset from RON text
    pub fn from_ron(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|e| e.to_string())
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Write this config to a RON file, creating parent directories
    pub fn export(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        fs::write(path, self.to_ron()?).map_err(io_err)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
