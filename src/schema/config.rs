//! Configuration types for Game of Life rule and driver parameters.

use serde::{Deserialize, Serialize};

use super::Seed;

fn default_order() -> usize {
    1
}

fn default_interval() -> u64 {
    5
}

fn default_fps() -> u32 {
    20
}

/// Largest accepted neighborhood radius.
///
/// Keeps `neighborhood_size()` and the signed offset scan within range on
/// every target.
pub const MAX_NEIGHBORHOOD_ORDER: usize = 4096;

/// Shape of the neighborhood scanned around each cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeighborhoodType {
    /// Full square of radius `r`.
    #[default]
    #[serde(rename = "moore")]
    Moore,
    /// Diamond of radius `r`.
    #[serde(rename = "vonNeumann", alias = "vonneumann")]
    VonNeumann,
}

/// Rule parameters shared by every driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeConfig {
    /// Neighborhood radius (r >= 1).
    #[serde(default = "default_order")]
    pub neighborhood_order: usize,
    /// Neighborhood shape.
    #[serde(default)]
    pub neighborhood_type: NeighborhoodType,
    /// Probability in [0, 1] that an alive cell is promoted to immortal on each refresh.
    #[serde(default)]
    pub elite_fraction: f64,
    /// Generations between immortal-set refreshes.
    #[serde(default = "default_interval")]
    pub elite_interval: u64,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            neighborhood_order: default_order(),
            neighborhood_type: NeighborhoodType::Moore,
            elite_fraction: 0.0,
            elite_interval: default_interval(),
        }
    }
}

impl LifeConfig {
    /// Number of cells in the neighborhood, excluding the center.
    ///
    /// Moore: `(2r+1)^2 - 1`. Von Neumann: `r^2 + (r+1)^2 - 1`.
    /// Saturates at `usize::MAX` for orders that fail [`LifeConfig::validate`].
    pub fn neighborhood_size(&self) -> usize {
        let r = self.neighborhood_order;
        let cells = match self.neighborhood_type {
            NeighborhoodType::Moore => r
                .checked_mul(2)
                .and_then(|d| d.checked_add(1))
                .and_then(|d| d.checked_pow(2)),
            NeighborhoodType::VonNeumann => r.checked_mul(r).and_then(|sq| {
                r.checked_add(1)
                    .and_then(|s| s.checked_mul(s))
                    .and_then(|next| next.checked_add(sq))
            }),
        };
        cells.map_or(usize::MAX, |c| c - 1)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written so that NaN is rejected too.
        if !(0.0..=1.0).contains(&self.elite_fraction) {
            return Err(ConfigError::InvalidEliteFraction(self.elite_fraction));
        }
        if self.neighborhood_order == 0 {
            return Err(ConfigError::InvalidNeighborhoodOrder);
        }
        if self.neighborhood_order > MAX_NEIGHBORHOOD_ORDER {
            return Err(ConfigError::NeighborhoodOrderTooLarge(self.neighborhood_order));
        }
        if self.elite_interval == 0 {
            return Err(ConfigError::InvalidEliteInterval);
        }
        Ok(())
    }
}

/// Configuration for a single interactive or terminal game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid height in cells.
    pub height: usize,
    /// Grid width in cells.
    pub width: usize,
    /// Rule parameters.
    #[serde(default)]
    pub life: LifeConfig,
    /// Initial pattern.
    #[serde(default)]
    pub seed: Seed,
    /// Seed for the elite selection generator (None = entropy).
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Frames per second for timed drivers.
    #[serde(default = "default_fps")]
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: 15,
            width: 15,
            life: LifeConfig::default(),
            seed: Seed::default(),
            random_seed: None,
            fps: default_fps(),
        }
    }
}

impl GameConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        self.seed.validate()?;
        self.life.validate()
    }
}

/// Configuration for a batch of independent games (population plots).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Grid height of every game.
    pub height: usize,
    /// Grid width of every game.
    pub width: usize,
    /// Number of games in the batch.
    #[serde(default = "default_games")]
    pub games: usize,
    /// Generations recorded per game.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Rule parameters shared by all games.
    #[serde(default)]
    pub life: LifeConfig,
    /// Probability that a cell starts alive.
    #[serde(default = "default_density")]
    pub density: f64,
    /// Master seed; each game derives its own generator from it.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_games() -> usize {
    10
}

fn default_generations() -> usize {
    20
}

fn default_density() -> f64 {
    0.5
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            height: 50,
            width: 50,
            games: default_games(),
            generations: default_generations(),
            life: LifeConfig::default(),
            density: default_density(),
            random_seed: None,
        }
    }
}

impl BatchConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.games == 0 {
            return Err(ConfigError::InvalidGameCount);
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::InvalidDensity(self.density));
        }
        self.life.validate()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Elite fraction must be within [0, 1], got {0}")]
    InvalidEliteFraction(f64),
    #[error("Neighborhood order must be at least 1")]
    InvalidNeighborhoodOrder,
    #[error("Neighborhood order must be at most {max}, got {0}", max = MAX_NEIGHBORHOOD_ORDER)]
    NeighborhoodOrderTooLarge(usize),
    #[error("Elite interval must be at least 1")]
    InvalidEliteInterval,
    #[error("Grid dimensions (height, width) must be non-zero")]
    InvalidDimensions,
    #[error("Density must be within [0, 1], got {0}")]
    InvalidDensity(f64),
    #[error("Batch must contain at least one game")]
    InvalidGameCount,
}
