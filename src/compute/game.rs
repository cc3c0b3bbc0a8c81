//! Game - a grid, its engine and its random source, owned by one driver.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::schema::{GameConfig, LifeConfig};

use super::{GridError, GridState, LifeEngine};

/// Single-owner simulation bundle used by the interactive and batch drivers.
#[derive(Debug, Clone)]
pub struct Game {
    grid: GridState,
    engine: LifeEngine,
    rng: StdRng,
}

impl Game {
    /// Create a game from an initial matrix.
    ///
    /// `rng` draws the initial immortal set and every later refresh.
    pub fn new(
        cells: Vec<Vec<u8>>,
        config: LifeConfig,
        mut rng: StdRng,
    ) -> Result<Self, GridError> {
        let grid = GridState::new(cells, &config, &mut rng)?;
        let engine = LifeEngine::new(config)?;
        Ok(Self { grid, engine, rng })
    }

    /// Create a game from a driver configuration and its seed pattern.
    pub fn from_config(config: &GameConfig) -> Result<Self, GridError> {
        config.validate()?;
        let mut rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let cells = config.seed.generate(config.height, config.width, &mut rng);
        Self::new(cells, config.life.clone(), rng)
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    pub fn config(&self) -> &LifeConfig {
        self.engine.config()
    }

    /// Advance one generation.
    pub fn advance(&mut self) {
        self.engine.advance(&mut self.grid, &mut self.rng);
    }

    /// Advance `generations` times.
    pub fn run(&mut self, generations: u64) {
        self.engine.run(&mut self.grid, &mut self.rng, generations);
    }

    /// Whether the next generation would change any cell.
    pub fn is_moving(&self) -> bool {
        self.engine.is_moving(&self.grid)
    }

    /// Redraw the immortal set now.
    pub fn refresh_status(&mut self) {
        self.engine.refresh_status(&mut self.grid, &mut self.rng);
    }

    /// Next generation as rows, without advancing.
    pub fn next_state(&self) -> Vec<Vec<u8>> {
        let width = self.grid.width();
        self.engine
            .next_state(&self.grid)
            .chunks(width)
            .map(<[u8]>::to_vec)
            .collect()
    }

    /// Set a single cell. Out-of-range indices are ignored.
    pub fn set_cell(&mut self, i: usize, j: usize, value: u8) {
        self.grid.set_cell(i, j, value);
    }

    /// Apply a pointer brush at (i, j).
    pub fn paint(&mut self, i: usize, j: usize, brush: Brush) {
        self.grid.set_cell(i, j, brush.value());
    }

    /// Return to the construction-time cells and immortal set.
    pub fn reset(&mut self) {
        log::debug!("Reset at generation {}", self.grid.generation());
        self.grid.reset();
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    pub fn count_alive(&self) -> usize {
        self.grid.count_alive()
    }

    pub fn count_immortal(&self) -> usize {
        self.grid.count_immortal()
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            generation: self.generation(),
            alive: self.count_alive(),
            immortal: self.count_immortal(),
        }
    }
}

/// Pointer editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brush {
    /// Left button: bring cells alive.
    Draw,
    /// Right button: kill cells.
    Erase,
}

impl Brush {
    /// Cell value written by this brush.
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Brush::Draw => 1,
            Brush::Erase => 0,
        }
    }
}

/// Population counts for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub generation: u64,
    pub alive: usize,
    pub immortal: usize,
}
