//! Life engine - rule evaluation and generation advance.

use rand::Rng;

use crate::schema::{ConfigError, LifeConfig};

use super::{GridState, Neighborhood, refresh_status};

/// Rule evaluator for a fixed configuration.
///
/// The engine holds no grid state; one engine can drive any number of grids
/// built with the same configuration.
#[derive(Debug, Clone)]
pub struct LifeEngine {
    config: LifeConfig,
    neighborhood: Neighborhood,
}

impl LifeEngine {
    /// Create new engine from configuration.
    pub fn new(config: LifeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let neighborhood = Neighborhood::from_config(&config);
        Ok(Self {
            config,
            neighborhood,
        })
    }

    /// Get configuration reference.
    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn neighborhood(&self) -> &Neighborhood {
        &self.neighborhood
    }

    /// Alive cells around (i, j), excluding (i, j) itself.
    #[inline]
    pub fn count_alive_neighbors(&self, grid: &GridState, i: usize, j: usize) -> usize {
        self.neighborhood.count_alive_neighbors(grid, i, j)
    }

    /// Redraw the immortal set of `grid` with this engine's elite fraction.
    pub fn refresh_status<R: Rng + ?Sized>(&self, grid: &mut GridState, rng: &mut R) {
        refresh_status(grid, self.config.elite_fraction, rng);
    }

    /// Compute the next generation without touching `grid`.
    ///
    /// Returns the flat row-major cell values. Immortal cells are alive in the
    /// result whatever their neighbor count.
    pub fn next_state(&self, grid: &GridState) -> Vec<u8> {
        let (height, width) = grid.shape();
        let thresholds = self.neighborhood.thresholds();
        let state = grid.state();
        let status = grid.status();

        let mut next = vec![0u8; height * width];
        for i in 0..height {
            for j in 0..width {
                let idx = i * width + j;
                let count = self.count_alive_neighbors(grid, i, j);
                let by_rule = if state[idx] == 1 {
                    thresholds.survives(count)
                } else {
                    thresholds.born(count)
                };
                next[idx] = u8::from(by_rule || status[idx] == 1);
            }
        }
        next
    }

    /// Advance `grid` by one generation.
    ///
    /// The generation counter is bumped first; when it lands on a multiple of
    /// the elite interval the immortal set is redrawn from the current cells
    /// before the rule is applied.
    pub fn advance<R: Rng + ?Sized>(&self, grid: &mut GridState, rng: &mut R) {
        let generation = grid.bump_generation();
        if generation % self.config.elite_interval == 0 {
            self.refresh_status(grid, rng);
        }
        let next = self.next_state(grid);
        grid.replace_state(next);

        log::trace!(
            "Generation {}: {} alive, {} immortal",
            generation,
            grid.count_alive(),
            grid.count_immortal()
        );
    }

    /// Run simulation for specified number of generations.
    pub fn run<R: Rng + ?Sized>(&self, grid: &mut GridState, rng: &mut R, generations: u64) {
        for _ in 0..generations {
            self.advance(grid, rng);
        }
    }

    /// Whether the next generation differs from the current one anywhere.
    ///
    /// Recomputes a full next state on every call.
    pub fn is_moving(&self, grid: &GridState) -> bool {
        self.next_state(grid).as_slice() != grid.state()
    }
}
