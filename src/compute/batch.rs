//! Batch runner - many independent games for population plots.

use std::fs;
use std::io;
use std::path::Path;

use rand::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{BatchConfig, ConfigError, Pattern, Seed};

use super::{Game, GridError};

/// Batch driver errors.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Invalid batch configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to build game: {0}")]
    Grid(#[from] GridError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Series do not match: {0}")]
    InconsistentSeries(String),
}

/// Population series of a batch, indexed `[game][generation]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Generations recorded per game.
    pub generations: usize,
    /// Alive cells before each advance.
    pub alive: Vec<Vec<usize>>,
    /// Immortal cells before each advance.
    pub immortal: Vec<Vec<usize>>,
}

/// Aggregate of one generation across all games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// 1-based generation number.
    pub generation: usize,
    pub mean: f64,
    pub min: usize,
    pub max: usize,
}

impl BatchResult {
    /// Number of games in the batch.
    pub fn games(&self) -> usize {
        self.alive.len()
    }

    /// Per-generation mean/min/max of the alive series.
    ///
    /// Stops at the shortest series.
    pub fn summary(&self) -> Vec<GenerationSummary> {
        (0..self.generations)
            .map_while(|g| {
                let column: Vec<usize> =
                    self.alive.iter().map(|s| s.get(g).copied()).collect::<Option<_>>()?;
                let min = *column.iter().min()?;
                let max = *column.iter().max()?;
                let mean = column.iter().sum::<usize>() as f64 / column.len() as f64;
                Some(GenerationSummary {
                    generation: g + 1,
                    mean,
                    min,
                    max,
                })
            })
            .collect()
    }

    /// Write the series as pretty JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), BatchError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read series previously written by [`BatchResult::save_json`].
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, BatchError> {
        let content = fs::read_to_string(path)?;
        let result: Self = serde_json::from_str(&content)?;
        result.validate()?;
        Ok(result)
    }

    /// Check that both series cover the same games and `generations` entries each.
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.alive.len() != self.immortal.len() {
            return Err(BatchError::InconsistentSeries(format!(
                "{} alive series but {} immortal series",
                self.alive.len(),
                self.immortal.len()
            )));
        }
        if let Some(short) = self
            .alive
            .iter()
            .chain(&self.immortal)
            .find(|s| s.len() != self.generations)
        {
            return Err(BatchError::InconsistentSeries(format!(
                "expected {} generations per game, found a series of {}",
                self.generations,
                short.len()
            )));
        }
        Ok(())
    }
}

/// Runs a batch of independent random games.
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    /// Create a runner, validating the configuration.
    pub fn new(config: BatchConfig) -> Result<Self, BatchError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get configuration reference.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Build every game with its own generator derived from the master seed.
    fn build_games(&self) -> Result<Vec<Game>, BatchError> {
        let config = &self.config;
        let mut master = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let seed = Seed::new(Pattern::Random {
            density: config.density,
            seed: None,
        });

        (0..config.games)
            .map(|_| -> Result<Game, BatchError> {
                let mut rng = StdRng::seed_from_u64(master.next_u64());
                let cells = seed.generate(config.height, config.width, &mut rng);
                Ok(Game::new(cells, config.life.clone(), rng)?)
            })
            .collect()
    }

    /// Run every game for the configured number of generations.
    ///
    /// Counts are recorded before each advance, so the first entry of every
    /// series is the initial population.
    pub fn run(&self) -> Result<BatchResult, BatchError> {
        let generations = self.config.generations;
        let mut games = self.build_games()?;
        let mut alive = vec![Vec::with_capacity(generations); games.len()];
        let mut immortal = vec![Vec::with_capacity(generations); games.len()];

        for generation in 0..generations {
            log::info!("Computing generation {} of {}", generation + 1, generations);

            games
                .par_iter_mut()
                .zip(alive.par_iter_mut())
                .zip(immortal.par_iter_mut())
                .for_each(|((game, alive), immortal)| {
                    alive.push(game.count_alive());
                    immortal.push(game.count_immortal());
                    game.advance();
                });
        }

        Ok(BatchResult {
            generations,
            alive,
            immortal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LifeConfig;
    use tempfile::tempdir;

    fn test_config() -> BatchConfig {
        BatchConfig {
            height: 20,
            width: 20,
            games: 4,
            generations: 8,
            random_seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_series_shape() {
        let result = BatchRunner::new(test_config()).unwrap().run().unwrap();
        assert_eq!(result.games(), 4);
        assert_eq!(result.generations, 8);
        assert!(result.alive.iter().all(|s| s.len() == 8));
        assert!(result.immortal.iter().all(|s| s.iter().all(|&c| c == 0)));
        // Half-density random starts are never empty at 20x20.
        assert!(result.alive.iter().all(|s| s[0] > 0));
    }

    #[test]
    fn test_seeded_batch_is_reproducible() {
        let a = BatchRunner::new(test_config()).unwrap().run().unwrap();
        let b = BatchRunner::new(test_config()).unwrap().run().unwrap();
        assert_eq!(a, b);
        assert_ne!(a.alive[0], a.alive[1]);
    }

    #[test]
    fn test_elite_batch_records_immortals() {
        let config = BatchConfig {
            life: LifeConfig {
                elite_fraction: 0.5,
                elite_interval: 2,
                ..Default::default()
            },
            ..test_config()
        };
        let result = BatchRunner::new(config).unwrap().run().unwrap();
        for (alive, immortal) in result.alive.iter().zip(&result.immortal) {
            assert!(immortal[0] > 0);
            assert!(immortal[0] <= alive[0]);
        }
    }

    #[test]
    fn test_invalid_config() {
        let config = BatchConfig {
            density: 1.5,
            ..test_config()
        };
        assert!(matches!(
            BatchRunner::new(config),
            Err(BatchError::Config(ConfigError::InvalidDensity(_)))
        ));
    }

    #[test]
    fn test_summary() {
        let result = BatchResult {
            generations: 2,
            alive: vec![vec![10, 4], vec![20, 6]],
            immortal: vec![vec![0, 0], vec![0, 0]],
        };
        let summary = result.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].generation, 1);
        assert_eq!(summary[0].mean, 15.0);
        assert_eq!(summary[1].min, 4);
        assert_eq!(summary[1].max, 6);
    }

    #[test]
    fn test_summary_stops_at_shortest_series() {
        let result = BatchResult {
            generations: 3,
            alive: vec![vec![1], vec![3, 5, 7]],
            immortal: vec![vec![0], vec![0, 0, 0]],
        };
        let summary = result.summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].mean, 2.0);
    }

    #[test]
    fn test_load_rejects_short_series() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("series.json");
        fs::write(&path, r#"{"generations": 3, "alive": [[1]], "immortal": [[0]]}"#).unwrap();
        assert!(matches!(
            BatchResult::load_json(&path),
            Err(BatchError::InconsistentSeries(_))
        ));

        fs::write(&path, r#"{"generations": 1, "alive": [[1], [2]], "immortal": [[0]]}"#)
            .unwrap();
        assert!(matches!(
            BatchResult::load_json(&path),
            Err(BatchError::InconsistentSeries(_))
        ));
    }

    #[test]
    fn test_json_round_trip_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("series.json");
        let result = BatchRunner::new(test_config()).unwrap().run().unwrap();

        result.save_json(&path).unwrap();
        let loaded = BatchResult::load_json(&path).unwrap();
        assert_eq!(loaded, result);
    }
}
