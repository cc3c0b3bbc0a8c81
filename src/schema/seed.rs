//! Seed types for initializing Game of Life grids.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Complete seed specification for grid initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: Pattern::Glider { row: 0, col: 0 },
        }
    }
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// All cells dead.
    Empty,
    /// South-east travelling glider with its bounding box at (row, col).
    Glider { row: usize, col: usize },
    /// Filled square of side `size` with its top-left corner at (row, col).
    Block { row: usize, col: usize, size: usize },
    /// Each cell alive with probability `density`.
    Random {
        density: f64,
        /// Pattern-local seed (None = draw from the caller's generator).
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Explicit list of alive (row, col) cells.
    Custom { cells: Vec<(usize, usize)> },
}

impl Seed {
    /// Seed from a pattern.
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    /// Check pattern parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Pattern::Random { density, .. } = self.pattern
            && !(0.0..=1.0).contains(&density)
        {
            return Err(ConfigError::InvalidDensity(density));
        }
        Ok(())
    }

    /// Generate an initial `height x width` matrix of 0/1 cells.
    ///
    /// Cells falling outside the grid are dropped.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        height: usize,
        width: usize,
        rng: &mut R,
    ) -> Vec<Vec<u8>> {
        let mut grid = vec![vec![0u8; width]; height];

        match &self.pattern {
            Pattern::Empty => {}
            Pattern::Glider { row, col } => {
                let cells = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
                for (di, dj) in cells {
                    if let (Some(i), Some(j)) = (row.checked_add(di), col.checked_add(dj)) {
                        set_alive(&mut grid, i, j);
                    }
                }
            }
            Pattern::Block { row, col, size } => {
                let rows = *row..row.saturating_add(*size).min(height);
                let cols = *col..col.saturating_add(*size).min(width);
                for i in rows {
                    for j in cols.clone() {
                        set_alive(&mut grid, i, j);
                    }
                }
            }
            Pattern::Random { density, seed } => match seed {
                Some(seed) => fill_random(&mut grid, *density, &mut StdRng::seed_from_u64(*seed)),
                None => fill_random(&mut grid, *density, rng),
            },
            Pattern::Custom { cells } => {
                for &(i, j) in cells {
                    set_alive(&mut grid, i, j);
                }
            }
        }

        grid
    }
}

fn set_alive(grid: &mut [Vec<u8>], i: usize, j: usize) {
    if let Some(cell) = grid.get_mut(i).and_then(|row| row.get_mut(j)) {
        *cell = 1;
    }
}

fn fill_random<R: Rng + ?Sized>(grid: &mut [Vec<u8>], density: f64, rng: &mut R) {
    let density = density.clamp(0.0, 1.0);
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            *cell = u8::from(rng.gen_bool(density));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alive(grid: &[Vec<u8>]) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for (i, row) in grid.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if v == 1 {
                    cells.push((i, j));
                }
            }
        }
        cells
    }

    #[test]
    fn test_glider_cells() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = Seed::default().generate(15, 15, &mut rng);
        assert_eq!(alive(&grid), vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_block_clipped_at_edge() {
        let mut rng = StdRng::seed_from_u64(0);
        let seed = Seed::new(Pattern::Block {
            row: 3,
            col: 3,
            size: 5,
        });
        let grid = seed.generate(5, 4, &mut rng);
        assert_eq!(alive(&grid), vec![(3, 3), (4, 3)]);
    }

    #[test]
    fn test_far_off_grid_patterns_are_dropped() {
        let mut rng = StdRng::seed_from_u64(0);
        let glider = Seed::new(Pattern::Glider {
            row: usize::MAX,
            col: 0,
        });
        assert!(glider.validate().is_ok());
        assert!(alive(&glider.generate(5, 5, &mut rng)).is_empty());

        let glider = Seed::new(Pattern::Glider {
            row: 2,
            col: usize::MAX - 1,
        });
        assert!(alive(&glider.generate(5, 5, &mut rng)).is_empty());

        let block = Seed::new(Pattern::Block {
            row: 3,
            col: 1,
            size: usize::MAX,
        });
        assert_eq!(
            alive(&block.generate(4, 3, &mut rng)),
            vec![(3, 1), (3, 2)]
        );

        let block = Seed::new(Pattern::Block {
            row: usize::MAX,
            col: usize::MAX,
            size: 3,
        });
        assert!(alive(&block.generate(4, 3, &mut rng)).is_empty());
    }

    #[test]
    fn test_random_seed_is_reproducible() {
        let seed = Seed::new(Pattern::Random {
            density: 0.5,
            seed: Some(7),
        });
        let a = seed.generate(20, 20, &mut StdRng::seed_from_u64(1));
        let b = seed.generate(20, 20, &mut StdRng::seed_from_u64(2));
        assert_eq!(a, b);
        let count = alive(&a).len();
        assert!(count > 100 && count < 300, "unexpected density: {}", count);
    }

    #[test]
    fn test_random_density_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        let full = Seed::new(Pattern::Random {
            density: 1.0,
            seed: None,
        })
        .generate(4, 6, &mut rng);
        assert_eq!(alive(&full).len(), 24);

        let invalid = Seed::new(Pattern::Random {
            density: 2.0,
            seed: None,
        });
        assert_eq!(invalid.validate(), Err(ConfigError::InvalidDensity(2.0)));
    }

    #[test]
    fn test_pattern_json_tag() {
        let seed: Seed =
            serde_json::from_str(r#"{"pattern": {"type": "Custom", "cells": [[1, 1], [9, 9]]}}"#)
                .unwrap();
        let grid = seed.generate(3, 3, &mut StdRng::seed_from_u64(0));
        assert_eq!(alive(&grid), vec![(1, 1)]);
    }
}
