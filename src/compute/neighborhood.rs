//! Neighborhood geometry and survival/birth thresholds.

use crate::schema::{LifeConfig, NeighborhoodType};

use super::GridState;

/// Survival and birth tolerances derived from the neighborhood size.
///
/// Alive cells survive when `lower <= count < upper`; dead cells are born
/// when `lower < count < upper`. The asymmetry is part of the rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Inclusive survival bound, exclusive birth bound.
    pub lower: f64,
    /// Exclusive upper bound for both survival and birth.
    pub upper: f64,
}

impl Thresholds {
    /// Tolerances for a configuration.
    ///
    /// Von Neumann order 1 uses the fixed pair (2, 3); every other
    /// neighborhood uses (size / 4, size / 2).
    pub fn for_config(config: &LifeConfig) -> Self {
        if config.neighborhood_type == NeighborhoodType::VonNeumann
            && config.neighborhood_order == 1
        {
            return Self {
                lower: 2.0,
                upper: 3.0,
            };
        }
        let size = config.neighborhood_size() as f64;
        Self {
            lower: size / 4.0,
            upper: size / 2.0,
        }
    }

    /// Whether an alive cell with `count` alive neighbors stays alive.
    #[inline]
    pub fn survives(&self, count: usize) -> bool {
        let count = count as f64;
        self.lower <= count && count < self.upper
    }

    /// Whether a dead cell with `count` alive neighbors comes alive.
    #[inline]
    pub fn born(&self, count: usize) -> bool {
        let count = count as f64;
        self.lower < count && count < self.upper
    }
}

/// Precomputed neighborhood of a configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood {
    kind: NeighborhoodType,
    order: usize,
    size: usize,
    thresholds: Thresholds,
}

impl Neighborhood {
    /// Resolve shape, radius, size and tolerances of a validated configuration.
    pub fn from_config(config: &LifeConfig) -> Self {
        Self {
            kind: config.neighborhood_type,
            order: config.neighborhood_order,
            size: config.neighborhood_size(),
            thresholds: Thresholds::for_config(config),
        }
    }

    /// Neighbor count excluding the center.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Survival and birth tolerances for this neighborhood.
    #[inline]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Count alive cells around (i0, j0), excluding the center.
    ///
    /// Column offsets run over `[-r, r]`; row offsets over `[-r, r]` for Moore
    /// and `[-(r - |dj|), r - |dj|]` for von Neumann. Offsets outside the grid
    /// are skipped (no wraparound). The center is scanned along with its
    /// neighbors and subtracted afterwards when alive.
    pub fn count_alive_neighbors(&self, grid: &GridState, i0: usize, j0: usize) -> usize {
        let r = self.order as isize;
        let height = grid.height() as isize;
        let width = grid.width() as isize;
        let state = grid.state();

        let mut count = 0usize;
        for dj in -r..=r {
            let j = j0 as isize + dj;
            if j < 0 || j >= width {
                continue;
            }
            let ri = match self.kind {
                NeighborhoodType::VonNeumann => r - dj.abs(),
                NeighborhoodType::Moore => r,
            };
            for di in -ri..=ri {
                let i = i0 as isize + di;
                if i < 0 || i >= height {
                    continue;
                }
                count += state[(i * width + j) as usize] as usize;
            }
        }

        if grid.is_alive(i0, j0) {
            count -= 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(kind: NeighborhoodType, order: usize) -> LifeConfig {
        LifeConfig {
            neighborhood_type: kind,
            neighborhood_order: order,
            ..Default::default()
        }
    }

    fn full_grid(height: usize, width: usize) -> GridState {
        GridState::new(
            vec![vec![1; width]; height],
            &LifeConfig::default(),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap()
    }

    #[test]
    fn test_thresholds() {
        let t = Thresholds::for_config(&config(NeighborhoodType::Moore, 1));
        assert_eq!(t, Thresholds { lower: 2.0, upper: 4.0 });

        let t = Thresholds::for_config(&config(NeighborhoodType::VonNeumann, 1));
        assert_eq!(t, Thresholds { lower: 2.0, upper: 3.0 });

        let t = Thresholds::for_config(&config(NeighborhoodType::VonNeumann, 2));
        assert_eq!(t, Thresholds { lower: 3.0, upper: 6.0 });

        let t = Thresholds::for_config(&config(NeighborhoodType::Moore, 2));
        assert_eq!(t, Thresholds { lower: 6.0, upper: 12.0 });
    }

    #[test]
    fn test_survival_birth_asymmetry() {
        let t = Thresholds { lower: 2.0, upper: 4.0 };
        assert!(t.survives(2));
        assert!(!t.born(2));
        assert!(t.survives(3));
        assert!(t.born(3));
        assert!(!t.survives(4));
        assert!(!t.born(4));
        assert!(!t.survives(1));
    }

    #[test]
    fn test_fractional_thresholds() {
        let t = Thresholds::for_config(&config(NeighborhoodType::VonNeumann, 3));
        assert_eq!(t, Thresholds { lower: 6.0, upper: 12.0 });

        let t = Thresholds { lower: 1.5, upper: 3.0 };
        assert!(t.survives(2));
        assert!(!t.survives(1));
        assert!(t.born(2));
    }

    #[test]
    fn test_resolved_neighborhood() {
        let config = config(NeighborhoodType::VonNeumann, 2);
        let n = Neighborhood::from_config(&config);
        assert_eq!(n.size(), 12);
        assert_eq!(n.thresholds(), Thresholds::for_config(&config));
    }

    #[test]
    fn test_moore_interior_and_corner() {
        let g = full_grid(5, 5);
        let n = Neighborhood::from_config(&config(NeighborhoodType::Moore, 1));
        assert_eq!(n.count_alive_neighbors(&g, 2, 2), 8);
        assert_eq!(n.count_alive_neighbors(&g, 0, 0), 3);
        assert_eq!(n.count_alive_neighbors(&g, 0, 2), 5);
        assert_eq!(n.count_alive_neighbors(&g, 4, 4), 3);

        let n = Neighborhood::from_config(&config(NeighborhoodType::Moore, 2));
        assert_eq!(n.count_alive_neighbors(&g, 2, 2), 24);
        assert_eq!(n.count_alive_neighbors(&g, 0, 0), 8);
    }

    #[test]
    fn test_von_neumann_diamond() {
        let g = full_grid(7, 7);
        let n = Neighborhood::from_config(&config(NeighborhoodType::VonNeumann, 1));
        assert_eq!(n.count_alive_neighbors(&g, 3, 3), 4);
        assert_eq!(n.count_alive_neighbors(&g, 0, 0), 2);

        let n = Neighborhood::from_config(&config(NeighborhoodType::VonNeumann, 2));
        assert_eq!(n.count_alive_neighbors(&g, 3, 3), 12);
        assert_eq!(n.size(), 12);

        let n = Neighborhood::from_config(&config(NeighborhoodType::VonNeumann, 3));
        assert_eq!(n.count_alive_neighbors(&g, 3, 3), 24);
        assert_eq!(n.count_alive_neighbors(&g, 0, 0), 9);
    }

    #[test]
    fn test_dead_center_not_subtracted() {
        let mut cells = vec![vec![1u8; 3]; 3];
        cells[1][1] = 0;
        let g = GridState::new(cells, &LifeConfig::default(), &mut StdRng::seed_from_u64(0))
            .unwrap();
        let n = Neighborhood::from_config(&config(NeighborhoodType::Moore, 1));
        assert_eq!(n.count_alive_neighbors(&g, 1, 1), 8);
    }

    #[test]
    fn test_order_larger_than_grid() {
        let g = full_grid(2, 3);
        let n = Neighborhood::from_config(&config(NeighborhoodType::Moore, 5));
        assert_eq!(n.count_alive_neighbors(&g, 0, 0), 5);
        assert_eq!(n.count_alive_neighbors(&g, 1, 2), 5);
    }
}
