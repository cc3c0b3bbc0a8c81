//! Grid state - cell matrix, immortality status and reset snapshots.

use rand::Rng;

use crate::schema::{ConfigError, LifeConfig};

use super::refresh_status;

/// Grid construction errors.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Initial matrix must be non-empty and rectangular: {0}")]
    InvalidShape(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Cell matrix of a single game.
///
/// Cells are stored row-major as flat arrays indexed `i * width + j`, with
/// `1` for alive and `0` for dead. `status` has the same layout and marks
/// immortal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    state: Vec<u8>,
    initial_state: Vec<u8>,
    status: Vec<u8>,
    initial_status: Vec<u8>,
    height: usize,
    width: usize,
    generation: u64,
}

impl GridState {
    /// Build a grid from rows of cells and compute its initial immortal set.
    ///
    /// Any non-zero value is treated as alive. Fails on an empty matrix, empty
    /// rows, ragged rows, or an invalid configuration.
    pub fn new<R: Rng + ?Sized>(
        cells: Vec<Vec<u8>>,
        config: &LifeConfig,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        config.validate()?;

        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::InvalidShape(format!(
                "got {}x{} matrix",
                height, width
            )));
        }
        if let Some((i, row)) = cells.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::InvalidShape(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                width
            )));
        }

        let state: Vec<u8> = cells
            .into_iter()
            .flat_map(|row| row.into_iter().map(|v| u8::from(v != 0)))
            .collect();

        let mut grid = Self {
            initial_state: state.clone(),
            state,
            status: vec![0; height * width],
            initial_status: Vec::new(),
            height,
            width,
            generation: 0,
        };

        refresh_status(&mut grid, config.elite_fraction, rng);
        grid.initial_status = grid.status.clone();

        log::debug!(
            "Created {}x{} grid: {} alive, {} immortal",
            height,
            width,
            grid.count_alive(),
            grid.count_immortal()
        );

        Ok(grid)
    }

    /// Grid height (rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid width (columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// (height, width).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Generations advanced since construction or the last reset.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.width + j
    }

    #[inline]
    fn in_bounds(&self, i: usize, j: usize) -> bool {
        i < self.height && j < self.width
    }

    /// Cell value at (i, j), or None outside the grid.
    pub fn get(&self, i: usize, j: usize) -> Option<u8> {
        self.in_bounds(i, j).then(|| self.state[self.idx(i, j)])
    }

    /// Whether (i, j) is alive. False outside the grid.
    #[inline]
    pub fn is_alive(&self, i: usize, j: usize) -> bool {
        self.get(i, j) == Some(1)
    }

    /// Whether (i, j) is currently immortal. False outside the grid.
    #[inline]
    pub fn is_immortal(&self, i: usize, j: usize) -> bool {
        self.in_bounds(i, j) && self.status[self.idx(i, j)] == 1
    }

    /// Flat row-major cell values.
    pub fn state(&self) -> &[u8] {
        &self.state
    }

    /// Flat row-major immortality flags.
    pub fn status(&self) -> &[u8] {
        &self.status
    }

    /// Iterate over rows of cell values.
    pub fn rows(&self) -> std::slice::Chunks<'_, u8> {
        self.state.chunks(self.width)
    }

    /// Copy of the cell values as rows.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }

    /// Set a cell alive (non-zero) or dead (zero).
    ///
    /// Before the first advance the edit also becomes part of the reset
    /// baseline. Out-of-range indices are ignored.
    pub fn set_cell(&mut self, i: usize, j: usize, value: u8) {
        if !self.in_bounds(i, j) {
            return;
        }
        let idx = self.idx(i, j);
        let value = u8::from(value != 0);
        self.state[idx] = value;
        if self.generation == 0 {
            self.initial_state[idx] = value;
        }
    }

    /// Restore the construction-time cells and immortal set.
    pub fn reset(&mut self) {
        self.state.copy_from_slice(&self.initial_state);
        self.status.copy_from_slice(&self.initial_status);
        self.generation = 0;
    }

    /// Number of alive cells.
    pub fn count_alive(&self) -> usize {
        self.state.iter().map(|&v| v as usize).sum()
    }

    /// Number of immortal cells.
    pub fn count_immortal(&self) -> usize {
        self.status.iter().map(|&v| v as usize).sum()
    }

    pub(crate) fn status_mut(&mut self) -> &mut [u8] {
        &mut self.status
    }

    /// Cells and writable immortality flags, borrowed together.
    pub(crate) fn state_and_status_mut(&mut self) -> (&[u8], &mut [u8]) {
        (&self.state, &mut self.status)
    }

    /// Increment the generation counter, returning the new value.
    pub(crate) fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Swap in a freshly computed state. `next` must have the grid's length.
    pub(crate) fn replace_state(&mut self, next: Vec<u8>) {
        debug_assert_eq!(next.len(), self.state.len());
        self.state = next;
    }
}
