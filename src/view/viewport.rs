//! Pixel layout of the grid on a drawing surface.

use serde::{Deserialize, Serialize};

/// RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors used by the interactive driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgb,
    pub alive: Rgb,
    pub elite: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(40, 42, 54),
            alive: Rgb(189, 147, 249),
            elite: Rgb(80, 250, 123),
        }
    }
}

/// How a single cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// Solid square.
    Filled(Rgb),
    /// One-pixel square outline.
    Outline(Rgb),
}

impl CellStyle {
    /// Immortal cells are always filled in the elite color, even when dead.
    pub fn for_cell(alive: bool, immortal: bool, palette: &Palette) -> Self {
        if immortal {
            CellStyle::Filled(palette.elite)
        } else if alive {
            CellStyle::Filled(palette.alive)
        } else {
            CellStyle::Outline(palette.alive)
        }
    }
}

/// Pixel rectangle of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// Cell size and spacing on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Side of a cell in pixels.
    pub scale: u32,
    /// Gap between cells in pixels.
    pub offset: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 20,
            offset: 2,
        }
    }
}

impl Viewport {
    #[inline]
    fn pitch(&self) -> u32 {
        (self.scale + self.offset).max(1)
    }

    /// (height, width) of the grid that fits a `surface_width x surface_height` surface.
    pub fn grid_shape(&self, surface_width: u32, surface_height: u32) -> (usize, usize) {
        (
            (surface_height / self.pitch()) as usize,
            (surface_width / self.pitch()) as usize,
        )
    }

    /// Grid index under a pointer position, or None left of / above the surface.
    ///
    /// The result is not checked against the grid size.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        Some(((y / self.pitch()) as usize, (x / self.pitch()) as usize))
    }

    /// Pixel rectangle of cell (i, j).
    pub fn cell_rect(&self, i: usize, j: usize) -> CellRect {
        let pitch = self.pitch();
        CellRect {
            x: j as u32 * pitch + self.offset,
            y: i as u32 * pitch + self.offset,
            size: self.scale,
        }
    }
}
