//! Compute module - Rule evaluation and simulation drivers for Game of Life.

mod batch;
mod elite;
mod engine;
mod game;
mod grid;
mod neighborhood;

pub use batch::*;
pub use elite::*;
pub use engine::*;
pub use game::*;
pub use grid::*;
pub use neighborhood::*;
