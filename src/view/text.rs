//! Plain-text rendering for terminal drivers.

use std::fmt;

use crate::compute::{Game, GridState};
use crate::schema::NeighborhoodType;

/// Clears the terminal.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Moves the cursor to the top-left corner.
pub const CURSOR_HOME: &str = "\x1b[H";

pub const ALIVE_CHAR: char = '#';
pub const IMMORTAL_CHAR: char = '@';
pub const DEAD_CHAR: char = '.';

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.height() {
            for j in 0..self.width() {
                let c = if self.is_immortal(i, j) {
                    IMMORTAL_CHAR
                } else if self.is_alive(i, j) {
                    ALIVE_CHAR
                } else {
                    DEAD_CHAR
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config();
        let (height, width) = self.grid().shape();
        let kind = match config.neighborhood_type {
            NeighborhoodType::Moore => "moore",
            NeighborhoodType::VonNeumann => "vonNeumann",
        };
        writeln!(
            f,
            "Game(shape={}x{}, neighborhood={}/{}, elite={:.2}) generation={} alive={} immortal={}",
            height,
            width,
            kind,
            config.neighborhood_order,
            config.elite_fraction,
            self.generation(),
            self.count_alive(),
            self.count_immortal()
        )?;
        write!(f, "{}", self.grid())
    }
}

/// A full terminal frame: cursor home followed by the rendered game.
pub fn frame(game: &Game) -> String {
    format!("{}{}", CURSOR_HOME, game)
}
