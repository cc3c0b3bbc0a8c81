//! Elite Life - Conway's Game of Life with configurable neighborhoods and immortal cells.
//!
//! The rule engine generalizes the classic automaton in two ways:
//!
//! - Neighborhoods are Moore squares or von Neumann diamonds of any radius,
//!   with survival/birth tolerances derived from the neighborhood size.
//! - A configurable fraction of alive cells is periodically promoted to
//!   immortal ("elite") and survives regardless of its neighbors.
//!
//! # Architecture
//!
//! - `schema`: Configuration and seed types (serde-serializable)
//! - `compute`: Grid state, rule engine, games and batch runs
//! - `view`: Text rendering and pixel/pointer mapping for drivers
//!
//! # Example
//!
//! ```rust,no_run
//! use elite_life::{
//!     schema::{GameConfig, LifeConfig},
//!     compute::Game,
//! };
//!
//! let config = GameConfig {
//!     life: LifeConfig {
//!         elite_fraction: 0.05,
//!         ..Default::default()
//!     },
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut game = Game::from_config(&config).expect("valid config");
//! while game.is_moving() && game.generation() < 100 {
//!     game.advance();
//! }
//!
//! println!("{}", game);
//! ```

pub mod compute;
pub mod schema;
pub mod view;

// Re-export commonly used types
pub use compute::{BatchResult, BatchRunner, Brush, Game, GameStats, GridState, LifeEngine};
pub use schema::{BatchConfig, GameConfig, LifeConfig, NeighborhoodType, Pattern, Seed};
