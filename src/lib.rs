//! # Kwazam Chess
//!
//! A two-player chess variant on an 8x5 board. Towers and Crosses swap
//! shapes every fourth move, Runners turn around when they reach the far
//! side, and taking the enemy Guard wins the game.
//!
//! ## Modules
//!
//! - [`game`]: Rules engine: board, pieces, game state machine
//! - [`save`]: Text save format, file saving and save slots
//! - [`config`]: TOML configuration loading and validation
//! - [`ui`]: Terminal UI
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod save;
pub mod ui;
