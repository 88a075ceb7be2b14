//! Core Kwazam Chess rules: board representation, piece movement rules,
//! and the turn-by-turn game state machine.

mod board;
mod color;
mod piece;
mod position;
mod state;

pub use board::{Board, COLS, ROWS};
pub use color::Color;
pub use piece::{Piece, PieceKind, RunnerState};
pub use position::Position;
pub use state::{
    GameState, MoveError, MoveReport, DEFAULT_PLAYER1_NAME, DEFAULT_PLAYER2_NAME,
    TRANSFORM_INTERVAL,
};
