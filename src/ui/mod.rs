//! Terminal UI: a cursor-driven board view with the move history beside it.

mod app;
mod game_view;

pub use app::{App, Mode};
