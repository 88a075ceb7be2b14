//! Saving and restoring games: the line-oriented text format and a small
//! slot manager on top of it.

mod manager;
pub mod snapshot;

pub use manager::{load_game, save_game, validate_slot_name, SaveConfig, SaveManager, SlotInfo};
pub use snapshot::{from_text, to_text, HISTORY_MARKER};
