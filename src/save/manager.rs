use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::SaveError;
use crate::game::{Color, GameState};
use crate::save::snapshot;

/// File extension used for save slots.
pub const SLOT_EXTENSION: &str = "kwz";

/// Configuration for the save manager.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    pub save_dir: PathBuf,
    pub quicksave_slot: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        SaveConfig {
            save_dir: PathBuf::from("saves"),
            quicksave_slot: "quicksave".to_string(),
        }
    }
}

/// Summary of one save slot, read from its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    pub name: String,
    pub path: PathBuf,
    pub move_count: usize,
    pub current_player: Color,
    pub game_ended: bool,
}

/// Write a game to `path`.
///
/// The text goes to a temporary sibling first and is renamed over the
/// target, so an existing file survives a failed write.
pub fn save_game(state: &GameState, path: &Path) -> Result<(), SaveError> {
    let text = snapshot::to_text(state)?;

    let tmp = tmp_path(path);
    fs::write(&tmp, text).map_err(|e| SaveError::Write {
        path: tmp.clone(),
        source: e,
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        SaveError::Write {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    info!("saved game after {} moves to {}", state.move_count(), path.display());
    Ok(())
}

/// Read a game from `path`.
pub fn load_game(path: &Path) -> Result<GameState, SaveError> {
    let text = fs::read_to_string(path).map_err(|e| SaveError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let state = snapshot::from_text(&text).map_err(|e| SaveError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("loaded game with {} moves from {}", state.move_count(), path.display());
    Ok(state)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Manages named save slots in a directory.
pub struct SaveManager {
    config: SaveConfig,
}

impl SaveManager {
    pub fn new(config: SaveConfig) -> Self {
        SaveManager { config }
    }

    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    /// Path a slot is stored at
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf, SaveError> {
        validate_slot_name(slot)?;
        Ok(self
            .config
            .save_dir
            .join(format!("{}.{}", slot, SLOT_EXTENSION)))
    }

    /// Save a game into a slot, replacing whatever was there.
    pub fn save_slot(&self, state: &GameState, slot: &str) -> Result<PathBuf, SaveError> {
        let path = self.slot_path(slot)?;
        fs::create_dir_all(&self.config.save_dir)?;
        save_game(state, &path)?;
        Ok(path)
    }

    /// Load the game stored in a slot.
    pub fn load_slot(&self, slot: &str) -> Result<GameState, SaveError> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Err(SaveError::SlotNotFound(slot.to_string()));
        }
        load_game(&path)
    }

    /// Remove a slot.
    pub fn delete_slot(&self, slot: &str) -> Result<(), SaveError> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Err(SaveError::SlotNotFound(slot.to_string()));
        }
        fs::remove_file(&path)?;
        info!("deleted save slot {}", slot);
        Ok(())
    }

    /// List all slots sorted by name. A missing save directory means no slots.
    pub fn list_slots(&self) -> Result<Vec<SlotInfo>, SaveError> {
        let mut results = Vec::new();
        if !self.config.save_dir.exists() {
            return Ok(results);
        }

        for entry in fs::read_dir(&self.config.save_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(SLOT_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };

            let state = load_game(&path)?;
            results.push(SlotInfo {
                name,
                path,
                move_count: state.move_count(),
                current_player: state.current_player(),
                game_ended: state.is_game_ended(),
            });
        }
        results.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(results)
    }
}

/// Slot names become file names, so they may not be empty or contain path
/// separators.
pub fn validate_slot_name(slot: &str) -> Result<(), SaveError> {
    let bad = slot.trim().is_empty()
        || slot.contains(['/', '\\'])
        || slot == "."
        || slot == "..";
    if bad {
        return Err(SaveError::InvalidSlot(slot.to_string()));
    }
    Ok(())
}
