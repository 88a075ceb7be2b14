use std::path::PathBuf;

/// Errors raised while reading a saved game from text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("saved game ends before the {0} line")]
    MissingField(&'static str),

    #[error("invalid current player '{0}' (expected FIRST or SECOND)")]
    InvalidColor(String),

    #[error("invalid turn count '{0}'")]
    InvalidTurnCount(String),

    #[error("line {line}: malformed piece entry '{text}': {reason}")]
    MalformedPiece {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("line {line}: two pieces placed on row {row}, col {col}")]
    DuplicatePiece { line: usize, row: i32, col: i32 },

    #[error("saved game has no HISTORY_START marker")]
    MissingHistoryMarker,

    #[error("player name {0:?} contains a line break")]
    InvalidPlayerName(String),
}

/// Errors that can occur while saving or loading games on disk.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to read saved game {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write saved game {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse saved game {path}: {source}")]
    Parse {
        path: PathBuf,
        source: SnapshotError,
    },

    #[error("cannot save game: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("invalid save slot name '{0}'")]
    InvalidSlot(String),

    #[error("no save slot named '{0}'")]
    SlotNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems with the `kwazam.toml` settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read settings file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("settings file is not valid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("bad setting: {0}")]
    Validation(String),
}
