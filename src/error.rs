use std::path::PathBuf;
use thiserror::Error;

/// Problems reading or writing roster and settings files
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: invalid value {value:?} for {column}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Unsupported file extension: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Reasons a roster and settings pair cannot produce a sensible lineup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineupError {
    #[error("Minimum quarters per game ({min}) is greater than the maximum ({max})")]
    MinAboveMax { min: u32, max: u32 },

    #[error("Formation has no field positions")]
    EmptyFormation,

    #[error("Formation needs {required} players but only {active} are active")]
    NotEnoughPlayers { required: u32, active: u32 },

    #[error("Duplicate player name: {0}")]
    DuplicateName(String),

    #[error("Player name cannot be empty")]
    EmptyName,
}
