use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Nothing to award: add leftovers and/or bonuses first")]
    NothingToAward,

    #[error("Invalid value for '{field}': {value:?}")]
    InvalidConfigurationValue { field: &'static str, value: String },

    #[error("Invalid tile: {0}")]
    InvalidTile(String),

    #[error("Unknown game type: {0}")]
    UnknownGameType(String),

    #[error("History index {index} out of range (history has {len} entries)")]
    HistoryIndexOutOfRange { index: usize, len: usize },

    #[error("Cannot move entry {index}: {team} has {score}, entry is worth {delta}")]
    CorrectionUnderflow {
        index: usize,
        team: String,
        score: u32,
        delta: u32,
    },

    #[error("Storage unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("Malformed saved match: {0}")]
    MalformedPersistedState(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ScoreResult<T> = Result<T, ScoreError>;
