//! Errors surfaced by the host application.

use thiserror::Error;

use warfront_core::error::BattleError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("unknown preset scenario '{0}' (expected skirmish or siege)")]
    UnknownPreset(String),

    #[error("game loop is not running")]
    LoopStopped,
}

pub type Result<T> = std::result::Result<T, AppError>;
