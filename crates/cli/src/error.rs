//! `citrus` failures and the process exit code each one maps to.
//!
//! | code | meaning |
//! |------|---------|
//! | 2    | argument parsing (clap, before `run`) |
//! | 10   | sketch rejected the scene: zero vesicles, zero-sized canvas |
//! | 11   | scene file unreadable, PNG not writable |
//! | 12   | bad user input: colors, `--params`, malformed scene files |
//! | 13   | JSON output could not be produced |

use citrus_core::CitrusError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Citrus(CitrusError),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Input(String),

    #[error("output encoding failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Citrus(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

/// Sorts sketch errors by who has to act: the filesystem, the user's
/// typing, or the scene's values.
impl From<CitrusError> for CliError {
    fn from(e: CitrusError) -> Self {
        match e {
            CitrusError::Io(msg) => CliError::Io(msg),
            e @ (CitrusError::InvalidColor(_) | CitrusError::InvalidScene(_)) => {
                CliError::Input(e.to_string())
            }
            other => CliError::Citrus(other),
        }
    }
}
