//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// A rejected external command. The world is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("no llama with id {0}")]
    UnknownLlama(String),

    #[error("{name} is no longer with us")]
    Deceased { name: String },

    #[error("select two llamas to breed ({selected} selected)")]
    BreedingNeedsTwo { selected: usize },

    #[error("a llama cannot breed with itself")]
    SelfBreeding,

    #[error("name cannot be empty")]
    EmptyName,

    #[error("the name {0} is already taken")]
    NameTaken(String),

    #[error("no living llamas to toggle")]
    NoLivingTargets,

    #[error("select a llama first")]
    NothingSelected,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode habitat snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The audio collaborator could not play something.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_messages() {
        assert_eq!(
            CommandError::BreedingNeedsTwo { selected: 1 }.to_string(),
            "select two llamas to breed (1 selected)"
        );
        assert_eq!(
            CommandError::Deceased {
                name: "Neo Wool".into()
            }
            .to_string(),
            "Neo Wool is no longer with us"
        );
        assert_eq!(
            CommandError::NameTaken("Rex Fuzz".into()).to_string(),
            "the name Rex Fuzz is already taken"
        );
    }
}
