use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FootprintError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    #[error("Not logged into Cloud Foundry. Run `cf login` first, or configure a [login] block and set CF_PASSWORD.")]
    NotAuthenticated,

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Space not found: {0}")]
    SpaceNotFound(String),

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Unexpected output from `{command}`:\n{output}")]
    UnexpectedOutput { command: String, output: String },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl FootprintError {
    pub fn exit_code(&self) -> i32 {
        match self {
            FootprintError::NotAuthenticated | FootprintError::LoginFailed(_) => 3,
            FootprintError::SpaceNotFound(_) => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, FootprintError>;
