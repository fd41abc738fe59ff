use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No team name argument given")]
    MissingTeamName,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {endpoint}: {body}")]
    UnexpectedStatus {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("No playable move with dice {dice:?}")]
    NoLegalMove { dice: Vec<u32> },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
