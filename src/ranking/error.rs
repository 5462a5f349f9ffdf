use thiserror::Error;

/// Why a ranking request produced no result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("no ideas to rank")]
    EmptyInput,

    #[error("no API key provided and fallback disabled")]
    MissingCredential,

    #[error("remote call failed: {0}")]
    RemoteCallFailed(String),

    #[error("response parse failed: {0}")]
    ResponseParseFailed(String),
}
