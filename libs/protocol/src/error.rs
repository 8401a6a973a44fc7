use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("command name must not be empty")]
    EmptyCommand,

    #[error("malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("reply is not a JSON object")]
    NotAnObject,
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
