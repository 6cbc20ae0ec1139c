// Error types for modelgate

use crate::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Node not found in model graph: {0}")]
    NodeNotFound(NodeId),

    #[error("Model graph has no root node")]
    MissingRoot,

    #[error("Model graph already has a root node: {0}")]
    DuplicateRoot(NodeId),

    #[error("Invalid node metadata: {0}")]
    InvalidMetadata(String),

    #[error("Customization lookup failed: {0}")]
    Customization(String),

    #[error("Validator failed: {0}")]
    Validator(String),

    #[error("Interceptor failed: {0}")]
    Interceptor(String),

    #[error("Logging initialization failed: {0}")]
    Logging(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error was raised by a request-scoped collaborator
    /// (customization provider, validator, interceptor) rather than by
    /// graph construction or setup.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Error::Customization(_) | Error::Validator(_) | Error::Interceptor(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
