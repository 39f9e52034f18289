use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The response's top-level shape did not match the declared schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("service failure: {0}")]
    ServiceFailure(String),
}

impl AiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}
