use crate::params::error::ParamError;

pub type TimerResult<T> = Result<T, TimerError>;

#[derive(thiserror::Error, Debug)]
pub enum TimerError {
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamError),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimerError {
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Return the parameter error if this failure was caused by invalid input.
    pub fn as_params(&self) -> Option<&ParamError> {
        match self {
            Self::Params(e) => Some(e),
            _ => None,
        }
    }
}
