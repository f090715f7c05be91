use thiserror::Error;

/// Fatal configuration errors raised while building a [`crate::controller::Controller`].
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("a presentation needs at least one slide")]
    EmptyDeck,

    #[error("invalid presentation address: {0}")]
    InvalidAddress(#[from] url::ParseError),
}
