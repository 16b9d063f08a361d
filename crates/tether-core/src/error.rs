use thiserror::Error;

/// The native host could not produce an object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("native host failed to create object: {0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Why the registry could not back a declared widget with a native object.
///
/// All variants are recoverable: the widget is skipped for this frame and
/// retried on the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateError {
    #[error("registry is full ({limit} live entries)")]
    Capacity { limit: usize },
    #[error("no live parent window for child widget")]
    MissingParent,
    #[error(transparent)]
    Host(#[from] HostError),
}
