/// Failures the domain layer cannot classify as an ordinary outcome.
///
/// Validation problems, missing identifiers and unknown issues are *not*
/// errors; they are variants of the outcome enums in [`crate::tracker`].
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap a backend-specific error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreError::Storage(Box::new(err))
    }
}
