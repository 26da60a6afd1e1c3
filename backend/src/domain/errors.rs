use thiserror::Error;

/// Errors surfaced by the domain layer.
///
/// Store-level I/O failures are wrapped transparently and propagated
/// uncaught; everything else is a user-visible condition.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Mark attempted on a (pet, mealtime, date) triple that already has a record
    #[error("This meal has already been marked as fed")]
    AlreadyFed,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("User is not a member of this family")]
    NotAMember,

    /// Request failed validation before reaching storage
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DomainError::Invalid(msg.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
