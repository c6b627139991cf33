//! Error kinds surfaced by the domain services.
//!
//! Storage code works in `anyhow::Result`; any storage failure that reaches a
//! service is converted into [`DomainError::StoreUnavailable`] by `?`.

/// Errors returned by every domain service operation
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::InvalidInput(message.into())
    }

    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "not_found",
            DomainError::InvalidInput(_) => "invalid_input",
            DomainError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}
