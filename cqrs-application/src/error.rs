use cqrs_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),

    #[error("command missing: {0}")]
    CommandMissing(&'static str),

    #[error("handler not found: {0}")]
    HandlerNotFound(String),

    #[error("ambiguous handler: contract={contract}, registered={count}")]
    AmbiguousHandler { contract: String, count: usize },

    #[error("event not registered: {0}")]
    EventNotRegistered(String),

    #[error("event already registered: {event_type}")]
    AlreadyRegisteredEvent { event_type: String },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
}

/// 应用层 Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Domain(DomainError::from(err))
    }
}
