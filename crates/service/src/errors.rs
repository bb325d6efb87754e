use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Business outcome of a failed operation. The message is shown to the caller as-is.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Blocked(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Db(String),
}

pub const REFERENCED: &str =
    "La operación no es posible porque el registro está relacionado con otros datos";

impl ServiceError {
    /// Map a storage error, reporting unique violations with `conflict`.
    pub fn from_db(err: DbErr, conflict: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(conflict.to_string()),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => Self::Blocked(REFERENCED.to_string()),
            _ => Self::Db(err.to_string()),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        Self::from_db(err, "El registro ya existe")
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => Self::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_validation_keeps_message() {
        let err: ServiceError = ModelError::validation("El stock no puede ser negativo").into();
        assert_eq!(err, ServiceError::Validation("El stock no puede ser negativo".into()));
        assert_eq!(err.to_string(), "El stock no puede ser negativo");
    }

    #[test]
    fn plain_db_error_is_db() {
        let err = ServiceError::from_db(DbErr::Custom("boom".into()), "dup");
        assert!(matches!(err, ServiceError::Db(_)));
    }
}
