//! Reference checks shared by every service.
//!
//! A reference is either confirmed, confirmed absent (400) or unverifiable
//! because the sibling could not answer (502).

use common::remote::{ExistenceCheck, RemoteError};
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// Wording for one kind of referenced entity.
#[derive(Debug, Clone, Copy)]
pub struct Reference {
    /// Sentence-initial form, e.g. "El usuario".
    pub subject: &'static str,
    /// Object form, e.g. "el usuario".
    pub object: &'static str,
}

pub const REGION: Reference = Reference { subject: "La región", object: "la región" };
pub const COMUNA: Reference = Reference { subject: "La comuna", object: "la comuna" };
pub const USER: Reference = Reference { subject: "El usuario", object: "el usuario" };
pub const CATEGORY: Reference = Reference { subject: "La categoría", object: "la categoría" };
pub const STATUS: Reference = Reference { subject: "El estado", object: "el estado" };
pub const ADDRESS: Reference = Reference { subject: "La dirección", object: "la dirección" };
pub const BUY: Reference = Reference { subject: "La compra", object: "la compra" };
pub const PRODUCT: Reference = Reference { subject: "El producto", object: "el producto" };
pub const ROLE: Reference = Reference { subject: "El rol", object: "el rol" };

impl Reference {
    pub fn missing(&self, id: i32) -> ServiceError {
        ServiceError::Validation(format!("{} con id {} no existe", self.subject, id))
    }

    pub fn not_found(&self, id: i32) -> ServiceError {
        let found = if self.subject.starts_with("El ") { "encontrado" } else { "encontrada" };
        ServiceError::NotFound(format!("{} con id {} no fue {}", self.subject, id, found))
    }

    pub fn unverifiable(&self, id: i32, err: &RemoteError) -> ServiceError {
        warn!(reference = self.object, id, error = %err, "reference could not be verified");
        ServiceError::Unavailable(format!("No se pudo verificar {} con id {}", self.object, id))
    }

    /// Outcome of a local lookup.
    pub fn local(&self, id: i32, found: bool) -> Result<(), ServiceError> {
        if found { Ok(()) } else { Err(self.missing(id)) }
    }

    /// Outcome of a sibling lookup.
    pub fn remote(&self, id: i32, outcome: Result<bool, RemoteError>) -> Result<(), ServiceError> {
        match outcome {
            Ok(true) => {
                debug!(reference = self.object, id, "reference confirmed");
                Ok(())
            }
            Ok(false) => Err(self.missing(id)),
            Err(err) => Err(self.unverifiable(id, &err)),
        }
    }

    /// Ask a sibling service whether `id` exists.
    pub async fn ensure_remote(
        &self,
        check: &dyn ExistenceCheck,
        id: i32,
    ) -> Result<(), ServiceError> {
        self.remote(id, check.exists(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::remote::mock::StaticExistence;

    #[tokio::test]
    async fn absent_is_validation_and_down_is_unavailable() {
        let known = StaticExistence::new("users", [1]);
        assert!(USER.ensure_remote(&known, 1).await.is_ok());
        assert_eq!(
            USER.ensure_remote(&known, 999).await,
            Err(ServiceError::Validation("El usuario con id 999 no existe".into()))
        );

        let down = StaticExistence::unreachable("users");
        match USER.ensure_remote(&down, 1).await {
            Err(ServiceError::Unavailable(msg)) => {
                assert_eq!(msg, "No se pudo verificar el usuario con id 1")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn not_found_agrees_with_gender() {
        assert_eq!(REGION.not_found(3).to_string(), "La región con id 3 no fue encontrada");
        assert_eq!(PRODUCT.not_found(3).to_string(), "El producto con id 3 no fue encontrado");
    }
}
