use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::ModelError;
use crate::rules::TextRule;

/// An account. The password hash never leaves the service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
#[schema(as = User)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub rut: String,
    pub name: String,
    pub lastname: String,
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role_id: i32,
    pub status_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Role,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Role => Entity::belongs_to(super::role::Entity)
                .from(Column::RoleId)
                .to(super::role::Column::Id)
                .into(),
        }
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const RUT: TextRule = TextRule {
    max: 12,
    missing: "El RUT es obligatorio",
    too_long: "El RUT no puede superar los 12 caracteres",
};
pub const NAME: TextRule = TextRule {
    max: 100,
    missing: "El nombre es obligatorio",
    too_long: "El nombre no puede superar los 100 caracteres",
};
pub const LASTNAME: TextRule = TextRule {
    max: 100,
    missing: "El apellido es obligatorio",
    too_long: "El apellido no puede superar los 100 caracteres",
};
pub const PHONE: TextRule = TextRule {
    max: 20,
    missing: "El teléfono es obligatorio",
    too_long: "El teléfono no puede superar los 20 caracteres",
};
pub const EMAIL: TextRule = TextRule {
    max: 150,
    missing: "El correo es obligatorio",
    too_long: "El correo no puede superar los 150 caracteres",
};
pub const PASSWORD: TextRule = TextRule {
    max: 128,
    missing: "La contraseña es obligatoria",
    too_long: "La contraseña no puede superar los 128 caracteres",
};

pub const PASSWORD_MIN: usize = 8;
pub const DUPLICATE_RUT: &str = "Ya existe un usuario con ese RUT";
pub const DUPLICATE_EMAIL: &str = "Ya existe un usuario con ese correo";
pub const ROLE_ID_MISSING: &str = "El id del rol es obligatorio";
pub const STATUS_ID_MISSING: &str = "El id del estado es obligatorio";

/// Required, bounded, and shaped like `local@domain.tld`; stored lowercase.
pub fn validate_email(value: Option<&str>) -> Result<String, ModelError> {
    let email = EMAIL.check(value)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid || email.contains(char::is_whitespace) {
        return Err(ModelError::validation("El correo no tiene un formato válido"));
    }
    Ok(email.to_lowercase())
}

/// Password as typed. Whitespace is part of the secret, so it is never trimmed;
/// an all-blank value counts as missing.
pub fn read_password(value: Option<&str>) -> Result<String, ModelError> {
    let password = value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ModelError::validation(PASSWORD.missing))?;
    if password.chars().count() > PASSWORD.max {
        return Err(ModelError::validation(PASSWORD.too_long));
    }
    Ok(password.to_string())
}

/// Plain-text password before hashing.
pub fn validate_password(value: Option<&str>) -> Result<String, ModelError> {
    let password = read_password(value)?;
    if password.chars().count() < PASSWORD_MIN {
        return Err(ModelError::validation("La contraseña debe tener al menos 8 caracteres"));
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_and_case() {
        assert_eq!(validate_email(Some(" Ana@Correo.CL ")).unwrap(), "ana@correo.cl");
        assert!(validate_email(Some("sin-arroba.cl")).is_err());
        assert!(validate_email(Some("ana@local")).is_err());
        assert!(validate_email(None).is_err());
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password(Some("corta")).is_err());
        assert!(validate_password(Some("suficiente")).is_ok());
    }

    #[test]
    fn password_keeps_surrounding_spaces() {
        assert_eq!(validate_password(Some("  clave segura ")).unwrap(), "  clave segura ");
        assert_eq!(read_password(Some(" x ")).unwrap(), " x ");
        assert!(read_password(Some("   ")).is_err());
        assert!(read_password(None).is_err());
    }

    #[test]
    fn hash_is_not_serialized() {
        let u = Model {
            id: 1,
            rut: "1-9".into(),
            name: "A".into(),
            lastname: "B".into(),
            phone: None,
            email: "a@b.cl".into(),
            password_hash: "secret".into(),
            role_id: 1,
            status_id: 1,
        };
        let json = serde_json::to_value(&u).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["roleId"], 1);
    }
}
