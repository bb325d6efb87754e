use std::sync::Arc;

use common::remote::ExistenceCheck;
use models::rules::required_id;
use models::users::{role, user};
use tracing::{info, instrument, warn};

use super::domain::{LoginInput, RoleInput, UserInput};
use super::password;
use super::repository::UsersRepository;
use crate::errors::ServiceError;
use crate::references::{ROLE, STATUS, USER};

pub const BAD_CREDENTIALS: &str = "Credenciales inválidas";

const SEED_ROLES: &[&str] = &["Administrador", "Cliente", "Vendedor"];

/// Account created by the seed. Its status is the first one seeded by products.
pub const SEED_ADMIN_EMAIL: &str = "admin@marketplace.cl";
const SEED_ADMIN_PASSWORD: &str = "admin1234";

/// Users business service independent of web framework
pub struct UsersService {
    repo: Arc<dyn UsersRepository>,
    statuses: Arc<dyn ExistenceCheck>,
}

impl UsersService {
    pub fn new(repo: Arc<dyn UsersRepository>, statuses: Arc<dyn ExistenceCheck>) -> Self {
        Self { repo, statuses }
    }

    pub async fn list_roles(&self) -> Result<Vec<role::Model>, ServiceError> {
        self.repo.list_roles().await
    }

    pub async fn get_role(&self, id: i32) -> Result<role::Model, ServiceError> {
        self.repo.find_role(id).await?.ok_or_else(|| ROLE.not_found(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_role(&self, input: RoleInput) -> Result<role::Model, ServiceError> {
        let name = role::NAME.check(input.name.as_deref())?;
        if self.repo.find_role_by_name(&name).await?.is_some() {
            return Err(ServiceError::Conflict(role::DUPLICATE.into()));
        }
        let created = self.repo.insert_role(role::Model { id: 0, name }).await?;
        info!(role_id = created.id, "role_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_role(
        &self,
        id: i32,
        input: RoleInput,
    ) -> Result<Option<role::Model>, ServiceError> {
        let Some(mut current) = self.repo.find_role(id).await? else {
            return Ok(None);
        };
        if input.name.is_some() {
            let name = role::NAME.check(input.name.as_deref())?;
            if self.repo.find_role_by_name(&name).await?.is_some_and(|other| other.id != id) {
                return Err(ServiceError::Conflict(role::DUPLICATE.into()));
            }
            current.name = name;
        }
        Ok(Some(self.repo.update_role(current).await?))
    }

    #[instrument(skip(self))]
    pub async fn delete_role(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_role(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete_role(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>, ServiceError> {
        self.repo.list_users().await
    }

    pub async fn get_user(&self, id: i32) -> Result<user::Model, ServiceError> {
        self.repo.find_user(id).await?.ok_or_else(|| USER.not_found(id))
    }

    pub async fn users_by_role(&self, role_id: i32) -> Result<Vec<user::Model>, ServiceError> {
        self.repo.users_by_role(role_id).await
    }

    pub async fn users_by_status(&self, status_id: i32) -> Result<Vec<user::Model>, ServiceError> {
        self.repo.users_by_status(status_id).await
    }

    async fn ensure_unique(
        &self,
        rut: Option<&str>,
        email: Option<&str>,
        own_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let taken = |found: Option<user::Model>| found.is_some_and(|u| Some(u.id) != own_id);
        if let Some(rut) = rut {
            if taken(self.repo.find_user_by_rut(rut).await?) {
                return Err(ServiceError::Conflict(user::DUPLICATE_RUT.into()));
            }
        }
        if let Some(email) = email {
            if taken(self.repo.find_user_by_email(email).await?) {
                return Err(ServiceError::Conflict(user::DUPLICATE_EMAIL.into()));
            }
        }
        Ok(())
    }

    async fn ensure_role(&self, id: i32) -> Result<(), ServiceError> {
        ROLE.local(id, self.repo.find_role(id).await?.is_some())
    }

    /// Register an account; the status is confirmed with the products service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use common::remote::mock::StaticExistence;
    /// use service::users::domain::{RoleInput, UserInput};
    /// use service::users::{repository::mock::MockUsersRepository, UsersService};
    /// let repo = Arc::new(MockUsersRepository::default());
    /// let svc = UsersService::new(repo, Arc::new(StaticExistence::new("statuses", [1])));
    /// let cliente = RoleInput { name: Some("Cliente".into()) };
    /// let role = tokio_test::block_on(svc.create_role(cliente)).unwrap();
    /// let input = UserInput {
    ///     rut: Some("12345678-5".into()),
    ///     name: Some("Ana".into()),
    ///     lastname: Some("Rojas".into()),
    ///     email: Some("Ana@Correo.cl".into()),
    ///     password: Some("Secreta123".into()),
    ///     role_id: Some(role.id),
    ///     status_id: Some(1),
    ///     ..Default::default()
    /// };
    /// let user = tokio_test::block_on(svc.create_user(input)).unwrap();
    /// assert_eq!(user.email, "ana@correo.cl");
    /// assert_ne!(user.password_hash, "Secreta123");
    /// ```
    #[instrument(skip(self, input), fields(email = ?input.email))]
    pub async fn create_user(&self, input: UserInput) -> Result<user::Model, ServiceError> {
        let rut = user::RUT.check(input.rut.as_deref())?;
        let name = user::NAME.check(input.name.as_deref())?;
        let lastname = user::LASTNAME.check(input.lastname.as_deref())?;
        let phone = user::PHONE.check_optional(input.phone.as_deref())?;
        let email = user::validate_email(input.email.as_deref())?;
        let plain = user::validate_password(input.password.as_deref())?;
        let role_id = required_id(input.role_id, user::ROLE_ID_MISSING)?;
        let status_id = required_id(input.status_id, user::STATUS_ID_MISSING)?;

        self.ensure_unique(Some(&rut), Some(&email), None).await?;
        self.ensure_role(role_id).await?;
        STATUS.ensure_remote(self.statuses.as_ref(), status_id).await?;

        let password_hash = password::hash(&plain)?;
        let created = self
            .repo
            .insert_user(user::Model {
                id: 0,
                rut,
                name,
                lastname,
                phone,
                email,
                password_hash,
                role_id,
                status_id,
            })
            .await?;
        info!(user_id = created.id, role_id, "user_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_user(
        &self,
        id: i32,
        input: UserInput,
    ) -> Result<Option<user::Model>, ServiceError> {
        let Some(mut current) = self.repo.find_user(id).await? else {
            return Ok(None);
        };
        if input.rut.is_some() {
            current.rut = user::RUT.check(input.rut.as_deref())?;
        }
        if input.name.is_some() {
            current.name = user::NAME.check(input.name.as_deref())?;
        }
        if input.lastname.is_some() {
            current.lastname = user::LASTNAME.check(input.lastname.as_deref())?;
        }
        if input.phone.is_some() {
            current.phone = user::PHONE.check_optional(input.phone.as_deref())?;
        }
        if input.email.is_some() {
            current.email = user::validate_email(input.email.as_deref())?;
        }
        let new_password = match input.password.as_deref() {
            Some(p) => Some(user::validate_password(Some(p))?),
            None => None,
        };
        self.ensure_unique(
            input.rut.is_some().then_some(current.rut.as_str()),
            input.email.is_some().then_some(current.email.as_str()),
            Some(id),
        )
        .await?;
        if let Some(role_id) = input.role_id {
            self.ensure_role(role_id).await?;
            current.role_id = role_id;
        }
        if let Some(status_id) = input.status_id {
            STATUS.ensure_remote(self.statuses.as_ref(), status_id).await?;
            current.status_id = status_id;
        }
        if let Some(plain) = new_password {
            current.password_hash = password::hash(&plain)?;
        }
        let updated = self.repo.update_user(current).await?;
        info!(user_id = id, "user_updated");
        Ok(Some(updated))
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_user(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete_user(id).await
    }

    /// Check an email and password against the stored hash. No session is created.
    #[instrument(skip(self, input), fields(email = ?input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<user::Model, ServiceError> {
        let email = user::EMAIL.check(input.email.as_deref())?.to_lowercase();
        let plain = user::read_password(input.password.as_deref())?;
        let unauthorized = || ServiceError::Unauthorized(BAD_CREDENTIALS.into());

        let Some(found) = self.repo.find_user_by_email(&email).await? else {
            warn!("login_unknown_email");
            return Err(unauthorized());
        };
        if !password::verify(&plain, &found.password_hash) {
            warn!(user_id = found.id, "login_bad_password");
            return Err(unauthorized());
        }
        info!(user_id = found.id, "login_ok");
        Ok(found)
    }

    /// Insert fixture roles and an administrator when no role exists yet.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<u64, ServiceError> {
        if self.repo.count_roles().await? > 0 {
            info!("users_seed_skipped");
            return Ok(0);
        }
        let mut admin_role = None;
        for name in SEED_ROLES {
            let r = self.repo.insert_role(role::Model { id: 0, name: (*name).into() }).await?;
            admin_role.get_or_insert(r.id);
        }
        let mut written = SEED_ROLES.len() as u64;
        if let Some(role_id) = admin_role {
            if self.repo.find_user_by_email(SEED_ADMIN_EMAIL).await?.is_none() {
                let admin = user::Model {
                    id: 0,
                    rut: "11111111-1".into(),
                    name: "Administrador".into(),
                    lastname: "Marketplace".into(),
                    phone: None,
                    email: SEED_ADMIN_EMAIL.into(),
                    password_hash: password::hash(SEED_ADMIN_PASSWORD)?,
                    role_id,
                    status_id: 1,
                };
                self.repo.insert_user(admin).await?;
                written += 1;
            }
        }
        info!(rows = written, "users_seeded");
        Ok(written)
    }
}
