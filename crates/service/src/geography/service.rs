use std::sync::Arc;

use common::remote::ExistenceCheck;
use models::geography::{address, comuna, region};
use models::rules::required_id;
use tracing::{info, instrument};

use super::domain::{AddressInput, ComunaInput, RegionInput};
use super::repository::GeographyRepository;
use crate::errors::ServiceError;
use crate::references::{ADDRESS, COMUNA, REGION, USER};

/// Regions seeded into an empty database, with their comunas.
const SEED: &[(&str, &[&str])] = &[
    ("Región Metropolitana", &["Santiago", "Providencia", "Las Condes", "Maipú"]),
    ("Valparaíso", &["Valparaíso", "Viña del Mar", "Quilpué"]),
    ("Biobío", &["Concepción", "Talcahuano", "Los Ángeles"]),
];

/// Geography business service independent of web framework
pub struct GeographyService {
    repo: Arc<dyn GeographyRepository>,
    users: Arc<dyn ExistenceCheck>,
}

impl GeographyService {
    pub fn new(repo: Arc<dyn GeographyRepository>, users: Arc<dyn ExistenceCheck>) -> Self {
        Self { repo, users }
    }

    pub async fn list_regions(&self) -> Result<Vec<region::Model>, ServiceError> {
        self.repo.list_regions().await
    }

    pub async fn get_region(&self, id: i32) -> Result<region::Model, ServiceError> {
        self.repo.find_region(id).await?.ok_or_else(|| REGION.not_found(id))
    }

    /// Create a region with a unique name.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use common::remote::mock::StaticExistence;
    /// use service::geography::domain::RegionInput;
    /// use service::geography::{repository::mock::MockGeographyRepository, GeographyService};
    /// let repo = Arc::new(MockGeographyRepository::default());
    /// let svc = GeographyService::new(repo, Arc::new(StaticExistence::new("users", [])));
    /// let input = RegionInput { name: Some("Región X".into()) };
    /// let region = tokio_test::block_on(svc.create_region(input)).unwrap();
    /// assert_eq!(region.name, "Región X");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create_region(&self, input: RegionInput) -> Result<region::Model, ServiceError> {
        let name = region::NAME.check(input.name.as_deref())?;
        if self.repo.find_region_by_name(&name).await?.is_some() {
            return Err(ServiceError::Conflict(region::DUPLICATE.into()));
        }
        let created = self.repo.insert_region(region::Model { id: 0, name }).await?;
        info!(region_id = created.id, "region_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_region(
        &self,
        id: i32,
        input: RegionInput,
    ) -> Result<Option<region::Model>, ServiceError> {
        let Some(mut current) = self.repo.find_region(id).await? else {
            return Ok(None);
        };
        if input.name.is_some() {
            let name = region::NAME.check(input.name.as_deref())?;
            if let Some(other) = self.repo.find_region_by_name(&name).await? {
                if other.id != id {
                    return Err(ServiceError::Conflict(region::DUPLICATE.into()));
                }
            }
            current.name = name;
        }
        let updated = self.repo.update_region(current).await?;
        info!(region_id = id, "region_updated");
        Ok(Some(updated))
    }

    /// Refuses while comunas still point at the region.
    #[instrument(skip(self))]
    pub async fn delete_region(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_region(id).await?.is_none() {
            return Ok(false);
        }
        let dependents = self.repo.count_comunas_by_region(id).await?;
        if dependents > 0 {
            let noun = if dependents == 1 { "comuna asociada" } else { "comunas asociadas" };
            return Err(ServiceError::Blocked(format!(
                "No se puede eliminar la región porque tiene {dependents} {noun}"
            )));
        }
        let deleted = self.repo.delete_region(id).await?;
        info!(region_id = id, deleted, "region_deleted");
        Ok(deleted)
    }

    pub async fn list_comunas(&self) -> Result<Vec<comuna::Model>, ServiceError> {
        self.repo.list_comunas().await
    }

    pub async fn get_comuna(&self, id: i32) -> Result<comuna::Model, ServiceError> {
        self.repo.find_comuna(id).await?.ok_or_else(|| COMUNA.not_found(id))
    }

    pub async fn comunas_by_region(
        &self,
        region_id: i32,
    ) -> Result<Vec<comuna::Model>, ServiceError> {
        self.repo.comunas_by_region(region_id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_comuna(&self, input: ComunaInput) -> Result<comuna::Model, ServiceError> {
        let name = comuna::NAME.check(input.name.as_deref())?;
        let region_id = required_id(input.region_id, comuna::REGION_ID_MISSING)?;
        self.ensure_region(region_id).await?;
        let created = self.repo.insert_comuna(comuna::Model { id: 0, name, region_id }).await?;
        info!(comuna_id = created.id, region_id, "comuna_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_comuna(
        &self,
        id: i32,
        input: ComunaInput,
    ) -> Result<Option<comuna::Model>, ServiceError> {
        let Some(mut current) = self.repo.find_comuna(id).await? else {
            return Ok(None);
        };
        if input.name.is_some() {
            current.name = comuna::NAME.check(input.name.as_deref())?;
        }
        if let Some(region_id) = input.region_id {
            self.ensure_region(region_id).await?;
            current.region_id = region_id;
        }
        Ok(Some(self.repo.update_comuna(current).await?))
    }

    #[instrument(skip(self))]
    pub async fn delete_comuna(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_comuna(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete_comuna(id).await
    }

    pub async fn list_addresses(&self) -> Result<Vec<address::Model>, ServiceError> {
        self.repo.list_addresses().await
    }

    pub async fn get_address(&self, id: i32) -> Result<address::Model, ServiceError> {
        self.repo.find_address(id).await?.ok_or_else(|| ADDRESS.not_found(id))
    }

    pub async fn addresses_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<address::Model>, ServiceError> {
        self.repo.addresses_by_user(user_id).await
    }

    pub async fn addresses_by_comuna(
        &self,
        comuna_id: i32,
    ) -> Result<Vec<address::Model>, ServiceError> {
        self.repo.addresses_by_comuna(comuna_id).await
    }

    /// Local comuna first, then the owner in the users service.
    #[instrument(skip(self, input))]
    pub async fn create_address(
        &self,
        input: AddressInput,
    ) -> Result<address::Model, ServiceError> {
        let street = address::STREET.check(input.street.as_deref())?;
        let number = address::NUMBER.check(input.number.as_deref())?;
        let comuna_id = required_id(input.comuna_id, address::COMUNA_ID_MISSING)?;
        let user_id = required_id(input.user_id, address::USER_ID_MISSING)?;
        self.ensure_comuna(comuna_id).await?;
        USER.ensure_remote(self.users.as_ref(), user_id).await?;
        let created = self
            .repo
            .insert_address(address::Model { id: 0, street, number, comuna_id, user_id })
            .await?;
        info!(address_id = created.id, user_id, "address_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_address(
        &self,
        id: i32,
        input: AddressInput,
    ) -> Result<Option<address::Model>, ServiceError> {
        let Some(mut current) = self.repo.find_address(id).await? else {
            return Ok(None);
        };
        if input.street.is_some() {
            current.street = address::STREET.check(input.street.as_deref())?;
        }
        if input.number.is_some() {
            current.number = address::NUMBER.check(input.number.as_deref())?;
        }
        if let Some(comuna_id) = input.comuna_id {
            self.ensure_comuna(comuna_id).await?;
            current.comuna_id = comuna_id;
        }
        if let Some(user_id) = input.user_id {
            USER.ensure_remote(self.users.as_ref(), user_id).await?;
            current.user_id = user_id;
        }
        Ok(Some(self.repo.update_address(current).await?))
    }

    #[instrument(skip(self))]
    pub async fn delete_address(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_address(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete_address(id).await
    }

    /// Insert fixture regions and comunas when no region exists yet.
    /// Returns the number of rows written.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<u64, ServiceError> {
        if self.repo.count_regions().await? > 0 {
            info!("geography_seed_skipped");
            return Ok(0);
        }
        let mut written = 0;
        for (region_name, comunas) in SEED {
            let row = region::Model { id: 0, name: (*region_name).to_string() };
            let r = self.repo.insert_region(row).await?;
            written += 1;
            for name in comunas.iter() {
                let row = comuna::Model { id: 0, name: (*name).to_string(), region_id: r.id };
                self.repo.insert_comuna(row).await?;
                written += 1;
            }
        }
        info!(rows = written, "geography_seeded");
        Ok(written)
    }

    async fn ensure_region(&self, id: i32) -> Result<(), ServiceError> {
        REGION.local(id, self.repo.find_region(id).await?.is_some())
    }

    async fn ensure_comuna(&self, id: i32) -> Result<(), ServiceError> {
        COMUNA.local(id, self.repo.find_comuna(id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geography::repository::mock::MockGeographyRepository;
    use common::remote::mock::StaticExistence;

    fn svc_with(users: StaticExistence) -> (Arc<MockGeographyRepository>, GeographyService) {
        let repo = Arc::new(MockGeographyRepository::default());
        let svc = GeographyService::new(repo.clone(), Arc::new(users));
        (repo, svc)
    }

    fn svc() -> (Arc<MockGeographyRepository>, GeographyService) {
        svc_with(StaticExistence::new("users", [1]))
    }

    fn region_input(name: &str) -> RegionInput {
        RegionInput { name: Some(name.into()) }
    }

    fn comuna_input(name: &str, region_id: i32) -> ComunaInput {
        ComunaInput { name: Some(name.into()), region_id: Some(region_id) }
    }

    fn address_input(street: &str, number: &str, comuna_id: i32, user_id: i32) -> AddressInput {
        AddressInput {
            street: Some(street.into()),
            number: Some(number.into()),
            comuna_id: Some(comuna_id),
            user_id: Some(user_id),
        }
    }

    #[tokio::test]
    async fn duplicate_region_name_is_conflict() {
        let (_, svc) = svc();
        let r = svc.create_region(region_input("Región X")).await.unwrap();
        assert_eq!(r.name, "Región X");
        let err = svc.create_region(region_input("Región X")).await.unwrap_err();
        assert_eq!(err, ServiceError::Conflict("Ya existe una región con ese nombre".into()));
    }

    #[tokio::test]
    async fn region_name_is_trimmed_and_required() {
        let (_, svc) = svc();
        assert_eq!(svc.create_region(region_input("  Maule ")).await.unwrap().name, "Maule");
        let err = svc.create_region(RegionInput::default()).await.unwrap_err();
        assert_eq!(err, ServiceError::Validation(region::NAME.missing.into()));
    }

    #[tokio::test]
    async fn renaming_region_to_its_own_name_is_allowed() {
        let (_, svc) = svc();
        let a = svc.create_region(region_input("Ñuble")).await.unwrap();
        svc.create_region(region_input("Aysén")).await.unwrap();
        assert!(svc.update_region(a.id, region_input("Ñuble")).await.unwrap().is_some());
        let clash = svc.update_region(a.id, region_input("Aysén")).await;
        assert!(matches!(clash, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.update_region(99, region_input("Otra")).await, Ok(None));
    }

    #[tokio::test]
    async fn delete_region_counts_comunas() {
        let (repo, svc) = svc();
        let r = svc.create_region(region_input("Araucanía")).await.unwrap();
        for name in ["Temuco", "Villarrica"] {
            svc.create_comuna(comuna_input(name, r.id)).await.unwrap();
        }
        let err = svc.delete_region(r.id).await.unwrap_err();
        let msg = "No se puede eliminar la región porque tiene 2 comunas asociadas";
        assert_eq!(err, ServiceError::Blocked(msg.into()));

        repo.comunas.retain(|_| false);
        assert_eq!(svc.delete_region(r.id).await, Ok(true));
        assert_eq!(svc.delete_region(r.id).await, Ok(false));
    }

    #[tokio::test]
    async fn comuna_requires_existing_region() {
        let (repo, svc) = svc();
        let err = svc.create_comuna(comuna_input("Ancud", 42)).await.unwrap_err();
        assert_eq!(err, ServiceError::Validation("La región con id 42 no existe".into()));
        assert!(repo.comunas.is_empty());
    }

    #[tokio::test]
    async fn address_checks_comuna_before_user() {
        let log = common::remote::mock::CallLog::default();
        let (_, svc) = svc_with(StaticExistence::new("users", [1]).with_log(log.clone()));
        let input = address_input("Prat", "12", 5, 1);
        let err = svc.create_address(input).await.unwrap_err();
        assert_eq!(err.to_string(), "La comuna con id 5 no existe");
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn address_with_unknown_user_is_rejected() {
        let (repo, svc) = svc();
        let r = svc.create_region(region_input("Los Lagos")).await.unwrap();
        let c = svc.create_comuna(comuna_input("Osorno", r.id)).await.unwrap();
        let mut input = address_input("Ramírez", "5", c.id, 999);
        let err = svc.create_address(input.clone()).await.unwrap_err();
        assert_eq!(err.to_string(), "El usuario con id 999 no existe");
        assert!(repo.addresses.is_empty());

        input.user_id = Some(1);
        let a = svc.create_address(input).await.unwrap();
        assert_eq!(svc.addresses_by_user(1).await.unwrap(), vec![a]);
    }

    #[tokio::test]
    async fn unreachable_users_service_is_unavailable() {
        let (_, svc) = svc_with(StaticExistence::unreachable("users"));
        let r = svc.create_region(region_input("Atacama")).await.unwrap();
        let c = svc.create_comuna(comuna_input("Copiapó", r.id)).await.unwrap();
        let input = address_input("Atacama", "1", c.id, 1);
        assert!(matches!(svc.create_address(input).await, Err(ServiceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn partial_address_update_only_rechecks_present_refs() {
        let log = common::remote::mock::CallLog::default();
        let (_, svc) = svc_with(StaticExistence::new("users", [1]).with_log(log.clone()));
        let r = svc.create_region(region_input("Coquimbo")).await.unwrap();
        let c = svc.create_comuna(comuna_input("La Serena", r.id)).await.unwrap();
        let a = svc.create_address(address_input("Balmaceda", "9", c.id, 1)).await.unwrap();
        assert_eq!(log.lock().unwrap().len(), 1);

        let patch = AddressInput { number: Some("10".into()), ..Default::default() };
        let updated = svc.update_address(a.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.number, "10");
        assert_eq!(updated.street, "Balmaceda");
        assert_eq!(log.lock().unwrap().len(), 1);

        let bad = AddressInput { street: Some(" ".into()), ..Default::default() };
        assert!(matches!(svc.update_address(a.id, bad).await, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get_address(a.id).await.unwrap().street, "Balmaceda");
    }

    #[tokio::test]
    async fn seed_runs_once() {
        let (_, svc) = svc();
        let written = svc.seed().await.unwrap();
        assert_eq!(written, 13);
        assert_eq!(svc.seed().await.unwrap(), 0);
        assert_eq!(svc.list_regions().await.unwrap().len(), 3);
    }
}
