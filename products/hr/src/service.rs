use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, instrument, warn};

use crate::{
    error::{HrError, HrResult, Lookup},
    gateway::{EmployeeGateway, SeaOrmEmployeeGateway},
    model::{Employee, NewEmployee},
};

/// Employee directory rules over an [`EmployeeGateway`].
///
/// The email pre-checks are plain reads followed by a write. Concurrent
/// writers can both pass the read; the unique index on `employee.email`
/// then rejects one of them and the rejection surfaces as
/// [`HrError::DuplicateEmail`].
#[derive(Clone)]
pub struct EmployeeService {
    gateway: Arc<dyn EmployeeGateway>,
}

impl EmployeeService {
    pub fn new(gateway: Arc<dyn EmployeeGateway>) -> Self {
        Self { gateway }
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmEmployeeGateway::new(db)))
    }

    #[instrument(name = "hr.employee.create", skip_all, fields(email = %input.email))]
    pub async fn create(&self, input: NewEmployee) -> HrResult<Employee> {
        let input = input.validated()?;
        if let Some(existing) = self.gateway.find_by_email(&input.email).await? {
            warn!(existing_id = existing.id, "email already registered");
            return Err(HrError::DuplicateEmail {
                email: existing.email,
            });
        }
        let email = input.email.clone();
        let created = self
            .gateway
            .insert(input)
            .await
            .map_err(|err| HrError::from_write(err, &email))?;
        info!(id = created.id, "employee created");
        Ok(created)
    }

    #[instrument(name = "hr.employee.list", skip_all)]
    pub async fn list(&self) -> HrResult<Vec<Employee>> {
        Ok(self.gateway.find_all().await?)
    }

    #[instrument(name = "hr.employee.get", skip(self))]
    pub async fn get_by_id(&self, id: i32) -> HrResult<Employee> {
        self.gateway
            .find_by_id(id)
            .await?
            .ok_or(HrError::NotFound(Lookup::Id(id)))
    }

    #[instrument(name = "hr.employee.get_by_email", skip(self))]
    pub async fn get_by_email(&self, email: &str) -> HrResult<Employee> {
        self.gateway
            .find_by_email(email)
            .await?
            .ok_or_else(|| HrError::NotFound(Lookup::Email(email.to_string())))
    }

    #[instrument(name = "hr.employee.find_by_name", skip(self))]
    pub async fn find_by_name(&self, first_name: &str, last_name: &str) -> HrResult<Vec<Employee>> {
        Ok(self
            .gateway
            .find_by_name(first_name.trim(), last_name.trim())
            .await?)
    }

    /// Full replace of the row keyed by `employee.id`.
    ///
    /// Existence is checked by id. The new email may stay the same or move to
    /// an unused address; taking another row's email is a conflict.
    #[instrument(name = "hr.employee.update", skip_all, fields(id = employee.id))]
    pub async fn update(&self, employee: Employee) -> HrResult<Employee> {
        let employee = employee.validated()?;
        let id = employee.id;
        if self.gateway.find_by_id(id).await?.is_none() {
            return Err(HrError::NotFound(Lookup::Id(id)));
        }
        if let Some(owner) = self.gateway.find_by_email(&employee.email).await? {
            if owner.id != id {
                warn!(owner_id = owner.id, "email owned by another employee");
                return Err(HrError::DuplicateEmail { email: owner.email });
            }
        }
        let email = employee.email.clone();
        let updated = self
            .gateway
            .update(employee)
            .await
            .map_err(|err| HrError::from_write(err, &email))?
            .ok_or(HrError::NotFound(Lookup::Id(id)))?;
        info!("employee updated");
        Ok(updated)
    }

    /// Idempotent; deleting an unknown id succeeds.
    #[instrument(name = "hr.employee.delete", skip(self))]
    pub async fn delete(&self, id: i32) -> HrResult<()> {
        self.gateway.delete_by_id(id).await?;
        info!("employee deleted");
        Ok(())
    }
}
