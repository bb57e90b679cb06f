use async_trait::async_trait;
use entity::employee;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::{Employee, NewEmployee};

/// Row-level access to the `employee` table. Every call is a single
/// statement; nothing here spans a transaction.
#[async_trait]
pub trait EmployeeGateway: Send + Sync {
    async fn insert(&self, employee: NewEmployee) -> Result<Employee, DbErr>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DbErr>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DbErr>;

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Employee>, DbErr>;

    /// Rows in ascending id order.
    async fn find_all(&self) -> Result<Vec<Employee>, DbErr>;

    /// Replaces every column of the row keyed by `employee.id`. `None` when
    /// no such row exists.
    async fn update(&self, employee: Employee) -> Result<Option<Employee>, DbErr>;

    /// No-op when the row is absent.
    async fn delete_by_id(&self, id: i32) -> Result<(), DbErr>;
}

#[derive(Clone, Debug)]
pub struct SeaOrmEmployeeGateway {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeGateway {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeGateway for SeaOrmEmployeeGateway {
    async fn insert(&self, employee: NewEmployee) -> Result<Employee, DbErr> {
        let model = employee::ActiveModel {
            first_name: Set(employee.first_name),
            last_name: Set(employee.last_name),
            email: Set(employee.email),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await?;
        Ok(saved.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DbErr> {
        let found = employee::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DbErr> {
        let found = employee::Entity::find()
            .filter(employee::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Employee>, DbErr> {
        let rows = employee::Entity::find()
            .filter(employee::Column::FirstName.eq(first_name))
            .filter(employee::Column::LastName.eq(last_name))
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DbErr> {
        let rows = employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, employee: Employee) -> Result<Option<Employee>, DbErr> {
        let model = employee::ActiveModel {
            id: Unchanged(employee.id),
            first_name: Set(employee.first_name),
            last_name: Set(employee.last_name),
            email: Set(employee.email),
        };
        match model.update(&self.db).await {
            Ok(updated) => Ok(Some(updated.into())),
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), DbErr> {
        employee::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
