use async_trait::async_trait;
use entity::{EmployeeFields, employees};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, IntoActiveModel};
use uuid::Uuid;

use crate::{DbError, DbPool, DbResult};

pub type EmployeeRecord = employees::Model;

/// Persistence contract for employee documents.
///
/// Absence is reported as `Ok(None)`; malformed ids and backend failures are
/// errors.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn create(&self, fields: EmployeeFields) -> DbResult<EmployeeRecord>;

    async fn find_all(&self) -> DbResult<Vec<EmployeeRecord>>;

    async fn find_by_id(&self, id: &str) -> DbResult<Option<EmployeeRecord>>;

    /// Replace every business field of the record at `id`.
    async fn replace_by_id(
        &self,
        id: &str,
        fields: EmployeeFields,
    ) -> DbResult<Option<EmployeeRecord>>;

    /// Remove the record at `id`, returning what was removed.
    async fn delete_by_id(&self, id: &str) -> DbResult<Option<EmployeeRecord>>;
}

#[derive(Clone, Debug)]
pub struct SeaOrmEmployeeStore {
    pool: DbPool,
}

impl SeaOrmEmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_id(id: &str) -> DbResult<Uuid> {
    Uuid::parse_str(id).map_err(|source| DbError::InvalidId {
        id: id.to_string(),
        source,
    })
}

#[async_trait]
impl EmployeeStore for SeaOrmEmployeeStore {
    async fn create(&self, fields: EmployeeFields) -> DbResult<EmployeeRecord> {
        let record = fields
            .into_new_model(Uuid::new_v4())
            .insert(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_all(&self) -> DbResult<Vec<EmployeeRecord>> {
        Ok(employees::Entity::find().all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: &str) -> DbResult<Option<EmployeeRecord>> {
        let id = parse_id(id)?;
        Ok(employees::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn replace_by_id(
        &self,
        id: &str,
        fields: EmployeeFields,
    ) -> DbResult<Option<EmployeeRecord>> {
        let id = parse_id(id)?;
        let Some(existing) = employees::Entity::find_by_id(id).one(&self.pool).await? else {
            return Ok(None);
        };
        let mut active = existing.into_active_model();
        fields.apply_to(&mut active);
        match active.update(&self.pool).await {
            Ok(updated) => Ok(Some(updated)),
            // Deleted between lookup and write.
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_by_id(&self, id: &str) -> DbResult<Option<EmployeeRecord>> {
        let id = parse_id(id)?;
        let Some(existing) = employees::Entity::find_by_id(id).one(&self.pool).await? else {
            return Ok(None);
        };
        let result = employees::Entity::delete_by_id(id).exec(&self.pool).await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(existing))
    }
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};

    use super::*;
    use crate::{DatabaseSettings, connect};

    async fn sqlite_store() -> SeaOrmEmployeeStore {
        let pool = connect(&DatabaseSettings::new("sqlite::memory:"))
            .await
            .expect("sqlite pool");
        Migrator::up(&pool, None).await.expect("migrations");
        SeaOrmEmployeeStore::new(pool)
    }

    #[tokio::test]
    async fn create_assigns_id_and_persists_fields() {
        let store = sqlite_store().await;
        let created = store
            .create(EmployeeFields::new("Ana", "Engineer", 5000.0, false))
            .await
            .unwrap();

        assert_eq!(created.name.as_deref(), Some("Ana"));
        assert_eq!(created.terminated, Some(false));

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![created.clone()]);

        let found = store.find_by_id(&created.id.to_string()).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn duplicate_names_are_separate_records() {
        let store = sqlite_store().await;
        let first = store
            .create(EmployeeFields::new("Ana", "Engineer", 5000.0, false))
            .await
            .unwrap();
        let second = store
            .create(EmployeeFields::new("Ana", "Engineer", 5000.0, false))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_id_is_absent_not_an_error() {
        let store = sqlite_store().await;
        let id = Uuid::new_v4().to_string();

        assert!(store.find_by_id(&id).await.unwrap().is_none());
        assert!(
            store
                .replace_by_id(&id, EmployeeFields::default())
                .await
                .unwrap()
                .is_none()
        );
        assert!(store.delete_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_id_is_an_error() {
        let store = sqlite_store().await;
        let err = store.find_by_id("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, DbError::InvalidId { ref id, .. } if id == "not-a-uuid"));
        assert!(store.delete_by_id("42").await.is_err());
    }

    #[tokio::test]
    async fn replace_overwrites_fields_and_keeps_id() {
        let store = sqlite_store().await;
        let created = store
            .create(EmployeeFields::new("Ana", "Engineer", 5000.0, false))
            .await
            .unwrap();
        let id = created.id.to_string();

        let updated = store
            .replace_by_id(
                &id,
                EmployeeFields {
                    role: Some("Lead".into()),
                    terminated: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("record exists");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, None);
        assert_eq!(updated.role.as_deref(), Some("Lead"));
        assert_eq!(updated.salary, None);
        assert_eq!(updated.terminated, Some(true));
        assert_eq!(store.find_by_id(&id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn delete_returns_removed_record() {
        let store = sqlite_store().await;
        let created = store
            .create(EmployeeFields::new("Ana", "Engineer", 5000.0, false))
            .await
            .unwrap();
        let id = created.id.to_string();

        assert_eq!(store.delete_by_id(&id).await.unwrap(), Some(created));
        assert!(store.find_by_id(&id).await.unwrap().is_none());
        assert!(store.delete_by_id(&id).await.unwrap().is_none());
    }
}
