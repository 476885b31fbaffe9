//! PostgreSQL attribute repository implementation
//!
//! Tags and ingredients share one table layout, so a single generic
//! repository serves both, selecting the table from the attribute kind.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::attribute::{AttributeRepository, RecipeAttribute};
use crate::domain::id::EntityId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of AttributeRepository
#[derive(Debug, Clone)]
pub struct PostgresAttributeRepository<A: RecipeAttribute> {
    pool: PgPool,
    _marker: PhantomData<fn() -> A>,
}

impl<A: RecipeAttribute> PostgresAttributeRepository<A> {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    fn table() -> &'static str {
        A::KIND.table()
    }

    fn storage_error(action: &str, error: sqlx::Error) -> DomainError {
        DomainError::storage(format!(
            "Failed to {} {}: {}",
            action,
            A::KIND.label().to_lowercase(),
            error
        ))
    }
}

#[async_trait]
impl<A: RecipeAttribute> AttributeRepository<A> for PostgresAttributeRepository<A> {
    async fn get(&self, id: &A::Id) -> Result<Option<A>, DomainError> {
        let sql = format!(
            "SELECT id, user_id, name, created_at FROM {} WHERE id = $1",
            Self::table()
        );

        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("get", e))?;

        row.as_ref().map(row_to_attribute::<A>).transpose()
    }

    async fn create(&self, attribute: A) -> Result<A, DomainError> {
        let sql = format!(
            "INSERT INTO {} (id, user_id, name, created_at) VALUES ($1, $2, $3, $4)",
            Self::table()
        );

        sqlx::query(&sql)
            .bind(attribute.id().as_uuid())
            .bind(attribute.user_id().as_uuid())
            .bind(attribute.name())
            .bind(attribute.created_at())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("create", e))?;

        Ok(attribute)
    }

    async fn update(&self, attribute: &A) -> Result<A, DomainError> {
        let sql = format!("UPDATE {} SET name = $2 WHERE id = $1", Self::table());

        let result = sqlx::query(&sql)
            .bind(attribute.id().as_uuid())
            .bind(attribute.name())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "{} '{}' not found",
                A::KIND,
                attribute.id()
            )));
        }

        Ok(attribute.clone())
    }

    async fn delete(&self, id: &A::Id) -> Result<bool, DomainError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", Self::table());

        let result = sqlx::query(&sql)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<A>, DomainError> {
        let sql = format!(
            "SELECT id, user_id, name, created_at FROM {} WHERE user_id = $1 ORDER BY name DESC",
            Self::table()
        );

        let rows = sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::storage_error("list", e))?;

        rows.iter().map(row_to_attribute::<A>).collect()
    }

    async fn get_many_for_user(
        &self,
        user_id: &UserId,
        ids: &[A::Id],
    ) -> Result<Vec<A>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, user_id, name, created_at FROM {} WHERE user_id = $1 AND id = ANY($2)",
            Self::table()
        );
        let uuids: Vec<Uuid> = ids.iter().map(EntityId::as_uuid).collect();

        let rows = sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::storage_error("get", e))?;

        rows.iter().map(row_to_attribute::<A>).collect()
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let sql = format!("DELETE FROM {} WHERE user_id = $1", Self::table());

        let result = sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("delete", e))?;

        Ok(result.rows_affected() as usize)
    }
}

fn row_to_attribute<A: RecipeAttribute>(row: &PgRow) -> Result<A, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Invalid {} row: {}", A::KIND, e));

    let id: Uuid = row.try_get("id").map_err(read)?;
    let user_id: Uuid = row.try_get("user_id").map_err(read)?;
    let name: String = row.try_get("name").map_err(read)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read)?;

    Ok(A::restore(
        <A::Id as EntityId>::from_uuid(id),
        UserId::from_uuid(user_id),
        name,
        created_at,
    ))
}
