//! PostgreSQL recipe repository implementation

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{postgres::PgRow, PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::domain::attribute::AttributeKind;
use crate::domain::id::EntityId;
use crate::domain::ingredient::IngredientId;
use crate::domain::recipe::{Recipe, RecipeFilter, RecipeId, RecipeRepository};
use crate::domain::tag::TagId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

const RECIPE_COLUMNS: &str =
    "id, user_id, title, time_minutes, price, image, created_at, updated_at";

/// PostgreSQL implementation of RecipeRepository
///
/// Tag and ingredient links live in the `recipe_tags` and
/// `recipe_ingredients` join tables and are written in the same transaction
/// as the recipe row.
#[derive(Debug, Clone)]
pub struct PostgresRecipeRepository {
    pool: PgPool,
}

impl PostgresRecipeRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach link rows to freshly loaded recipe rows
    async fn hydrate(&self, rows: Vec<PgRow>) -> Result<Vec<Recipe>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows
            .iter()
            .map(|row| row.try_get("id"))
            .collect::<Result<_, _>>()
            .map_err(|e| storage_error("read", e))?;

        let mut tags = self.load_links(AttributeKind::Tag, &ids).await?;
        let mut ingredients = self.load_links(AttributeKind::Ingredient, &ids).await?;

        rows.iter()
            .map(|row| {
                let recipe = row_to_recipe(row)?;
                let id = recipe.id().as_uuid();

                let tag_ids = tags
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(TagId::from_uuid)
                    .collect();
                let ingredient_ids = ingredients
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(IngredientId::from_uuid)
                    .collect();

                Ok(recipe.with_tags(tag_ids).with_ingredients(ingredient_ids))
            })
            .collect()
    }

    async fn load_links(
        &self,
        kind: AttributeKind,
        recipe_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, DomainError> {
        let sql = format!(
            "SELECT recipe_id, {column} AS attribute_id FROM {table} \
             WHERE recipe_id = ANY($1) ORDER BY recipe_id, position",
            column = kind.join_column(),
            table = kind.join_table(),
        );

        let rows = sqlx::query(&sql)
            .bind(recipe_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("load links of", e))?;

        let mut links: HashMap<Uuid, Vec<Uuid>> = HashMap::new();

        for row in rows {
            let recipe_id: Uuid = row.try_get("recipe_id").map_err(|e| storage_error("read", e))?;
            let attribute_id: Uuid = row
                .try_get("attribute_id")
                .map_err(|e| storage_error("read", e))?;
            links.entry(recipe_id).or_default().push(attribute_id);
        }

        Ok(links)
    }
}

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
    async fn get(&self, id: &RecipeId) -> Result<Option<Recipe>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM recipes WHERE id = $1", RECIPE_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("get", e))?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, recipe: Recipe) -> Result<Recipe, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| storage_error("create", e))?;

        sqlx::query(
            r#"
            INSERT INTO recipes (id, user_id, title, time_minutes, price, image,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(recipe.id().as_uuid())
        .bind(recipe.user_id().as_uuid())
        .bind(recipe.title())
        .bind(recipe.time_minutes())
        .bind(recipe.price())
        .bind(recipe.image())
        .bind(recipe.created_at())
        .bind(recipe.updated_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("create", e))?;

        write_links(&mut tx, &recipe).await?;

        tx.commit().await.map_err(|e| storage_error("create", e))?;

        Ok(recipe)
    }

    async fn update(&self, recipe: &Recipe) -> Result<Recipe, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| storage_error("update", e))?;

        let result = sqlx::query(
            r#"
            UPDATE recipes
            SET title = $2, time_minutes = $3, price = $4, image = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(recipe.id().as_uuid())
        .bind(recipe.title())
        .bind(recipe.time_minutes())
        .bind(recipe.price())
        .bind(recipe.image())
        .bind(recipe.updated_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Recipe '{}' not found",
                recipe.id()
            )));
        }

        for kind in [AttributeKind::Tag, AttributeKind::Ingredient] {
            sqlx::query(&format!("DELETE FROM {} WHERE recipe_id = $1", kind.join_table()))
                .bind(recipe.id().as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| storage_error("update", e))?;
        }

        write_links(&mut tx, recipe).await?;

        tx.commit().await.map_err(|e| storage_error("update", e))?;

        Ok(recipe.clone())
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, DomainError> {
        let tags: Option<Vec<Uuid>> = (!filter.tags.is_empty())
            .then(|| filter.tags.iter().map(EntityId::as_uuid).collect());
        let ingredients: Option<Vec<Uuid>> = (!filter.ingredients.is_empty())
            .then(|| filter.ingredients.iter().map(EntityId::as_uuid).collect());

        let sql = format!(
            r#"
            SELECT {columns} FROM recipes r
            WHERE r.user_id = $1
              AND ($2::uuid[] IS NULL OR EXISTS (
                    SELECT 1 FROM recipe_tags rt
                    WHERE rt.recipe_id = r.id AND rt.tag_id = ANY($2)))
              AND ($3::uuid[] IS NULL OR EXISTS (
                    SELECT 1 FROM recipe_ingredients ri
                    WHERE ri.recipe_id = r.id AND ri.ingredient_id = ANY($3)))
            ORDER BY r.created_at DESC, r.id DESC
            "#,
            columns = RECIPE_COLUMNS
                .split(", ")
                .map(|c| format!("r.{}", c))
                .collect::<Vec<_>>()
                .join(", "),
        );

        let rows = sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .bind(tags)
            .bind(ingredients)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list", e))?;

        self.hydrate(rows).await
    }

    async fn assigned_attribute_ids(
        &self,
        user_id: &UserId,
        kind: AttributeKind,
    ) -> Result<Vec<Uuid>, DomainError> {
        let sql = format!(
            "SELECT DISTINCT j.{column} FROM {table} j \
             JOIN recipes r ON r.id = j.recipe_id WHERE r.user_id = $1",
            column = kind.join_column(),
            table = kind.join_table(),
        );

        sqlx::query_scalar(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list assigned attributes of", e))
    }

    async fn detach_attribute(&self, kind: AttributeKind, id: Uuid) -> Result<usize, DomainError> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = $1",
            kind.join_table(),
            kind.join_column()
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("detach attribute from", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM recipes WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete", e))?;

        Ok(result.rows_affected() as usize)
    }
}

async fn write_links(conn: &mut PgConnection, recipe: &Recipe) -> Result<(), DomainError> {
    for kind in [AttributeKind::Tag, AttributeKind::Ingredient] {
        let sql = format!(
            "INSERT INTO {} (recipe_id, {}, position) VALUES ($1, $2, $3)",
            kind.join_table(),
            kind.join_column()
        );

        for (position, attribute_id) in recipe.attribute_ids(kind).into_iter().enumerate() {
            sqlx::query(&sql)
                .bind(recipe.id().as_uuid())
                .bind(attribute_id)
                .bind(position as i32)
                .execute(&mut *conn)
                .await
                .map_err(|e| storage_error("link", e))?;
        }
    }

    Ok(())
}

fn storage_error(action: &str, error: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Failed to {} recipe: {}", action, error))
}

fn row_to_recipe(row: &PgRow) -> Result<Recipe, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Invalid recipe row: {}", e));

    let id: Uuid = row.try_get("id").map_err(read)?;
    let user_id: Uuid = row.try_get("user_id").map_err(read)?;
    let title: String = row.try_get("title").map_err(read)?;
    let time_minutes: i32 = row.try_get("time_minutes").map_err(read)?;
    let price: Decimal = row.try_get("price").map_err(read)?;
    let image: Option<String> = row.try_get("image").map_err(read)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(read)?;

    Ok(
        Recipe::new(UserId::from_uuid(user_id), title, time_minutes, price)
            .with_image(image)
            .with_identity(RecipeId::from_uuid(id), created_at, updated_at),
    )
}
