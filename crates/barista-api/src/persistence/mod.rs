//! SQLite-backed drink storage

pub mod entities;

pub use entities::{Drink, DrinkSummary, RecipePart, RecipePartSummary};

use crate::error::{ApiError, Result};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Drink catalog store over a SQLite connection pool
#[derive(Debug, Clone)]
pub struct DrinkStore {
    pool: SqlitePool,
}

impl DrinkStore {
    /// Open (creating if necessary) the database at `database_url` and run
    /// migrations.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let url = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite:{database_url}")
        };

        // rwc mode so a missing database file is created on first boot
        let url = if url.contains('?') || url.contains(":memory:") {
            url
        } else {
            format!("{url}?mode=rwc")
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&url)
            .await?;

        // SQLite concurrency settings
        sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
        sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;
        sqlx::query("PRAGMA synchronous = NORMAL").execute(&pool).await?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// In-memory store for tests.
    ///
    /// Single connection: each pooled in-memory connection would otherwise
    /// see its own empty database.
    pub async fn for_testing() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS drinks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL UNIQUE,
                recipe TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Drop and recreate the schema.
    pub async fn reset(&self) -> Result<()> {
        info!("resetting drink schema");
        sqlx::query("DROP TABLE IF EXISTS drinks")
            .execute(&self.pool)
            .await?;
        self.run_migrations().await
    }

    /// All drinks, ordered by id.
    pub async fn list(&self) -> Result<Vec<Drink>> {
        let rows = sqlx::query("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_drink).collect()
    }

    /// A single drink by id.
    pub async fn get(&self, id: i64) -> Result<Option<Drink>> {
        let row = sqlx::query("SELECT id, title, recipe FROM drinks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_drink).transpose()
    }

    /// Insert a new drink. Titles are unique; a duplicate is an
    /// unprocessable request, not a server fault.
    pub async fn create(&self, title: &str, recipe: &[RecipePart]) -> Result<Drink> {
        let recipe_json = serde_json::to_string(recipe)?;

        let result = sqlx::query("INSERT INTO drinks (title, recipe) VALUES (?, ?)")
            .bind(title)
            .bind(&recipe_json)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(Drink {
                id: done.last_insert_rowid(),
                title: title.to_string(),
                recipe: recipe.to_vec(),
            }),
            Err(e) if is_unique_violation(&e) => Err(ApiError::Unprocessable {
                message: format!("a drink titled '{title}' already exists"),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Partially update a drink. Only the supplied fields change. Returns
    /// `None` when no drink has this id.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[RecipePart]>,
    ) -> Result<Option<Drink>> {
        let Some(mut drink) = self.get(id).await? else {
            return Ok(None);
        };

        if let Some(title) = title {
            drink.title = title.to_string();
        }
        if let Some(recipe) = recipe {
            drink.recipe = recipe.to_vec();
        }

        let recipe_json = serde_json::to_string(&drink.recipe)?;
        let result = sqlx::query("UPDATE drinks SET title = ?, recipe = ? WHERE id = ?")
            .bind(&drink.title)
            .bind(&recipe_json)
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(Some(drink)),
            Err(e) if is_unique_violation(&e) => Err(ApiError::Unprocessable {
                message: format!("a drink titled '{}' already exists", drink.title),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a drink by id. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let done = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }
}

fn row_to_drink(row: &SqliteRow) -> Result<Drink> {
    let recipe_json: String = row.get("recipe");
    let recipe = serde_json::from_str(&recipe_json)?;

    Ok(Drink {
        id: row.get("id"),
        title: row.get("title"),
        recipe,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.message().contains("UNIQUE constraint failed"))
}
