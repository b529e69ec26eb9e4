//! Persistence for children, stickers and session records

pub mod memory;

use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

pub use memory::MemoryStore;

/// Storage used by the API (allows an in-memory stand-in for tests)
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// All children, oldest first
    async fn list_children(&self) -> Result<Vec<Child>>;

    async fn get_child(&self, id: Uuid) -> Result<Option<Child>>;

    async fn insert_child(&self, child: &Child) -> Result<()>;

    /// Overwrite a child's profile and settings; false if it does not exist
    async fn update_child(&self, child: &Child) -> Result<bool>;

    /// Delete a child with its stickers and session records
    async fn delete_child(&self, id: Uuid) -> Result<bool>;

    /// Stickers of a child, newest first
    async fn list_stickers(&self, child_id: Uuid) -> Result<Vec<Sticker>>;

    /// Session records of a child, oldest first
    async fn list_sessions(&self, child_id: Uuid) -> Result<Vec<SessionRecord>>;

    /// Persist the outcome of one answer: new child state, the sticker it
    /// earned (if any) and its session record. All or nothing.
    async fn commit_answer(
        &self,
        child: &Child,
        sticker: Option<&Sticker>,
        record: &SessionRecord,
    ) -> Result<()>;
}

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Store for Database {
    async fn list_children(&self) -> Result<Vec<Child>> {
        let rows = sqlx::query_as::<_, DbChild>(
            r#"
            SELECT id, name, streak, total_stickers, progress, settings,
                   claimed_thresholds, created_at, updated_at
            FROM children
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbChild::into_child).collect())
    }

    async fn get_child(&self, id: Uuid) -> Result<Option<Child>> {
        let row = sqlx::query_as::<_, DbChild>(
            r#"
            SELECT id, name, streak, total_stickers, progress, settings,
                   claimed_thresholds, created_at, updated_at
            FROM children
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DbChild::into_child))
    }

    async fn insert_child(&self, child: &Child) -> Result<()> {
        let row = DbChild::from_child(child);
        sqlx::query(
            r#"
            INSERT INTO children (id, name, streak, total_stickers, progress, settings,
                                  claimed_thresholds, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(row.streak)
        .bind(row.total_stickers)
        .bind(&row.progress)
        .bind(&row.settings)
        .bind(&row.claimed_thresholds)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_child(&self, child: &Child) -> Result<bool> {
        let row = DbChild::from_child(child);
        let result = sqlx::query(
            r#"
            UPDATE children
            SET name = $2, settings = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.settings)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_child(&self, id: Uuid) -> Result<bool> {
        // stickers and game_sessions cascade
        let result = sqlx::query("DELETE FROM children WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_stickers(&self, child_id: Uuid) -> Result<Vec<Sticker>> {
        let rows = sqlx::query_as::<_, DbSticker>(
            r#"
            SELECT id, child_id, streak_level, name, emoji, description, earned_at
            FROM stickers
            WHERE child_id = $1
            ORDER BY earned_at DESC
            "#,
        )
        .bind(child_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbSticker::into_sticker).collect())
    }

    async fn list_sessions(&self, child_id: Uuid) -> Result<Vec<SessionRecord>> {
        let rows = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT id, child_id, game_mode, grapheme, is_correct, response_time_ms, recorded_at
            FROM game_sessions
            WHERE child_id = $1
            ORDER BY recorded_at
            "#,
        )
        .bind(child_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn commit_answer(
        &self,
        child: &Child,
        sticker: Option<&Sticker>,
        record: &SessionRecord,
    ) -> Result<()> {
        let row = DbChild::from_child(child);
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE children
            SET streak = $2, total_stickers = $3, progress = $4,
                claimed_thresholds = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(row.id)
        .bind(row.streak)
        .bind(row.total_stickers)
        .bind(&row.progress)
        .bind(&row.claimed_thresholds)
        .bind(row.updated_at)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Child {}", child.id)));
        }

        if let Some(sticker) = sticker {
            sqlx::query(
                r#"
                INSERT INTO stickers (id, child_id, streak_level, name, emoji, description, earned_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(sticker.id)
            .bind(sticker.child_id)
            .bind(sticker.streak_level as i32)
            .bind(&sticker.name)
            .bind(&sticker.emoji)
            .bind(&sticker.description)
            .bind(sticker.earned_at)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO game_sessions (id, child_id, game_mode, grapheme, is_correct,
                                       response_time_ms, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(record.child_id)
        .bind(&record.game_mode)
        .bind(&record.grapheme)
        .bind(record.is_correct)
        .bind(record.response_time_ms)
        .bind(record.recorded_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
