//! Персистентность макетов: канонические записи в Postgres (JSONB).
//! Ядро генерации с этим слоем не пересекается — оно лишь поставляет
//! полностью нормализованные записи (layout::editor).

use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::models::{LayoutSummary, SeatingLayout};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ошибка базы данных: {0}")]
    Database(#[from] sqlx::Error),
    #[error("ошибка сериализации макета: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("вместимость {0} не помещается в колонку BIGINT")]
    CapacityOverflow(u64),
}

// Вместимость хранится в BIGINT; проверяемая конверсия вместо усечения
fn capacity_column(capacity: u64) -> Result<i64, StoreError> {
    i64::try_from(capacity).map_err(|_| StoreError::CapacityOverflow(capacity))
}

#[derive(Clone)]
pub struct LayoutStore {
    pub pool: Pool<Postgres>,
}

impl LayoutStore {
    pub async fn new(database_url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Ok(LayoutStore { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("./src/migrations").run(&self.pool).await?;
        info!("Migrations completed");
        Ok(())
    }

    /// Сохраняет новую каноническую запись; id детерминированный, поэтому
    /// повторное сохранение того же макета — это upsert, а не дубликат.
    pub async fn create(&self, layout: &SeatingLayout) -> Result<String, StoreError> {
        let data = serde_json::to_value(layout)?;
        let capacity = capacity_column(layout.capacity)?;
        sqlx::query(
            r#"
            INSERT INTO layouts (id, venue_id, name, layout_type, capacity, data)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                layout_type = EXCLUDED.layout_type,
                capacity = EXCLUDED.capacity,
                data = EXCLUDED.data,
                updated_at = NOW()
            "#,
        )
        .bind(&layout.id)
        .bind(&layout.venue_id)
        .bind(&layout.name)
        .bind(layout.layout_type.as_str())
        .bind(capacity)
        .bind(&data)
        .execute(&self.pool)
        .await?;

        Ok(layout.id.clone())
    }

    /// Замена макета целиком (частичной мутации мест нет по контракту).
    pub async fn update(&self, id: &str, layout: &SeatingLayout) -> Result<bool, StoreError> {
        let data = serde_json::to_value(layout)?;
        let capacity = capacity_column(layout.capacity)?;
        let result = sqlx::query(
            r#"
            UPDATE layouts
            SET name = $2, layout_type = $3, capacity = $4, data = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&layout.name)
        .bind(layout.layout_type.as_str())
        .bind(capacity)
        .bind(&data)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn load(&self, id: &str) -> Result<Option<SeatingLayout>, StoreError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT data FROM layouts WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_value(data)?)),
            None => Ok(None),
        }
    }

    pub async fn list_for_venue(&self, venue_id: &str) -> Result<Vec<LayoutSummary>, StoreError> {
        let summaries = sqlx::query_as::<_, LayoutSummary>(
            r#"
            SELECT id, venue_id, name, layout_type, capacity, updated_at
            FROM layouts
            WHERE venue_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Удаление принадлежит слою персистентности; ядро макеты не удаляет.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM layouts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_fits_bigint_without_truncation() {
        assert_eq!(capacity_column(0).unwrap(), 0);
        assert_eq!(capacity_column(500).unwrap(), 500);
        assert_eq!(
            capacity_column(u32::MAX as u64 + 1).unwrap(),
            u32::MAX as i64 + 1
        );
        assert_eq!(capacity_column(i64::MAX as u64).unwrap(), i64::MAX);
    }

    #[test]
    fn capacity_beyond_bigint_is_an_error() {
        assert!(matches!(
            capacity_column(i64::MAX as u64 + 1),
            Err(StoreError::CapacityOverflow(_))
        ));
    }
}
