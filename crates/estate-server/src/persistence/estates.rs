//! Estate persistence operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use estate_core::Estate;
use sqlx::SqlitePool;

/// Insert a new estate.
pub async fn insert_estate(pool: &SqlitePool, estate: &Estate) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO estates (id, length, width, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&estate.id)
    .bind(i64::from(estate.length))
    .bind(i64::from(estate.width))
    .bind(estate.created_at.to_rfc3339())
    .bind(estate.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load one estate by id.
pub async fn get_estate(pool: &SqlitePool, id: &str) -> Result<Option<Estate>> {
    let row = sqlx::query_as::<_, EstateRow>(
        "SELECT id, length, width, created_at, updated_at FROM estates WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Into::into))
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct EstateRow {
    id: String,
    length: i64,
    width: i64,
    created_at: String,
    updated_at: String,
}

pub(crate) fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl From<EstateRow> for Estate {
    fn from(row: EstateRow) -> Self {
        Estate {
            id: row.id,
            length: row.length.clamp(0, i64::from(u32::MAX)) as u32,
            width: row.width.clamp(0, i64::from(u32::MAX)) as u32,
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        }
    }
}
