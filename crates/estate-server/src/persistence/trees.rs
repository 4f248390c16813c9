//! Tree persistence operations.

use anyhow::Result;
use estate_core::Tree;
use sqlx::SqlitePool;

use super::estates::parse_timestamp;

const TREE_COLUMNS: &str = "id, estate_id, x, y, height, created_at, updated_at";

/// Insert a new tree. Fails on a UNIQUE violation if the plot is taken.
pub async fn insert_tree(pool: &SqlitePool, tree: &Tree) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO trees (id, estate_id, x, y, height, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&tree.id)
    .bind(&tree.estate_id)
    .bind(i64::from(tree.x))
    .bind(i64::from(tree.y))
    .bind(i64::from(tree.height))
    .bind(tree.created_at.to_rfc3339())
    .bind(tree.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load the tree planted on a given plot, if any.
pub async fn get_tree_by_plot(
    pool: &SqlitePool,
    estate_id: &str,
    x: u32,
    y: u32,
) -> Result<Option<Tree>> {
    let query = format!(
        "SELECT {} FROM trees WHERE estate_id = ?1 AND x = ?2 AND y = ?3",
        TREE_COLUMNS
    );
    let row = sqlx::query_as::<_, TreeRow>(&query)
        .bind(estate_id)
        .bind(i64::from(x))
        .bind(i64::from(y))
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Into::into))
}

/// Load all trees of an estate.
pub async fn list_trees_by_estate(pool: &SqlitePool, estate_id: &str) -> Result<Vec<Tree>> {
    let query = format!("SELECT {} FROM trees WHERE estate_id = ?1", TREE_COLUMNS);
    let rows = sqlx::query_as::<_, TreeRow>(&query)
        .bind(estate_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct TreeRow {
    id: String,
    estate_id: String,
    x: i64,
    y: i64,
    height: i64,
    created_at: String,
    updated_at: String,
}

fn to_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

impl From<TreeRow> for Tree {
    fn from(row: TreeRow) -> Self {
        Tree {
            id: row.id,
            estate_id: row.estate_id,
            x: to_u32(row.x),
            y: to_u32(row.y),
            height: to_u32(row.height),
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        }
    }
}
