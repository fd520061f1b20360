use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

impl Group {
    pub async fn all<'e, E>(executor: E) -> sqlx::Result<Vec<Group>>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Group>("SELECT id, name FROM inventory_groups ORDER BY id")
            .fetch_all(executor)
            .await
    }

    pub async fn find<'e, E>(executor: E, id: i64) -> sqlx::Result<Option<Group>>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Group>("SELECT id, name FROM inventory_groups WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Returns the id of the new group.
    pub async fn insert<'e, E>(executor: E, name: &str) -> sqlx::Result<i64>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("INSERT INTO inventory_groups (name) VALUES (?)")
            .bind(name)
            .execute(executor)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Returns false when no group has this id.
    pub async fn rename<'e, E>(executor: E, id: i64, name: &str) -> sqlx::Result<bool>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("UPDATE inventory_groups SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Models and their items go with the group (ON DELETE CASCADE).
    pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<bool>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM inventory_groups WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
