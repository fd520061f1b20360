use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VehicleModel {
    pub id: i64,
    pub name: String,
    pub group_id: i64,
}

impl VehicleModel {
    pub async fn all<'e, E>(executor: E) -> sqlx::Result<Vec<VehicleModel>>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, VehicleModel>(
            "SELECT id, name, group_id FROM vehicle_models ORDER BY id",
        )
        .fetch_all(executor)
        .await
    }

    pub async fn find<'e, E>(executor: E, id: i64) -> sqlx::Result<Option<VehicleModel>>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, VehicleModel>(
            "SELECT id, name, group_id FROM vehicle_models WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    pub async fn insert<'e, E>(executor: E, name: &str, group_id: i64) -> sqlx::Result<i64>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("INSERT INTO vehicle_models (name, group_id) VALUES (?, ?)")
            .bind(name)
            .bind(group_id)
            .execute(executor)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Renames the model, moving it to `group_id` when one is given.
    pub async fn update<'e, E>(
        executor: E,
        id: i64,
        name: &str,
        group_id: Option<i64>,
    ) -> sqlx::Result<bool>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE vehicle_models SET name = ?, group_id = COALESCE(?, group_id) WHERE id = ?",
        )
        .bind(name)
        .bind(group_id)
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<bool>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM vehicle_models WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
