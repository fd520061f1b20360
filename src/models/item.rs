use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub qty: i64,
    pub min_qty: i64,
    pub model_id: i64,
}

/// The user-editable part of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub name: String,
    pub qty: i64,
    pub min_qty: i64,
}

/// An item below its minimum, with the names of the model and group it sits under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LowStockItem {
    pub id: i64,
    pub name: String,
    pub qty: i64,
    pub min_qty: i64,
    pub model_id: i64,
    pub model_name: String,
    pub group_id: i64,
    pub group_name: String,
}

impl Item {
    pub async fn all<'e, E>(executor: E) -> sqlx::Result<Vec<Item>>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Item>(
            "SELECT id, name, qty, min_qty, model_id FROM items ORDER BY id",
        )
        .fetch_all(executor)
        .await
    }

    pub async fn find<'e, E>(executor: E, id: i64) -> sqlx::Result<Option<Item>>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Item>(
            "SELECT id, name, qty, min_qty, model_id FROM items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    pub async fn insert<'e, E>(executor: E, fields: &ItemFields, model_id: i64) -> sqlx::Result<i64>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            "INSERT INTO items (name, qty, min_qty, model_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&fields.name)
        .bind(fields.qty)
        .bind(fields.min_qty)
        .bind(model_id)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Replaces name, quantity and threshold. The item stays in its model.
    pub async fn update<'e, E>(executor: E, id: i64, fields: &ItemFields) -> sqlx::Result<bool>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("UPDATE items SET name = ?, qty = ?, min_qty = ? WHERE id = ?")
            .bind(&fields.name)
            .bind(fields.qty)
            .bind(fields.min_qty)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Adds `delta` to the quantity of the first item called `name` in the model,
    /// never going below zero or above `i32::MAX`. Returns the updated row, or `None`
    /// if there is no such item.
    pub async fn adjust_by_name<'e, E>(
        executor: E,
        model_id: i64,
        name: &str,
        delta: i64,
    ) -> sqlx::Result<Option<Item>>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Item>(
            "
            UPDATE items
            SET qty = MIN(2147483647, MAX(0, qty + ?))
            WHERE id = (
                SELECT id FROM items
                WHERE name = ? AND model_id = ?
                ORDER BY id
                LIMIT 1
            )
            RETURNING id, name, qty, min_qty, model_id
            ",
        )
        .bind(delta)
        .bind(name)
        .bind(model_id)
        .fetch_optional(executor)
        .await
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> sqlx::Result<bool>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn low_stock<'e, E>(executor: E) -> sqlx::Result<Vec<LowStockItem>>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, LowStockItem>(
            "
            SELECT i.id, i.name, i.qty, i.min_qty, i.model_id,
                   m.name AS model_name, g.id AS group_id, g.name AS group_name
            FROM items i
            JOIN vehicle_models m ON i.model_id = m.id
            JOIN inventory_groups g ON m.group_id = g.id
            WHERE i.qty < i.min_qty
            ORDER BY g.id, m.id, i.id
            ",
        )
        .fetch_all(executor)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_pool;
    use crate::models::group::Group;
    use crate::models::vehicle_model::VehicleModel;
    use sqlx::SqlitePool;

    fn fields(name: &str, qty: i64, min_qty: i64) -> ItemFields {
        ItemFields { name: name.into(), qty, min_qty }
    }

    async fn seeded_model() -> (SqlitePool, i64) {
        let pool = init_pool("sqlite::memory:", 1).await.unwrap();
        let group = Group::insert(&pool, "Trucks").await.unwrap();
        let model = VehicleModel::insert(&pool, "F-150", group).await.unwrap();
        (pool, model)
    }

    #[actix_web::test]
    async fn adjust_clamps_at_zero() {
        let (pool, model) = seeded_model().await;
        Item::insert(&pool, &fields("Wiper", 3, 1), model).await.unwrap();

        let item = Item::adjust_by_name(&pool, model, "Wiper", 5).await.unwrap().unwrap();
        assert_eq!(item.qty, 8);

        let item = Item::adjust_by_name(&pool, model, "Wiper", -20).await.unwrap().unwrap();
        assert_eq!(item.qty, 0);
    }

    #[actix_web::test]
    async fn adjust_saturates_at_32_bit_max() {
        let (pool, model) = seeded_model().await;
        let max = i32::MAX as i64;
        Item::insert(&pool, &fields("Wiper", max - 1, 0), model).await.unwrap();

        let item = Item::adjust_by_name(&pool, model, "Wiper", max).await.unwrap().unwrap();
        assert_eq!(item.qty, max);

        // The row still decodes as an integer afterwards
        let items = Item::all(&pool).await.unwrap();
        assert_eq!(items[0].qty, max);
    }

    #[actix_web::test]
    async fn adjust_touches_only_first_match_in_model() {
        let (pool, model) = seeded_model().await;
        let other_model = VehicleModel::insert(&pool, "Ranger", 1).await.unwrap();
        let first = Item::insert(&pool, &fields("Bulb", 1, 0), model).await.unwrap();
        let second = Item::insert(&pool, &fields("Bulb", 1, 0), model).await.unwrap();
        let elsewhere = Item::insert(&pool, &fields("Bulb", 1, 0), other_model).await.unwrap();

        let item = Item::adjust_by_name(&pool, model, "Bulb", 2).await.unwrap().unwrap();
        assert_eq!(item.id, first);

        assert_eq!(Item::find(&pool, second).await.unwrap().unwrap().qty, 1);
        assert_eq!(Item::find(&pool, elsewhere).await.unwrap().unwrap().qty, 1);
    }

    #[actix_web::test]
    async fn adjust_unknown_item_is_none() {
        let (pool, model) = seeded_model().await;
        let result = Item::adjust_by_name(&pool, model, "Nothing", 1).await.unwrap();
        assert!(result.is_none());
    }

    #[actix_web::test]
    async fn update_replaces_fields() {
        let (pool, model) = seeded_model().await;
        let id = Item::insert(&pool, &fields("Belt", 2, 1), model).await.unwrap();

        assert!(Item::update(&pool, id, &fields("V-Belt", 9, 4)).await.unwrap());
        let item = Item::find(&pool, id).await.unwrap().unwrap();
        assert_eq!(
            item,
            Item { id, name: "V-Belt".into(), qty: 9, min_qty: 4, model_id: model }
        );
        assert!(!Item::update(&pool, id + 100, &fields("x", 0, 0)).await.unwrap());
    }

    #[actix_web::test]
    async fn low_stock_lists_items_under_threshold() {
        let (pool, model) = seeded_model().await;
        let low = Item::insert(&pool, &fields("Brake pad", 1, 4), model).await.unwrap();
        Item::insert(&pool, &fields("Fuse", 4, 4), model).await.unwrap();
        Item::insert(&pool, &fields("Spark plug", 10, 2), model).await.unwrap();

        let items = Item::low_stock(&pool).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, low);
        assert_eq!(items[0].model_name, "F-150");
        assert_eq!(items[0].group_name, "Trucks");
    }
}
