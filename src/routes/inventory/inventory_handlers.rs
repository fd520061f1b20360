use actix_web::{web, HttpResponse, Responder};
use log::info;
use sqlx::SqlitePool;

use super::inventory_models::{
    build_hierarchy, validate_name, AdjustRequest, GroupRequest, ItemRequest, LowStockEntry,
    ModelRequest, NodeKind, StatusResponse,
};
use crate::errors::InventoryError;
use crate::models::{group::Group, item::Item, vehicle_model::VehicleModel};

const INDEX_HTML: &str = include_str!("../../../static/index.html");

pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

// Full Group -> Model -> Item tree, read from one snapshot
pub async fn get_data(pool: web::Data<SqlitePool>) -> Result<HttpResponse, InventoryError> {
    let mut tx = pool.begin().await?;
    let groups = Group::all(&mut *tx).await?;
    let models = VehicleModel::all(&mut *tx).await?;
    let items = Item::all(&mut *tx).await?;
    tx.commit().await?;

    info!(
        "Serving inventory: {} groups, {} models, {} items",
        groups.len(),
        models.len(),
        items.len()
    );
    Ok(HttpResponse::Ok().json(build_hierarchy(groups, models, items)))
}

// Create a group, or rename it when an id is given
pub async fn upsert_group(
    pool: web::Data<SqlitePool>,
    request: web::Json<GroupRequest>,
) -> Result<HttpResponse, InventoryError> {
    let name = validate_name(&request.name)?;

    let id = match request.existing_id() {
        Some(id) => {
            if !Group::rename(pool.get_ref(), id, &name).await? {
                return Err(InventoryError::NotFound(format!("Group {}", id)));
            }
            info!("Renamed group {} to {}", id, name);
            id
        }
        None => {
            let id = Group::insert(pool.get_ref(), &name).await?;
            info!("Created group {} ({})", name, id);
            id
        }
    };

    Ok(HttpResponse::Ok().json(StatusResponse::success(id)))
}

// Create a vehicle model under a group, or rename / move an existing one
pub async fn upsert_model(
    pool: web::Data<SqlitePool>,
    request: web::Json<ModelRequest>,
) -> Result<HttpResponse, InventoryError> {
    let name = validate_name(&request.name)?;

    if let Some(group_id) = request.group_id {
        if Group::find(pool.get_ref(), group_id).await?.is_none() {
            return Err(InventoryError::NotFound(format!("Group {}", group_id)));
        }
    }

    let id = match request.existing_id() {
        Some(id) => {
            if !VehicleModel::update(pool.get_ref(), id, &name, request.group_id).await? {
                return Err(InventoryError::NotFound(format!("Vehicle model {}", id)));
            }
            info!("Updated vehicle model {} ({})", name, id);
            id
        }
        None => {
            let group_id = request
                .group_id
                .ok_or_else(|| InventoryError::BadRequest("group_id is required".into()))?;
            let id = VehicleModel::insert(pool.get_ref(), &name, group_id).await?;
            info!("Created vehicle model {} ({}) in group {}", name, id, group_id);
            id
        }
    };

    Ok(HttpResponse::Ok().json(StatusResponse::success(id)))
}

// Replace an item's name and counts, or insert it into a model
pub async fn upsert_item(
    pool: web::Data<SqlitePool>,
    request: web::Json<ItemRequest>,
) -> Result<HttpResponse, InventoryError> {
    let fields = request.validated_fields()?;

    let id = match request.existing_id() {
        Some(id) => {
            let previous = Item::find(pool.get_ref(), id)
                .await?
                .ok_or_else(|| InventoryError::NotFound(format!("Item {}", id)))?;
            if !Item::update(pool.get_ref(), id, &fields).await? {
                return Err(InventoryError::NotFound(format!("Item {}", id)));
            }
            info!(
                "Updated item {} ({}): qty {} -> {}, min {} -> {}",
                fields.name, id, previous.qty, fields.qty, previous.min_qty, fields.min_qty
            );
            id
        }
        None => {
            let model_id = request
                .model_id
                .ok_or_else(|| InventoryError::BadRequest("model_id is required".into()))?;
            if VehicleModel::find(pool.get_ref(), model_id).await?.is_none() {
                return Err(InventoryError::NotFound(format!("Vehicle model {}", model_id)));
            }
            let id = Item::insert(pool.get_ref(), &fields, model_id).await?;
            info!("Created item {} ({}) in model {}", fields.name, id, model_id);
            id
        }
    };

    Ok(HttpResponse::Ok().json(StatusResponse::success(id)))
}

// Add a signed delta to an item's quantity, clamped at zero
pub async fn adjust_item(
    pool: web::Data<SqlitePool>,
    request: web::Json<AdjustRequest>,
) -> Result<HttpResponse, InventoryError> {
    let name = request.validated_name()?;
    let delta = request.validated_delta()?;

    let item = Item::adjust_by_name(pool.get_ref(), request.mid, &name, delta)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("Item {:?} in model {}", name, request.mid)))?;

    info!("Adjusted item {} ({}) by {}: qty={}", item.name, item.id, delta, item.qty);
    Ok(HttpResponse::Ok().json(StatusResponse::success(item.id)))
}

// Delete a group, model or item; descendants go with it
pub async fn delete_entry(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse, InventoryError> {
    let (kind, id) = path.into_inner();
    let kind: NodeKind = kind.parse()?;

    let deleted = match kind {
        NodeKind::Group => Group::delete(pool.get_ref(), id).await?,
        NodeKind::Model => VehicleModel::delete(pool.get_ref(), id).await?,
        NodeKind::Item => Item::delete(pool.get_ref(), id).await?,
    };
    if !deleted {
        return Err(InventoryError::NotFound(format!("{} {}", kind.label(), id)));
    }

    info!("Deleted {} {}", kind.label(), id);
    Ok(HttpResponse::Ok().json(StatusResponse::success(id)))
}

// Items whose quantity is below their minimum
pub async fn low_stock(pool: web::Data<SqlitePool>) -> Result<HttpResponse, InventoryError> {
    let items: Vec<LowStockEntry> = Item::low_stock(pool.get_ref())
        .await?
        .into_iter()
        .map(LowStockEntry::from)
        .collect();

    info!("{} items below minimum", items.len());
    Ok(HttpResponse::Ok().json(items))
}
