use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::InventoryError;
use crate::models::group::Group;
use crate::models::item::{Item, ItemFields, LowStockItem};
use crate::models::vehicle_model::VehicleModel;

const MAX_NAME_LEN: usize = 100;

// The HTML page posts form values, so numbers may arrive as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

fn parse_number<E: serde::de::Error>(value: NumberOrString) -> Result<Option<i64>, E> {
    match value {
        NumberOrString::Number(n) => Ok(Some(n)),
        NumberOrString::Text(s) if s.trim().is_empty() => Ok(None),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| E::custom(format!("invalid number: {:?}", s))),
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    parse_number::<D::Error>(NumberOrString::deserialize(deserializer)?)?
        .ok_or_else(|| serde::de::Error::custom("expected a number"))
}

fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(value) => parse_number(value),
        None => Ok(None),
    }
}

// `null`, `""` and `0` all mean "no row yet".
fn existing_id(id: Option<i64>) -> Option<i64> {
    id.filter(|id| *id != 0)
}

pub fn validate_name(name: &str) -> Result<String, InventoryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InventoryError::Validation("name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(InventoryError::Validation(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

// Quantities are stored as 32-bit counts; the adjust statement saturates at the same bound.
pub const MAX_COUNT: i64 = i32::MAX as i64;

fn validate_count(field: &str, value: i64) -> Result<i64, InventoryError> {
    if value < 0 {
        return Err(InventoryError::Validation(format!("{} must not be negative", field)));
    }
    if value > MAX_COUNT {
        return Err(InventoryError::Validation(format!(
            "{} must be at most {}",
            field, MAX_COUNT
        )));
    }
    Ok(value)
}

// Group upsert request
#[derive(Debug, Deserialize)]
pub struct GroupRequest {
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub id: Option<i64>,
    pub name: String,
}

impl GroupRequest {
    pub fn existing_id(&self) -> Option<i64> {
        existing_id(self.id)
    }
}

// Vehicle model upsert request
#[derive(Debug, Deserialize)]
pub struct ModelRequest {
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub group_id: Option<i64>,
}

impl ModelRequest {
    pub fn existing_id(&self) -> Option<i64> {
        existing_id(self.id)
    }
}

// Item upsert request
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub qty: i64,
    #[serde(rename = "min", deserialize_with = "lenient_i64")]
    pub min_qty: i64,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub model_id: Option<i64>,
}

impl ItemRequest {
    pub fn existing_id(&self) -> Option<i64> {
        existing_id(self.id)
    }

    pub fn validated_fields(&self) -> Result<ItemFields, InventoryError> {
        Ok(ItemFields {
            name: validate_name(&self.name)?,
            qty: validate_count("qty", self.qty)?,
            min_qty: validate_count("min", self.min_qty)?,
        })
    }
}

// Quantity adjustment request
#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub name: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub mid: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub adj: i64,
}

impl AdjustRequest {
    pub fn validated_name(&self) -> Result<String, InventoryError> {
        validate_name(&self.name)
    }

    pub fn validated_delta(&self) -> Result<i64, InventoryError> {
        if self.adj < -MAX_COUNT || self.adj > MAX_COUNT {
            return Err(InventoryError::Validation(format!(
                "adj must be between {} and {}",
                -MAX_COUNT, MAX_COUNT
            )));
        }
        Ok(self.adj)
    }
}

/// Which level of the hierarchy a delete targets, as spelled in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Model,
    Item,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Group => "Group",
            NodeKind::Model => "Vehicle model",
            NodeKind::Item => "Item",
        }
    }
}

impl FromStr for NodeKind {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "g" => Ok(NodeKind::Group),
            "m" => Ok(NodeKind::Model),
            "i" => Ok(NodeKind::Item),
            other => Err(InventoryError::BadRequest(format!(
                "unknown entry type {:?}, expected one of g, m, i",
                other
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn success(id: i64) -> Self {
        StatusResponse {
            status: "success".into(),
            id: Some(id),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        StatusResponse {
            status: "error".into(),
            id: None,
            message: Some(message),
        }
    }
}

// Hierarchy returned by /api/data
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemNode {
    pub id: i64,
    pub name: String,
    pub qty: i64,
    #[serde(rename = "min")]
    pub min_qty: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelNode {
    pub id: i64,
    pub name: String,
    pub items: Vec<ItemNode>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupNode {
    pub id: i64,
    pub name: String,
    pub models: Vec<ModelNode>,
}

/// Nests flat rows into groups → models → items, keeping the input order at each level.
pub fn build_hierarchy(
    groups: Vec<Group>,
    models: Vec<VehicleModel>,
    items: Vec<Item>,
) -> Vec<GroupNode> {
    let mut items_by_model: HashMap<i64, Vec<ItemNode>> = HashMap::new();
    for item in items {
        items_by_model.entry(item.model_id).or_default().push(ItemNode {
            id: item.id,
            name: item.name,
            qty: item.qty,
            min_qty: item.min_qty,
        });
    }

    let mut models_by_group: HashMap<i64, Vec<ModelNode>> = HashMap::new();
    for model in models {
        models_by_group.entry(model.group_id).or_default().push(ModelNode {
            id: model.id,
            items: items_by_model.remove(&model.id).unwrap_or_default(),
            name: model.name,
        });
    }

    groups
        .into_iter()
        .map(|group| GroupNode {
            id: group.id,
            models: models_by_group.remove(&group.id).unwrap_or_default(),
            name: group.name,
        })
        .collect()
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LowStockEntry {
    pub id: i64,
    pub name: String,
    pub qty: i64,
    #[serde(rename = "min")]
    pub min_qty: i64,
    pub model_id: i64,
    pub model_name: String,
    pub group_id: i64,
    pub group_name: String,
}

impl From<LowStockItem> for LowStockEntry {
    fn from(item: LowStockItem) -> Self {
        LowStockEntry {
            id: item.id,
            name: item.name,
            qty: item.qty,
            min_qty: item.min_qty,
            model_id: item.model_id,
            model_name: item.model_name,
            group_id: item.group_id,
            group_name: item.group_name,
        }
    }
}
