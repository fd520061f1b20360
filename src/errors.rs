use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use crate::routes::inventory::inventory_models::StatusResponse;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ResponseError for InventoryError {
    fn status_code(&self) -> StatusCode {
        match self {
            InventoryError::NotFound(_) => StatusCode::NOT_FOUND,
            InventoryError::Validation(_) | InventoryError::BadRequest(_) => StatusCode::BAD_REQUEST,
            InventoryError::Database(_)
            | InventoryError::Migration(_)
            | InventoryError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            InventoryError::Database(_) | InventoryError::Migration(_) => {
                error!("Database operation failed: {}", self);
                "Database operation failed".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(StatusResponse::error(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            InventoryError::NotFound("Item 3".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            InventoryError::Validation("name must not be empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            InventoryError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn database_errors_hide_details() {
        let resp = InventoryError::Database(sqlx::Error::PoolTimedOut).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Database operation failed");
    }

    #[actix_web::test]
    async fn not_found_names_the_target() {
        let resp = InventoryError::NotFound("Group 7".into()).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Group 7 not found");
    }
}
