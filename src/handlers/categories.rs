use axum::{Json, extract::State};

use crate::VaultError;
use crate::db::Category;
use crate::middleware::{ApiJson, ApiPath, RequireAdmin};
use crate::router::CatalogState;
use crate::service::ordering::OrderScope;
use crate::types::payloads::{CategoryRequest, CreatedResponse, ReorderRequest, SuccessResponse};

pub async fn list_categories(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Category>>, VaultError> {
    Ok(Json(state.storage.list_categories().await?))
}

pub async fn create_category(
    _admin: RequireAdmin,
    State(state): State<CatalogState>,
    ApiJson(body): ApiJson<CategoryRequest>,
) -> Result<Json<CreatedResponse>, VaultError> {
    let id = state.storage.create_category(body.into_fields()?).await?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn reorder_categories(
    _admin: RequireAdmin,
    State(state): State<CatalogState>,
    ApiJson(body): ApiJson<ReorderRequest>,
) -> Result<Json<SuccessResponse>, VaultError> {
    state
        .storage
        .reorder(OrderScope::Categories, &body.ids)
        .await?;
    Ok(Json(SuccessResponse::OK))
}

pub async fn update_category(
    _admin: RequireAdmin,
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<CategoryRequest>,
) -> Result<Json<SuccessResponse>, VaultError> {
    state.storage.update_category(id, body.into_fields()?).await?;
    Ok(Json(SuccessResponse::OK))
}

/// Removes the category and, through the cascade, all of its accounts.
pub async fn delete_category(
    _admin: RequireAdmin,
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<SuccessResponse>, VaultError> {
    state.storage.delete_category(id).await?;
    Ok(Json(SuccessResponse::OK))
}
