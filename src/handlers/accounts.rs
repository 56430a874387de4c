use axum::{
    Json,
    extract::{Query, State},
};

use crate::VaultError;
use crate::db::Account;
use crate::middleware::{ApiJson, ApiPath, RequireAdmin};
use crate::router::CatalogState;
use crate::service::ordering::OrderScope;
use crate::types::payloads::{
    AccountRequest, AccountsQuery, CreatedResponse, ReorderRequest, SuccessResponse,
};

/// GET /api/accounts?category_id=
pub async fn list_accounts(
    State(state): State<CatalogState>,
    Query(query): Query<AccountsQuery>,
) -> Result<Json<Vec<Account>>, VaultError> {
    let filter = query.category_filter()?;
    Ok(Json(state.storage.list_accounts(filter).await?))
}

pub async fn create_account(
    _admin: RequireAdmin,
    State(state): State<CatalogState>,
    ApiJson(body): ApiJson<AccountRequest>,
) -> Result<Json<CreatedResponse>, VaultError> {
    let id = state.storage.create_account(body.into_new_fields()?).await?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn reorder_accounts(
    _admin: RequireAdmin,
    State(state): State<CatalogState>,
    ApiJson(body): ApiJson<ReorderRequest>,
) -> Result<Json<SuccessResponse>, VaultError> {
    state.storage.reorder(OrderScope::Accounts, &body.ids).await?;
    Ok(Json(SuccessResponse::OK))
}

pub async fn update_account(
    _admin: RequireAdmin,
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AccountRequest>,
) -> Result<Json<SuccessResponse>, VaultError> {
    state
        .storage
        .update_account(id, body.into_update_fields()?)
        .await?;
    Ok(Json(SuccessResponse::OK))
}

pub async fn delete_account(
    _admin: RequireAdmin,
    State(state): State<CatalogState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<SuccessResponse>, VaultError> {
    state.storage.delete_account(id).await?;
    Ok(Json(SuccessResponse::OK))
}
