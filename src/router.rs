use axum::{
    Router,
    extract::FromRef,
    routing::{get, post, put},
};

use crate::db::CatalogStorage;
use crate::handlers::{accounts, auth, categories};
use crate::service::access_gate::AccessGate;
use crate::service::sessions_actor::SessionsHandle;

/// Shared state behind every route.
#[derive(Clone)]
pub struct CatalogState {
    pub storage: CatalogStorage,
    pub sessions: SessionsHandle,
    pub gate: AccessGate,
}

impl CatalogState {
    pub fn new(storage: CatalogStorage, sessions: SessionsHandle, gate: AccessGate) -> Self {
        Self {
            storage,
            sessions,
            gate,
        }
    }
}

impl FromRef<CatalogState> for SessionsHandle {
    fn from_ref(state: &CatalogState) -> Self {
        state.sessions.clone()
    }
}

pub fn catalog_router(state: CatalogState) -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::admin_login))
        .route("/api/auth/member-login", post(auth::member_login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/check", get(auth::check))
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/api/categories/reorder", put(categories::reorder_categories))
        .route(
            "/api/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/api/accounts",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route("/api/accounts/reorder", put(accounts::reorder_accounts))
        .route(
            "/api/accounts/{id}",
            put(accounts::update_account).delete(accounts::delete_account),
        )
        .with_state(state)
}
