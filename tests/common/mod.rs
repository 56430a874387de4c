#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;
use vault_catalog::db::CatalogStorage;
use vault_catalog::router::{CatalogState, catalog_router};
use vault_catalog::service::sessions_actor;
use vault_catalog::AccessGate;

pub const ADMIN_PASSWORD: &str = "admin-pw";
pub const MEMBER_PASSWORD: &str = "member-pw";

/// Router over a fresh database file; the file is removed on drop.
pub struct TestApp {
    pub app: Router,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

impl TestApp {
    pub async fn new(tag: &str) -> Self {
        Self::with_secrets(tag, ADMIN_PASSWORD, MEMBER_PASSWORD).await
    }

    pub async fn with_secrets(tag: &str, admin: &str, member: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "vault-catalog-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", db_path.display());
        let storage = CatalogStorage::connect(&database_url)
            .await
            .expect("failed to open test database");
        let sessions = sessions_actor::spawn()
            .await
            .expect("failed to spawn session registry");
        let gate = AccessGate::new(admin, member);
        let app = catalog_router(CatalogState::new(storage, sessions, gate));

        Self { app, db_path }
    }

    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let resp = self
            .app
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("request failed");

        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .call(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().expect("token in body").to_string()
    }

    pub async fn create_category(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self
            .call(
                "POST",
                "/api/categories",
                Some(token),
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_i64().expect("id in body")
    }

    pub async fn create_account(&self, token: &str, category_id: i64, title: &str) -> i64 {
        let (status, body) = self
            .call(
                "POST",
                "/api/accounts",
                Some(token),
                Some(serde_json::json!({ "category_id": category_id, "title": title })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_i64().expect("id in body")
    }

    pub async fn ids_at(&self, uri: &str) -> Vec<i64> {
        let (status, body) = self.call("GET", uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        body.as_array()
            .expect("array body")
            .iter()
            .map(|row| row["id"].as_i64().expect("row id"))
            .collect()
    }
}
