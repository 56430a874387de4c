use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub sort_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Account {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub username: String,
    pub password: String,
    pub extra_info: String,
    pub url: String,
    pub sort_order: i64,
}

/// Mutable category columns, already validated and defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Mutable account columns, already validated and defaulted.
///
/// `category_id` is only written on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFields {
    pub category_id: i64,
    pub title: String,
    pub username: String,
    pub password: String,
    pub extra_info: String,
    pub url: String,
}
