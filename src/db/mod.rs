//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: row structs returned to callers and the field sets written by them
//! - `schema.rs`: SQL DDL for initializing and upgrading the database
//! - `sqlite.rs`: `CatalogStorage`, the category/account store

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Account, AccountFields, Category, CategoryFields};
pub use schema::SQLITE_INIT;
pub use sqlite::{CatalogStorage, SqlitePool};
