use crate::db::models::{Account, AccountFields, Category, CategoryFields};
use crate::db::schema::{SQLITE_ADDED_COLUMNS, SQLITE_INDEXES, SQLITE_INIT};
use crate::error::VaultError;
use crate::service::ordering::{OrderScope, rank_assignments};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

const CATEGORY_COLUMNS: &str = "id, name, COALESCE(description, '') AS description, \
     COALESCE(icon, '') AS icon, COALESCE(sort_order, 0) AS sort_order";

const ACCOUNT_COLUMNS: &str = "id, category_id, title, COALESCE(username, '') AS username, \
     COALESCE(password, '') AS password, COALESCE(extra_info, '') AS extra_info, \
     COALESCE(url, '') AS url, COALESCE(sort_order, 0) AS sort_order";

/// Persistent categories and accounts.
///
/// Cheap to clone; clones share the pool and the per-scope reorder locks.
#[derive(Clone)]
pub struct CatalogStorage {
    pool: SqlitePool,
    category_reorder: Arc<Mutex<()>>,
    account_reorder: Arc<Mutex<()>>,
}

impl CatalogStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            category_reorder: Arc::new(Mutex::new(())),
            account_reorder: Arc::new(Mutex::new(())),
        }
    }

    /// Open (creating if missing) the database at `database_url` and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, VaultError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let mut pool_opts = SqlitePoolOptions::new();
        // each in-memory connection would otherwise be its own database
        if database_url.contains(":memory:") {
            pool_opts = pool_opts
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL, then add any columns
    /// missing from databases created by older builds.
    pub async fn init_schema(&self) -> Result<(), VaultError> {
        self.execute_script(SQLITE_INIT).await?;

        for stmt in SQLITE_ADDED_COLUMNS {
            match sqlx::query(stmt).execute(&self.pool).await {
                Ok(_) => info!(statement = %stmt, "upgraded legacy schema"),
                Err(sqlx::Error::Database(e)) if e.message().contains("duplicate column") => {}
                Err(e) => return Err(e.into()),
            }
        }

        self.execute_script(SQLITE_INDEXES).await?;
        debug!("catalog schema ready");
        Ok(())
    }

    async fn execute_script(&self, script: &str) -> Result<(), VaultError> {
        // sqlx::query runs a single statement at a time
        for stmt in script.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, VaultError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY sort_order, id");
        let rows = sqlx::query_as::<_, Category>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Insert a category at rank 0. Returns the new row id.
    pub async fn create_category(&self, fields: CategoryFields) -> Result<i64, VaultError> {
        let result = sqlx::query(
            "INSERT INTO categories (name, description, icon, sort_order) VALUES (?, ?, ?, 0)",
        )
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.icon)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Replace every mutable column. Unknown ids are a silent no-op.
    pub async fn update_category(&self, id: i64, fields: CategoryFields) -> Result<(), VaultError> {
        sqlx::query("UPDATE categories SET name = ?, description = ?, icon = ? WHERE id = ?")
            .bind(fields.name)
            .bind(fields.description)
            .bind(fields.icon)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a category; its accounts go with it through the foreign key cascade.
    pub async fn delete_category(&self, id: i64) -> Result<(), VaultError> {
        self.delete_row(OrderScope::Categories, id).await
    }

    /// Accounts ordered by `(sort_order, id)`, optionally restricted to one category.
    /// Without a filter, rows are grouped by category first.
    pub async fn list_accounts(&self, category_id: Option<i64>) -> Result<Vec<Account>, VaultError> {
        let rows = match category_id {
            Some(category_id) => {
                let sql = format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE category_id = ? ORDER BY sort_order, id"
                );
                sqlx::query_as::<_, Account>(&sql)
                    .bind(category_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY category_id, sort_order, id"
                );
                sqlx::query_as::<_, Account>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Insert an account at rank 0. An unknown `category_id` is a validation failure.
    pub async fn create_account(&self, fields: AccountFields) -> Result<i64, VaultError> {
        let result = sqlx::query(
            r#"INSERT INTO accounts (
                category_id, title, username, password, extra_info, url, sort_order
            ) VALUES (?, ?, ?, ?, ?, ?, 0)"#,
        )
        .bind(fields.category_id)
        .bind(fields.title)
        .bind(fields.username)
        .bind(fields.password)
        .bind(fields.extra_info)
        .bind(fields.url)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Err(
                VaultError::validation(format!("category {} does not exist", fields.category_id)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace every mutable column except `category_id`. Unknown ids are a silent no-op.
    pub async fn update_account(&self, id: i64, fields: AccountFields) -> Result<(), VaultError> {
        sqlx::query(
            r#"UPDATE accounts SET
                title = ?,
                username = ?,
                password = ?,
                extra_info = ?,
                url = ?
              WHERE id = ?"#,
        )
        .bind(fields.title)
        .bind(fields.username)
        .bind(fields.password)
        .bind(fields.extra_info)
        .bind(fields.url)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_account(&self, id: i64) -> Result<(), VaultError> {
        self.delete_row(OrderScope::Accounts, id).await
    }

    async fn delete_row(&self, scope: OrderScope, id: i64) -> Result<(), VaultError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", scope.table());
        let done = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        info!(
            table = scope.table(),
            id,
            deleted = done.rows_affected(),
            "delete applied"
        );
        Ok(())
    }

    /// Rewrite `sort_order` to `0..ids.len()` in list order, one row at a time.
    ///
    /// Ids missing from the table are skipped. Rows not named keep their old rank.
    /// The writes are not atomic as a group; reorders of the same scope are
    /// serialized so they never interleave.
    pub async fn reorder(&self, scope: OrderScope, ids: &[i64]) -> Result<u64, VaultError> {
        let lock = match scope {
            OrderScope::Categories => &self.category_reorder,
            OrderScope::Accounts => &self.account_reorder,
        };
        let _guard = lock.lock().await;

        let sql = format!("UPDATE {} SET sort_order = ? WHERE id = ?", scope.table());
        let mut updated = 0;
        for (id, rank) in rank_assignments(ids) {
            let done = sqlx::query(&sql)
                .bind(rank)
                .bind(id)
                .execute(&self.pool)
                .await?;
            updated += done.rows_affected();
        }

        info!(
            table = scope.table(),
            submitted = ids.len(),
            updated,
            "reorder applied"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage() -> CatalogStorage {
        CatalogStorage::connect("sqlite::memory:")
            .await
            .expect("in-memory database")
    }

    fn category(name: &str) -> CategoryFields {
        CategoryFields {
            name: name.to_string(),
            ..CategoryFields::default()
        }
    }

    fn account(category_id: i64, title: &str) -> AccountFields {
        AccountFields {
            category_id,
            title: title.to_string(),
            ..AccountFields::default()
        }
    }

    #[tokio::test]
    async fn new_rows_default_optional_text_to_empty() {
        let store = storage().await;
        let cat = store.create_category(category("API Keys")).await.unwrap();
        store.create_account(account(cat, "openai")).await.unwrap();

        let cats = store.list_categories().await.unwrap();
        assert_eq!(
            cats,
            vec![Category {
                id: cat,
                name: "API Keys".to_string(),
                description: String::new(),
                icon: String::new(),
                sort_order: 0,
            }]
        );

        let accounts = store.list_accounts(Some(cat)).await.unwrap();
        assert_eq!(accounts.len(), 1);
        let a = &accounts[0];
        assert_eq!(a.username, "");
        assert_eq!(a.password, "");
        assert_eq!(a.extra_info, "");
        assert_eq!(a.url, "");
        assert_eq!(a.sort_order, 0);
    }

    #[tokio::test]
    async fn null_legacy_columns_read_back_as_empty() {
        let store = storage().await;
        sqlx::query("INSERT INTO categories (name, description, icon) VALUES ('old', NULL, NULL)")
            .execute(store.pool())
            .await
            .unwrap();
        let cats = store.list_categories().await.unwrap();
        assert_eq!(cats[0].description, "");
        assert_eq!(cats[0].icon, "");
    }

    #[tokio::test]
    async fn reorder_produces_submitted_order() {
        let store = storage().await;
        let cat = store.create_category(category("c")).await.unwrap();
        let a = store.create_account(account(cat, "a")).await.unwrap();
        let b = store.create_account(account(cat, "b")).await.unwrap();
        let c = store.create_account(account(cat, "c")).await.unwrap();

        let updated = store.reorder(OrderScope::Accounts, &[c, a, b]).await.unwrap();
        assert_eq!(updated, 3);

        let listed: Vec<(i64, i64)> = store
            .list_accounts(Some(cat))
            .await
            .unwrap()
            .into_iter()
            .map(|a| (a.id, a.sort_order))
            .collect();
        assert_eq!(listed, vec![(c, 0), (a, 1), (b, 2)]);
    }

    #[tokio::test]
    async fn reorder_skips_unknown_ids() {
        let store = storage().await;
        let x = store.create_category(category("x")).await.unwrap();
        let y = store.create_category(category("y")).await.unwrap();

        let updated = store
            .reorder(OrderScope::Categories, &[y, 999, x])
            .await
            .unwrap();
        assert_eq!(updated, 2);

        let ids: Vec<i64> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![y, x]);
    }

    #[tokio::test]
    async fn omitted_rows_tie_break_by_id() {
        let store = storage().await;
        let a = store.create_category(category("a")).await.unwrap();
        let b = store.create_category(category("b")).await.unwrap();
        let c = store.create_category(category("c")).await.unwrap();

        // b -> 0, a -> 1; c keeps rank 0 and sorts after b by id.
        store.reorder(OrderScope::Categories, &[b, a]).await.unwrap();
        let ids: Vec<i64> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![b, c, a]);
    }

    #[tokio::test]
    async fn deleting_category_cascades_to_accounts() {
        let store = storage().await;
        let keep = store.create_category(category("keep")).await.unwrap();
        let gone = store.create_category(category("gone")).await.unwrap();
        store.create_account(account(gone, "one")).await.unwrap();
        store.create_account(account(gone, "two")).await.unwrap();
        store.create_account(account(keep, "stay")).await.unwrap();

        store.delete_category(gone).await.unwrap();

        assert!(store.list_accounts(Some(gone)).await.unwrap().is_empty());
        let all = store.list_accounts(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].category_id, keep);
    }

    #[tokio::test]
    async fn account_for_missing_category_is_rejected() {
        let store = storage().await;
        let err = store.create_account(account(42, "orphan")).await.unwrap_err();
        assert!(matches!(err, VaultError::Validation(_)));
        assert!(store.list_accounts(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_category() {
        let store = storage().await;
        let first = store.create_category(category("first")).await.unwrap();
        let second = store.create_category(category("second")).await.unwrap();
        let id = store
            .create_account(AccountFields {
                username: "alice".to_string(),
                password: "pw".to_string(),
                ..account(first, "mail")
            })
            .await
            .unwrap();

        store
            .update_account(
                id,
                AccountFields {
                    url: "https://mail.example".to_string(),
                    ..account(second, "mail (new)")
                },
            )
            .await
            .unwrap();

        let a = &store.list_accounts(None).await.unwrap()[0];
        assert_eq!(a.category_id, first);
        assert_eq!(a.title, "mail (new)");
        assert_eq!(a.username, "");
        assert_eq!(a.password, "");
        assert_eq!(a.url, "https://mail.example");
    }

    #[tokio::test]
    async fn missing_ids_are_silent_no_ops() {
        let store = storage().await;
        store.update_category(77, category("ghost")).await.unwrap();
        store.delete_category(77).await.unwrap();
        store.delete_account(77).await.unwrap();
        assert!(store.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn schema_init_is_repeatable() {
        let store = storage().await;
        store.init_schema().await.unwrap();
        store.init_schema().await.unwrap();
    }
}
