//! SQL DDL for the catalog tables.

/// Base schema. `accounts.category_id` cascades on category delete, so the
/// pool must run with `PRAGMA foreign_keys = ON`.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    icon TEXT DEFAULT '',
    sort_order INTEGER DEFAULT 0
);

CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    username TEXT,
    password TEXT, -- plain text
    extra_info TEXT, -- JSON object of fields, or free text
    url TEXT DEFAULT '',
    sort_order INTEGER DEFAULT 0,
    FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
);
"#;

/// Columns added after the first release. Applied to databases created by
/// older builds; "duplicate column" failures mean the column already exists.
pub const SQLITE_ADDED_COLUMNS: &[&str] = &[
    "ALTER TABLE accounts ADD COLUMN url TEXT DEFAULT ''",
    "ALTER TABLE categories ADD COLUMN sort_order INTEGER DEFAULT 0",
    "ALTER TABLE accounts ADD COLUMN sort_order INTEGER DEFAULT 0",
    "ALTER TABLE categories ADD COLUMN icon TEXT DEFAULT ''",
];

pub const SQLITE_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_accounts_category_id ON accounts(category_id);
"#;
