use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Runtime configuration.
///
/// Sources, later ones win:
/// - built-in defaults
/// - `VAULT_*` environment variables (`VAULT_DATABASE_URL`, `VAULT_LISTEN_ADDR`, `VAULT_LOGLEVEL`)
/// - `ADMIN_PASSWORD` / `MEMBER_PASSWORD`
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Secret for the admin gate. Empty means the gate rejects every attempt.
    pub admin_password: String,
    /// Secret for the member gate. Empty means the gate rejects every attempt.
    pub member_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:accounts.db".to_string(),
            listen_addr: "0.0.0.0:6721".to_string(),
            loglevel: "info".to_string(),
            admin_password: String::new(),
            member_password: String::new(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("VAULT_"))
            .merge(Env::raw().only(&["admin_password", "member_password"]))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: &str| if s.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("listen_addr", &self.listen_addr)
            .field("loglevel", &self.loglevel)
            .field("admin_password", &redact(&self.admin_password))
            .field("member_password", &redact(&self.member_password))
            .finish()
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| match Config::load() {
    Ok(cfg) => cfg,
    Err(e) => {
        eprintln!("invalid configuration, falling back to defaults: {e}");
        Config::default()
    }
});
