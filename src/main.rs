use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vault_catalog::db::CatalogStorage;
use vault_catalog::router::{CatalogState, catalog_router};
use vault_catalog::service::sessions_actor;
use vault_catalog::AccessGate;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &vault_catalog::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        admin_gate = !cfg.admin_password.is_empty(),
        member_gate = !cfg.member_password.is_empty(),
    );

    let storage = CatalogStorage::connect(&cfg.database_url).await?;
    let sessions = sessions_actor::spawn().await?;
    let gate = AccessGate::new(cfg.admin_password.as_str(), cfg.member_password.as_str());

    let state = CatalogState::new(storage, sessions, gate);
    let app = catalog_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
