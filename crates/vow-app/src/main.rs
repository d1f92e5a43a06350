use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use vow_app::services_handler::{Services, seed_default_wedding};
use vow_core::config::{StorageBackend, load_config};
use vow_db::db::connection::create_pool;
use vow_db::db::migrate::run_migrations;
use vow_db::store::Stores;
use vow_db::store::memory::MemoryStore;
use vow_db::store::pg::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting wedding invitation server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if config.uses_default_admin_path() {
        tracing::warn!(
            admin_path = %config.auth.admin_path,
            "Admin API is on the default path; set VOW_AUTH__ADMIN_PATH to something unguessable"
        );
    }

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let stores = match config.database.backend {
        StorageBackend::Postgres => {
            run_migrations(&config.database.url).await?;
            let pool = create_pool(
                &config.database.url,
                u32::from(config.database.max_connections),
            )
            .await?;
            tracing::info!("Database connection pool created.");
            Stores::shared(Arc::new(PgStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store, data is lost on restart");
            let stores = Stores::shared(Arc::new(MemoryStore::new()));
            seed_default_wedding(&stores, &config.wedding.slug).await?;
            stores
        }
    };

    let services = Arc::new(Services::new(&config, stores));

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(Logger::new())
        .push(vow_app::app::router(Arc::new(config), services));

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
