//! Creates the configured wedding row with the built-in content, if missing.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vow_core::config::{StorageBackend, load_config};
use vow_core::content::default_content;
use vow_db::db::connection::create_pool;
use vow_db::db::migrate::run_migrations;
use vow_db::model::NewWedding;
use vow_db::store::WeddingStore;
use vow_db::store::pg::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    let filter =
        EnvFilter::try_new(config.logging.level.as_str()).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();

    if config.database.backend != StorageBackend::Postgres {
        anyhow::bail!("seeding needs database.backend = \"postgres\"");
    }

    run_migrations(&config.database.url).await?;
    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;
    let store = Arc::new(PgStore::new(pool));

    let slug = config.wedding.slug.as_str();
    if let Some(existing) = store.find_by_slug(slug).await? {
        tracing::info!(%slug, wedding_id = %existing.id, "Wedding already exists, nothing to seed");
        return Ok(());
    }

    let wedding = store
        .create(NewWedding::from_record(&default_content(slug))?)
        .await?;

    tracing::info!(%slug, wedding_id = %wedding.id, "Wedding seeded with default content");

    Ok(())
}
