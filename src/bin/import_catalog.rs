//! Importar un catálogo JSON de ciudades, zonas y lugares
//!
//! Uso: `import_catalog <catalog.json>`. Las filas ya importadas (mismo
//! `external_id`) se reutilizan, así que el comando se puede repetir.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::{error, info};

use transfer_admin::cache::RedisClient;
use transfer_admin::config::EnvironmentConfig;
use transfer_admin::database::DatabaseConnection;
use transfer_admin::i18n::{self, keys};
use transfer_admin::services::{CatalogFile, ImportService, ResponseCache};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: import_catalog <catalog.json>")?;

    let config = EnvironmentConfig::from_env()?;
    i18n::set_default_locale(config.default_locale);

    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("cannot read {}", path))?;
    let catalog = CatalogFile::from_json(&content).with_context(|| format!("invalid JSON in {}", path))?;

    info!(
        "📂 {}: {} ciudades, {} zonas, {} lugares",
        path,
        catalog.cities.len(),
        catalog.zones.len(),
        catalog.locations.len()
    );

    let db_connection = DatabaseConnection::new_default().await?;
    db_connection.run_migrations().await?;

    // las respuestas cacheadas por la API se invalidan tras la importación
    let cache = ResponseCache::new(RedisClient::from_environment(&config).await);

    let report = match ImportService::new(db_connection.pool().clone(), cache).run(&catalog).await {
        Ok(report) => report,
        Err(e) => {
            error!("❌ Importación cancelada: {}", e);
            return Err(e.into());
        }
    };

    info!("🏙️ Ciudades: {} creadas, {} existentes", report.cities.created, report.cities.existing);
    info!("🗺️ Zonas: {} creadas, {} existentes", report.zones.created, report.zones.existing);
    info!("📍 Lugares: {} creados, {} existentes", report.locations.created, report.locations.existing);
    info!(
        "✅ {}",
        i18n::t_with(
            keys::IMPORT_COMPLETED,
            &[
                ("created", &report.created().to_string()),
                ("existing", &report.existing().to_string()),
            ],
        )
    );

    Ok(())
}
