use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use transfer_admin::cache::RedisClient;
use transfer_admin::config::EnvironmentConfig;
use transfer_admin::database::DatabaseConnection;
use transfer_admin::state::AppState;
use transfer_admin::{create_app, i18n};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚐 Transfer Admin - API de administración");
    info!("==========================================");

    let config = EnvironmentConfig::from_env()?;
    i18n::set_default_locale(config.default_locale);
    info!("🌍 Idioma por defecto: {}", config.default_locale.code());

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    db_connection.run_migrations().await?;
    let pool = db_connection.pool().clone();

    // Redis es opcional
    let redis_client = RedisClient::from_environment(&config).await;

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(pool, config, redis_client));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("   CRUD /api/v1/cities, /zones, /locations, /vehicle-types, /service-features, /rates");
    info!("   GET  /api/v1/cities/:id/details | /zones | /locations");
    info!("   GET  /api/v1/locations/type/:type - Lugares por tipo");
    info!("   GET  /api/v1/autocomplete?q= - Autocompletado de lugares");
    info!("   GET  /api/v1/quote?from=&to= - Presupuesto de traslado");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
