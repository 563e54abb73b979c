mod cache;
mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{extract::State, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use cache::redis_client::RedisClient;
use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 CarAssist - API de gestión de documentos del vehículo");
    info!("========================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Inicializar Redis y cache
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

    let redis_config = cache::CacheConfig {
        redis_url,
        default_ttl: config.mechanic_cache_ttl,
        max_connections: 10,
    };

    let redis_client = match RedisClient::new(redis_config).await {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    // CORS: permisivo en desarrollo, orígenes explícitos en producción
    let cors = if config.cors_origins == vec!["*".to_string()] {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone(), redis_client);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .merge(routes::create_api_router(app_state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Puerto del servidor
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login usuario");
    info!("   GET  /api/auth/me - Obtener perfil actual");
    info!("🚗 Endpoints - Car:");
    info!("   POST /api/car - Crear coche");
    info!("   GET  /api/car - Listar coches");
    info!("   GET  /api/car/:id - Obtener coche");
    info!("   PUT  /api/car/:id - Actualizar coche");
    info!("   DELETE /api/car/:id - Eliminar coche");
    info!("📄 Endpoints - Document:");
    info!("   POST /api/document - Crear documento");
    info!("   GET  /api/document - Listar documentos");
    info!("   GET  /api/document/car/:car_id - Documentos por coche");
    info!("   GET  /api/document/:id - Obtener documento");
    info!("   PUT  /api/document/:id - Actualizar documento");
    info!("   DELETE /api/document/:id - Eliminar documento");
    info!("🔔 Endpoints - Notification:");
    info!("   GET  /api/notification - Listar notificaciones");
    info!("   GET  /api/notification/expiry-check - Recalcular caducidades");
    info!("   POST /api/notification/sync - Sincronizar avisos de caducidad");
    info!("   POST /api/notification/read-all - Marcar todas como leídas");
    info!("   POST /api/notification/:id/read - Marcar como leída");
    info!("   DELETE /api/notification/:id - Eliminar notificación");
    info!("🔧 Endpoints - Mechanic:");
    info!("   GET  /api/mechanics?lat=..&lng=..&radius=.. - Talleres cercanos");

    // Iniciar servidor
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check: verifica base de datos y Redis
async fn health_endpoint(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    let redis_ok = state.redis.is_connected().await;

    Json(json!({
        "service": "carassist-backend",
        "status": if database_ok && redis_ok { "healthy" } else { "degraded" },
        "database": database_ok,
        "redis": redis_ok,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
