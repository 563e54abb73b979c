pub mod auth_routes;
pub mod car_routes;
pub mod document_routes;
pub mod mechanic_routes;
pub mod notification_routes;

use axum::Router;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .nest("/api/car", car_routes::create_car_router(state.clone()))
        .nest(
            "/api/document",
            document_routes::create_document_router(state.clone()),
        )
        .nest(
            "/api/notification",
            notification_routes::create_notification_router(state.clone()),
        )
        .nest(
            "/api/mechanics",
            mechanic_routes::create_mechanic_router(&state.config),
        )
}
