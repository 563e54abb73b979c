use axum::{
    extract::{Path, State},
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::notification_controller::NotificationController;
use crate::dto::notification_dto::{
    ExpiryCheckResponse, NotificationResponse, SyncNotificationsResponse,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_notification_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/expiry-check", get(expiry_check))
        .route("/sync", post(sync_notifications))
        .route("/read-all", post(mark_all_as_read))
        .route("/:id/read", post(mark_as_read))
        .route("/:id", delete(delete_notification))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.list_by_user(user.user_id).await?;
    Ok(Json(response))
}

/// Recalcular las caducidades del usuario sin persistir nada
async fn expiry_check(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ExpiryCheckResponse>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.expiry_check(user.user_id).await?;
    Ok(Json(response))
}

/// Recalcular caducidades y persistir los avisos nuevos
async fn sync_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<SyncNotificationsResponse>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.sync_expiry_notifications(user.user_id).await?;
    Ok(Json(response))
}

async fn mark_as_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationResponse>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.mark_as_read(id, user.user_id).await?;
    Ok(Json(response))
}

async fn mark_all_as_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let updated = controller.mark_all_as_read(user.user_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "updated": updated
    })))
}

async fn delete_notification(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    controller.delete(id, user.user_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Notification deleted successfully"
    })))
}
