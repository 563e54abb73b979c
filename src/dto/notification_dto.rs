use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::notification::{ExpirySeverity, Notification};

// Response de notificación persistida
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notif_type: String,
    pub title: String,
    pub message: String,
    pub car_id: Option<Uuid>,
    pub document_id: Option<Uuid>,
    pub expiry_date: Option<NaiveDate>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notif: Notification) -> Self {
        Self {
            id: notif.id,
            user_id: notif.user_id,
            notif_type: notif.notif_type,
            title: notif.title,
            message: notif.message,
            car_id: notif.car_id,
            document_id: notif.document_id,
            expiry_date: notif.expiry_date,
            is_read: notif.is_read,
            created_at: notif.created_at,
        }
    }
}

/// Notificación de caducidad recalculada por el motor (no persistida)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryNotification {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub car_id: Option<Uuid>,
    pub document_id: Option<Uuid>,
    pub expiry_date: NaiveDate,
    pub days_until_expiry: i64,
    pub severity: ExpirySeverity,
}

// Response del chequeo de caducidades
#[derive(Debug, Serialize)]
pub struct ExpiryCheckResponse {
    pub success: bool,
    pub results: Vec<ExpiryNotification>,
}

// Response de la sincronización de notificaciones
#[derive(Debug, Serialize)]
pub struct SyncNotificationsResponse {
    pub success: bool,
    pub scanned: usize,
    pub created: usize,
}
