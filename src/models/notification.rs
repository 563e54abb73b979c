//! Modelo de Notification
//!
//! Este módulo contiene el struct Notification que mapea a la tabla
//! notifications y los tipos asociados.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Notification - mapea exactamente a la tabla notifications
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
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

/// Tipos de notificación (columna notif_type, en minúsculas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Expiry,
    Fine,
    Reminder,
    Info,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Expiry => "expiry",
            NotificationType::Fine => "fine",
            NotificationType::Reminder => "reminder",
            NotificationType::Info => "info",
        }
    }
}

/// Severidad implícita de una notificación de caducidad según los días
/// restantes: <= 0 ya caducado, <= 30 a punto de caducar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirySeverity {
    Expired,
    ExpiringSoon,
}

impl ExpirySeverity {
    pub fn from_days(days_until_expiry: i64) -> Self {
        if days_until_expiry <= 0 {
            ExpirySeverity::Expired
        } else {
            ExpirySeverity::ExpiringSoon
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_days() {
        assert_eq!(ExpirySeverity::from_days(-5), ExpirySeverity::Expired);
        assert_eq!(ExpirySeverity::from_days(0), ExpirySeverity::Expired);
        assert_eq!(ExpirySeverity::from_days(1), ExpirySeverity::ExpiringSoon);
        assert_eq!(ExpirySeverity::from_days(30), ExpirySeverity::ExpiringSoon);
    }
}
