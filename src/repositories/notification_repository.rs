use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::notification_dto::ExpiryNotification;
use crate::models::notification::{Notification, NotificationType};
use crate::utils::errors::AppError;

pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_from_expiry(
        &self,
        notif: &ExpiryNotification,
    ) -> Result<Notification, AppError> {
        let created = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (id, user_id, notif_type, title, message, car_id, document_id, expiry_date, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, false, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(notif.user_id)
        .bind(NotificationType::Expiry.as_str())
        .bind(&notif.title)
        .bind(&notif.message)
        .bind(notif.car_id)
        .bind(notif.document_id)
        .bind(notif.expiry_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, AppError> {
        let notification =
            sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(notification)
    }

    /// Comprobar si ya existe una notificación de caducidad equivalente
    /// (mismo usuario, misma referencia de coche/documento y misma fecha).
    pub async fn expiry_exists(
        &self,
        user_id: Uuid,
        car_id: Option<Uuid>,
        document_id: Option<Uuid>,
        expiry_date: NaiveDate,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM notifications
                WHERE user_id = $1
                AND notif_type = 'expiry'
                AND car_id IS NOT DISTINCT FROM $2
                AND document_id IS NOT DISTINCT FROM $3
                AND expiry_date = $4
            )
            "#,
        )
        .bind(user_id)
        .bind(car_id)
        .bind(document_id)
        .bind(expiry_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn mark_as_read(&self, id: Uuid, user_id: Uuid) -> Result<Notification, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        if current.user_id != user_id {
            return Err(AppError::Forbidden(
                "Notification does not belong to this user".to_string(),
            ));
        }

        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = true WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn mark_all_as_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = true WHERE user_id = $1 AND is_read = false")
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let notification = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        if notification.user_id != user_id {
            return Err(AppError::Forbidden(
                "Notification does not belong to this user".to_string(),
            ));
        }

        sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
