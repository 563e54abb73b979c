use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::notification_dto::{
    ExpiryCheckResponse, NotificationResponse, SyncNotificationsResponse,
};
use crate::repositories::car_repository::CarRepository;
use crate::repositories::document_repository::DocumentRepository;
use crate::repositories::notification_repository::NotificationRepository;
use crate::services::expiry_service::scan_expiries;
use crate::utils::errors::AppError;

pub struct NotificationController {
    repository: NotificationRepository,
    car_repository: CarRepository,
    document_repository: DocumentRepository,
}

impl NotificationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: NotificationRepository::new(pool.clone()),
            car_repository: CarRepository::new(pool.clone()),
            document_repository: DocumentRepository::new(pool),
        }
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<NotificationResponse>, AppError> {
        let notifications = self.repository.find_by_user(user_id).await?;
        Ok(notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect())
    }

    pub async fn mark_as_read(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<NotificationResponse, AppError> {
        let notification = self.repository.mark_as_read(id, user_id).await?;
        Ok(notification.into())
    }

    pub async fn mark_all_as_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        self.repository.mark_all_as_read(user_id).await
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, user_id).await
    }

    /// Recalcular las caducidades del usuario. No persiste nada.
    pub async fn expiry_check(&self, user_id: Uuid) -> Result<ExpiryCheckResponse, AppError> {
        let (cars, documents) = futures::future::try_join(
            self.car_repository.find_by_user(user_id),
            self.document_repository.find_by_user(user_id),
        )
        .await?;

        let results = scan_expiries(user_id, &cars, &documents, Utc::now());

        log::info!(
            "🔔 Chequeo de caducidades para {}: {} avisos",
            user_id,
            results.len()
        );

        Ok(ExpiryCheckResponse {
            success: true,
            results,
        })
    }

    /// Recalcular caducidades y persistir las que aún no existan
    /// (mismo usuario, misma referencia y misma fecha de caducidad).
    pub async fn sync_expiry_notifications(
        &self,
        user_id: Uuid,
    ) -> Result<SyncNotificationsResponse, AppError> {
        let check = self.expiry_check(user_id).await?;

        let mut created = 0;
        for notif in &check.results {
            let exists = self
                .repository
                .expiry_exists(user_id, notif.car_id, notif.document_id, notif.expiry_date)
                .await?;

            if !exists {
                self.repository.create_from_expiry(notif).await?;
                created += 1;
            }
        }

        log::info!(
            "🔄 Sync de notificaciones para {}: {} nuevas de {} detectadas",
            user_id,
            created,
            check.results.len()
        );

        Ok(SyncNotificationsResponse {
            success: true,
            scanned: check.results.len(),
            created,
        })
    }
}
