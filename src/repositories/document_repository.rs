use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::document_dto::{CreateDocumentRequest, UpdateDocumentRequest};
use crate::models::document::Document;
use crate::utils::errors::AppError;

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateDocumentRequest,
    ) -> Result<Document, AppError> {
        let now = Utc::now();

        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (id, car_id, user_id, doc_type, name, expiry_date, file_url, uploaded_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.car_id)
        .bind(user_id)
        .bind(request.doc_type)
        .bind(request.name)
        .bind(request.expiry_date)
        .bind(request.file_url)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(document)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE user_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn find_by_car(&self, car_id: Uuid, user_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE car_id = $1 AND user_id = $2 ORDER BY uploaded_at DESC",
        )
        .bind(car_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateDocumentRequest,
    ) -> Result<Document, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        if current.user_id != user_id {
            return Err(AppError::Forbidden(
                "Document does not belong to this user".to_string(),
            ));
        }

        let document = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET doc_type = $2, name = $3, expiry_date = $4, file_url = $5, updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.doc_type.unwrap_or(current.doc_type))
        .bind(request.name.unwrap_or(current.name))
        .bind(request.expiry_date.or(current.expiry_date))
        .bind(request.file_url.or(current.file_url))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let document = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        if document.user_id != user_id {
            return Err(AppError::Forbidden(
                "Document does not belong to this user".to_string(),
            ));
        }

        sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
