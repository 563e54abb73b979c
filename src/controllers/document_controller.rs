use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::ApiResponse;
use crate::dto::document_dto::{CreateDocumentRequest, DocumentResponse, UpdateDocumentRequest};
use crate::repositories::car_repository::CarRepository;
use crate::repositories::document_repository::DocumentRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_document_type;

pub struct DocumentController {
    repository: DocumentRepository,
    car_repository: CarRepository,
}

impl DocumentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DocumentRepository::new(pool.clone()),
            car_repository: CarRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateDocumentRequest,
    ) -> Result<ApiResponse<DocumentResponse>, AppError> {
        // Validar campos
        if request.name.trim().is_empty() {
            return Err(AppError::BadRequest("Document name is required".to_string()));
        }

        if validate_document_type(&request.doc_type).is_err() {
            return Err(AppError::BadRequest(format!(
                "Unknown document type '{}'",
                request.doc_type
            )));
        }

        // El coche referenciado debe existir y pertenecer al usuario
        let car = self
            .car_repository
            .find_by_id(request.car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        if car.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not have access to this car".to_string(),
            ));
        }

        let document = self.repository.create(user_id, request).await?;

        log::info!("📄 Documento creado: {} para coche {}", document.id, document.car_id);
        Ok(ApiResponse::success_with_message(
            document.into(),
            "Document created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<DocumentResponse, AppError> {
        let document = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        if document.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not have access to this document".to_string(),
            ));
        }

        Ok(document.into())
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<DocumentResponse>, AppError> {
        let documents = self.repository.find_by_user(user_id).await?;
        Ok(documents.into_iter().map(DocumentResponse::from).collect())
    }

    pub async fn list_by_car(
        &self,
        car_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        let documents = self.repository.find_by_car(car_id, user_id).await?;
        Ok(documents.into_iter().map(DocumentResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateDocumentRequest,
    ) -> Result<ApiResponse<DocumentResponse>, AppError> {
        if let Some(ref doc_type) = request.doc_type {
            if validate_document_type(doc_type).is_err() {
                return Err(AppError::BadRequest(format!(
                    "Unknown document type '{}'",
                    doc_type
                )));
            }
        }

        let document = self.repository.update(id, user_id, request).await?;

        Ok(ApiResponse::success_with_message(
            document.into(),
            "Document updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, user_id).await?;
        log::info!("🗑️ Documento eliminado: {}", id);
        Ok(())
    }
}
