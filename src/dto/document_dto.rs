use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::Document;

// Request para registrar un documento
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub car_id: Uuid,
    pub doc_type: String,
    pub name: String,
    pub expiry_date: Option<NaiveDate>,
    pub file_url: Option<String>,
}

// Request para actualizar un documento (parcial)
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentRequest {
    pub doc_type: Option<String>,
    pub name: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub file_url: Option<String>,
}

// Response de documento
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub car_id: Uuid,
    pub user_id: Uuid,
    pub doc_type: String,
    pub name: String,
    pub expiry_date: Option<NaiveDate>,
    pub file_url: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            car_id: doc.car_id,
            user_id: doc.user_id,
            doc_type: doc.doc_type,
            name: doc.name,
            expiry_date: doc.expiry_date,
            file_url: doc.file_url,
            uploaded_at: doc.uploaded_at,
            updated_at: doc.updated_at,
        }
    }
}
