//! Modelo de Document
//!
//! Este módulo contiene el struct Document que mapea a la tabla documents
//! y el enum de tipos de documento. El archivo en sí vive en un storage
//! externo; aquí solo se guarda la URL.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Document - mapea exactamente a la tabla documents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
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

/// Tipos de documento soportados (columna doc_type, en minúsculas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Rc,
    Insurance,
    Puc,
    License,
    Other,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Rc => "rc",
            DocumentType::Insurance => "insurance",
            DocumentType::Puc => "puc",
            DocumentType::License => "license",
            DocumentType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rc" => Some(DocumentType::Rc),
            "insurance" => Some(DocumentType::Insurance),
            "puc" => Some(DocumentType::Puc),
            "license" => Some(DocumentType::License),
            "other" => Some(DocumentType::Other),
            _ => None,
        }
    }

    /// Etiqueta para mensajes de notificación ("RC", "INSURANCE", ...)
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_round_trip() {
        for value in ["rc", "insurance", "puc", "license", "other"] {
            let parsed = DocumentType::parse(value).expect("should parse");
            assert_eq!(parsed.as_str(), value);
        }
    }

    #[test]
    fn test_document_type_rejects_unknown() {
        assert!(DocumentType::parse("warranty").is_none());
        assert!(DocumentType::parse("RC").is_none());
    }

    #[test]
    fn test_document_type_label() {
        assert_eq!(DocumentType::Puc.label(), "PUC");
        assert_eq!(DocumentType::Insurance.label(), "INSURANCE");
    }
}
