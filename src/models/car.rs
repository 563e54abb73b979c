//! Modelo de Car
//!
//! Este módulo contiene el struct Car que mapea a la tabla cars.
//! Las fechas de cumplimiento (PUC, seguro) viven directamente en el coche;
//! los documentos asociados viven en la tabla documents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Car - mapea exactamente a la tabla cars
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_name: String,
    pub registration_number: String,
    pub chassis_number: Option<String>,
    pub engine_number: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub color: Option<String>,
    pub fuel_type: Option<String>,
    pub puc_expiry: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
    pub insurance_provider: Option<String>,
    pub notes: Option<String>,
    pub rc_book_url: Option<String>,
    pub insurance_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
