use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::car::Car;

// Request para registrar un coche
#[derive(Debug, Deserialize)]
pub struct CreateCarRequest {
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
}

// Request para actualizar un coche (parcial)
#[derive(Debug, Deserialize)]
pub struct UpdateCarRequest {
    pub car_name: Option<String>,
    pub registration_number: Option<String>,
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
}

// Response de coche
#[derive(Debug, Serialize)]
pub struct CarResponse {
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

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            user_id: car.user_id,
            car_name: car.car_name,
            registration_number: car.registration_number,
            chassis_number: car.chassis_number,
            engine_number: car.engine_number,
            make: car.make,
            model: car.model,
            year: car.year,
            color: car.color,
            fuel_type: car.fuel_type,
            puc_expiry: car.puc_expiry,
            insurance_expiry: car.insurance_expiry,
            insurance_provider: car.insurance_provider,
            notes: car.notes,
            rc_book_url: car.rc_book_url,
            insurance_url: car.insurance_url,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}
