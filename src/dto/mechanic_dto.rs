use serde::{Deserialize, Serialize};

use crate::models::mechanic::Mechanic;

// Query params del endpoint de mecánicos cercanos
#[derive(Debug, Deserialize)]
pub struct MechanicSearchQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<i64>,
}

// Response del endpoint de mecánicos cercanos
#[derive(Debug, Serialize)]
pub struct MechanicSearchResponse {
    pub results: Vec<Mechanic>,
}
