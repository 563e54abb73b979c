//! Modelo de Mechanic
//!
//! Mecánico cercano devuelto por la búsqueda geoespacial. Es un modelo
//! transitorio: nunca se persiste, se recalcula en cada búsqueda.

use serde::{Deserialize, Serialize};

/// Mecánico / taller de reparación cercano
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mechanic {
    /// Identificador del elemento OSM, en formato "{type}/{id}"
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub distance_meters: f64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
}
