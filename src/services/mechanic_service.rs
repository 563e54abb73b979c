//! Búsqueda de mecánicos cercanos
//!
//! Consulta la API de Overpass (OpenStreetMap) buscando talleres de
//! reparación etiquetados alrededor de una coordenada, calcula la
//! distancia de círculo máximo con Haversine, filtra por radio, ordena
//! ascendente y trunca al top 10.

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::mechanic::Mechanic;
use crate::utils::errors::AppError;

/// Radio de la Tierra en metros
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Máximo de resultados devueltos al cliente
pub const MAX_RESULTS: usize = 10;

/// Máximo de elementos pedidos a Overpass
const OVERPASS_ELEMENT_LIMIT: u32 = 50;

/// Respuesta cruda del intérprete de Overpass
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// Elemento OSM: nodo con coordenadas propias, o way/relation con centro
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    pub id: u64,
    #[serde(rename = "type")]
    pub element_type: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Resolver la coordenada del elemento: los nodos traen lat/lon
    /// propios, ways y relations traen un centro calculado.
    fn coordinate(&self) -> Option<(f64, f64)> {
        if self.element_type == "node" {
            match (self.lat, self.lon) {
                (Some(lat), Some(lon)) => Some((lat, lon)),
                _ => None,
            }
        } else {
            self.center.as_ref().map(|c| (c.lat, c.lon))
        }
    }
}

/// Distancia de círculo máximo entre dos coordenadas, en metros
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin() * (d_lon / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Construir la query Overpass QL para talleres alrededor de un punto
pub fn build_overpass_query(lat: f64, lng: f64, radius_meters: u32) -> String {
    format!(
        r#"[out:json][timeout:25];
(
  node["amenity"="car_repair"](around:{radius},{lat},{lng});
  node["shop"="car_repair"](around:{radius},{lat},{lng});
  way["amenity"="car_repair"](around:{radius},{lat},{lng});
  relation["amenity"="car_repair"](around:{radius},{lat},{lng});
);
out center tags {limit};
"#,
        radius = radius_meters,
        lat = lat,
        lng = lng,
        limit = OVERPASS_ELEMENT_LIMIT,
    )
}

fn tag(tags: &HashMap<String, String>, key: &str) -> Option<String> {
    tags.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Dirección con cadena de fallbacks: addr:full, o la concatenación de
/// los componentes addr:* presentes.
fn extract_address(tags: &HashMap<String, String>) -> Option<String> {
    if let Some(full) = tag(tags, "addr:full") {
        return Some(full);
    }

    let joined = ["addr:housenumber", "addr:street", "addr:city", "addr:state", "addr:postcode"]
        .iter()
        .filter_map(|key| tag(tags, key))
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Convertir elementos Overpass en mecánicos ordenados por distancia.
///
/// Descarta elementos sin coordenada resolvible y, como re-chequeo
/// defensivo sobre el filtro de Overpass, los que quedan fuera del radio
/// pedido. Ordena ascendente y trunca al top 10.
pub fn rank_mechanics(
    elements: Vec<OverpassElement>,
    lat: f64,
    lng: f64,
    radius_meters: u32,
) -> Vec<Mechanic> {
    let mut mechanics: Vec<Mechanic> = elements
        .into_iter()
        .filter_map(|el| {
            let (el_lat, el_lon) = el.coordinate()?;
            let distance = haversine_meters(lat, lng, el_lat, el_lon);

            if distance > radius_meters as f64 {
                return None;
            }

            Some(Mechanic {
                id: format!("{}/{}", el.element_type, el.id),
                name: tag(&el.tags, "name").unwrap_or_else(|| "Mechanic / Car Repair".to_string()),
                lat: el_lat,
                lng: el_lon,
                distance_meters: distance,
                address: extract_address(&el.tags),
                phone: tag(&el.tags, "phone").or_else(|| tag(&el.tags, "contact:phone")),
                opening_hours: tag(&el.tags, "opening_hours"),
            })
        })
        .collect();

    mechanics.sort_by(|a, b| {
        a.distance_meters
            .partial_cmp(&b.distance_meters)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    mechanics.truncate(MAX_RESULTS);
    mechanics
}

/// Servicio de búsqueda de mecánicos contra Overpass
pub struct MechanicService {
    client: reqwest::Client,
    overpass_url: String,
}

impl MechanicService {
    pub fn new(client: reqwest::Client, overpass_url: String) -> Self {
        Self { client, overpass_url }
    }

    /// Buscar talleres alrededor de una coordenada
    pub async fn search_nearby(
        &self,
        lat: f64,
        lng: f64,
        radius_meters: u32,
    ) -> Result<Vec<Mechanic>, AppError> {
        let query = build_overpass_query(lat, lng, radius_meters);

        log::info!(
            "🔧 Buscando mecánicos en ({}, {}) radio {}m",
            lat,
            lng,
            radius_meters
        );

        // Overpass recomienda body form-encoded con la query en `data`
        let body = format!("data={}", urlencoding::encode(&query));

        let response = self
            .client
            .post(&self.overpass_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("User-Agent", "CarAssist/1.0")
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Overpass API error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            log::error!("❌ Overpass respondió {}: {}", status, details);
            return Err(AppError::ExternalApi(format!(
                "Overpass API error: {} {}",
                status, details
            )));
        }

        let overpass: OverpassResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Invalid Overpass response: {}", e)))?;

        let mechanics = rank_mechanics(overpass.elements, lat, lng, radius_meters);

        log::info!("✅ Búsqueda completada: {} mecánicos", mechanics.len());
        Ok(mechanics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64, lat: f64, lon: f64, tags: &[(&str, &str)]) -> OverpassElement {
        OverpassElement {
            id,
            element_type: "node".to_string(),
            lat: Some(lat),
            lon: Some(lon),
            center: None,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn way(id: u64, lat: f64, lon: f64, tags: &[(&str, &str)]) -> OverpassElement {
        OverpassElement {
            id,
            element_type: "way".to_string(),
            lat: None,
            lon: None,
            center: Some(OverpassCenter { lat, lon }),
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_haversine_identical_coordinates_is_zero() {
        assert_eq!(haversine_meters(19.0760, 72.8777, 19.0760, 72.8777), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Un grado de latitud son ~111.2 km
        let distance = haversine_meters(19.0, 72.8777, 20.0, 72.8777);
        assert!((distance - 111_195.0).abs() < 200.0, "got {}", distance);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let d1 = haversine_meters(19.0760, 72.8777, 19.2183, 72.9781);
        let d2 = haversine_meters(19.2183, 72.9781, 19.0760, 72.8777);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_build_overpass_query_contains_filters() {
        let query = build_overpass_query(19.0760, 72.8777, 3000);
        assert!(query.contains("[out:json]"));
        assert!(query.contains(r#"node["amenity"="car_repair"](around:3000,19.076,72.8777)"#));
        assert!(query.contains(r#"way["amenity"="car_repair"]"#));
        assert!(query.contains(r#"relation["amenity"="car_repair"]"#));
        assert!(query.contains("out center tags 50"));
    }

    #[test]
    fn test_rank_mechanics_sorted_and_within_radius() {
        let elements = vec![
            node(1, 19.0860, 72.8777, &[("name", "Far Garage")]), // ~1.1 km
            node(2, 19.0770, 72.8777, &[("name", "Near Garage")]), // ~111 m
            node(3, 19.0800, 72.8777, &[("name", "Mid Garage")]),  // ~445 m
        ];

        let mechanics = rank_mechanics(elements, 19.0760, 72.8777, 3000);

        assert_eq!(mechanics.len(), 3);
        assert_eq!(mechanics[0].name, "Near Garage");
        assert_eq!(mechanics[1].name, "Mid Garage");
        assert_eq!(mechanics[2].name, "Far Garage");
        for pair in mechanics.windows(2) {
            assert!(pair[0].distance_meters <= pair[1].distance_meters);
        }
        for m in &mechanics {
            assert!(m.distance_meters <= 3000.0);
        }
    }

    #[test]
    fn test_rank_mechanics_defensive_radius_filter() {
        // Overpass puede devolver elementos fuera del radio; se descartan
        let elements = vec![
            node(1, 19.0770, 72.8777, &[]),
            node(2, 19.5, 72.8777, &[("name", "Too Far")]), // ~47 km
        ];

        let mechanics = rank_mechanics(elements, 19.0760, 72.8777, 3000);

        assert_eq!(mechanics.len(), 1);
        assert!(mechanics.iter().all(|m| m.name != "Too Far"));
    }

    #[test]
    fn test_rank_mechanics_truncates_to_top_10() {
        let elements: Vec<OverpassElement> = (0..25)
            .map(|i| node(i, 19.0760 + (i as f64) * 0.0001, 72.8777, &[]))
            .collect();

        let mechanics = rank_mechanics(elements, 19.0760, 72.8777, 3000);

        assert_eq!(mechanics.len(), MAX_RESULTS);
    }

    #[test]
    fn test_rank_mechanics_skips_elements_without_coordinates() {
        let mut broken = node(7, 0.0, 0.0, &[]);
        broken.lat = None;
        broken.lon = None;

        let mechanics = rank_mechanics(vec![broken], 19.0760, 72.8777, 3000);

        assert!(mechanics.is_empty());
    }

    #[test]
    fn test_rank_mechanics_resolves_way_center() {
        let elements = vec![way(42, 19.0770, 72.8777, &[("name", "Center Garage")])];

        let mechanics = rank_mechanics(elements, 19.0760, 72.8777, 3000);

        assert_eq!(mechanics.len(), 1);
        assert_eq!(mechanics[0].id, "way/42");
        assert_eq!(mechanics[0].lat, 19.0770);
    }

    #[test]
    fn test_tag_fallback_chains() {
        let elements = vec![node(
            9,
            19.0770,
            72.8777,
            &[
                ("contact:phone", "+91 98765 43210"),
                ("addr:housenumber", "12"),
                ("addr:street", "MG Road"),
                ("addr:city", "Mumbai"),
                ("opening_hours", "Mo-Sa 09:00-19:00"),
            ],
        )];

        let mechanics = rank_mechanics(elements, 19.0760, 72.8777, 3000);

        assert_eq!(mechanics.len(), 1);
        let m = &mechanics[0];
        assert_eq!(m.name, "Mechanic / Car Repair");
        assert_eq!(m.phone.as_deref(), Some("+91 98765 43210"));
        assert_eq!(m.address.as_deref(), Some("12, MG Road, Mumbai"));
        assert_eq!(m.opening_hours.as_deref(), Some("Mo-Sa 09:00-19:00"));
    }

    #[test]
    fn test_addr_full_takes_precedence() {
        let elements = vec![node(
            10,
            19.0770,
            72.8777,
            &[
                ("addr:full", "12 MG Road, Mumbai 400001"),
                ("addr:street", "MG Road"),
            ],
        )];

        let mechanics = rank_mechanics(elements, 19.0760, 72.8777, 3000);

        assert_eq!(
            mechanics[0].address.as_deref(),
            Some("12 MG Road, Mumbai 400001")
        );
    }

    #[test]
    fn test_parse_overpass_response_json() {
        let raw = r#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 1, "lat": 19.0770, "lon": 72.8777, "tags": {"name": "Garage A"}},
                {"type": "way", "id": 2, "center": {"lat": 19.0780, "lon": 72.8778}, "tags": {}}
            ]
        }"#;

        let parsed: OverpassResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.elements.len(), 2);

        let mechanics = rank_mechanics(parsed.elements, 19.0760, 72.8777, 3000);
        assert_eq!(mechanics.len(), 2);
        assert_eq!(mechanics[0].name, "Garage A");
        assert_eq!(mechanics[1].name, "Mechanic / Car Repair");
    }
}
