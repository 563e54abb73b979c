use axum::{
    extract::{Query, State},
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};

use crate::cache::CacheOperations;
use crate::config::EnvironmentConfig;
use crate::dto::mechanic_dto::{MechanicSearchQuery, MechanicSearchResponse};
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::models::mechanic::Mechanic;
use crate::services::mechanic_service::MechanicService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_coordinates;

pub fn create_mechanic_router(config: &EnvironmentConfig) -> Router<AppState> {
    let rate_limit_state = RateLimitState::new(config);

    Router::new()
        .route("/", get(search_mechanics))
        .route_layer(from_fn_with_state(rate_limit_state, rate_limit_middleware))
}

/// Validar los parámetros de búsqueda y resolver el radio efectivo
fn resolve_search_params(
    query: &MechanicSearchQuery,
    default_radius: u32,
    max_radius: u32,
) -> Result<(f64, f64, u32), AppError> {
    let (lat, lng) = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(AppError::BadRequest(
                "lat and lng are required numeric query params".to_string(),
            ))
        }
    };

    if validate_coordinates(lat, lng).is_err() {
        return Err(AppError::BadRequest(
            "lat must be in [-90, 90] and lng in [-180, 180]".to_string(),
        ));
    }

    let radius = match query.radius {
        None => default_radius,
        Some(r) if r <= 0 => {
            return Err(AppError::BadRequest(
                "radius must be a positive number of meters".to_string(),
            ))
        }
        // Radios desmesurados se recortan al máximo configurado
        Some(r) => (r as u64).min(max_radius as u64) as u32,
    };

    Ok((lat, lng, radius))
}

/// GET /api/mechanics?lat=..&lng=..&radius=..
///
/// Devuelve talleres cercanos ordenados por distancia. Los resultados se
/// cachean en Redis por coordenada cuantizada + radio.
async fn search_mechanics(
    State(state): State<AppState>,
    Query(query): Query<MechanicSearchQuery>,
) -> Result<Json<MechanicSearchResponse>, AppError> {
    let (lat, lng, radius) = resolve_search_params(
        &query,
        state.config.mechanic_default_radius,
        state.config.mechanic_max_radius,
    )?;

    // Clave de cache: checksum de la coordenada redondeada a 4 decimales
    let checksum = format!("{:x}", md5::compute(format!("{:.4}:{:.4}:{}", lat, lng, radius)));
    let cache_key = state.redis.mechanic_key(&checksum);

    if let Ok(Some(cached)) = state.redis.get::<Vec<Mechanic>>(&cache_key).await {
        log::info!("📥 Mecánicos desde cache para {}", cache_key);
        return Ok(Json(MechanicSearchResponse { results: cached }));
    }

    let service = MechanicService::new(state.http_client.clone(), state.config.overpass_url.clone());
    let results = service.search_nearby(lat, lng, radius).await?;

    // Un fallo al cachear no debe tirar la respuesta
    if let Err(e) = state
        .redis
        .set(&cache_key, &results, state.redis.default_ttl())
        .await
    {
        log::warn!("⚠️ No se pudo cachear la búsqueda de mecánicos: {}", e);
    }

    Ok(Json(MechanicSearchResponse { results }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: Option<f64>, lng: Option<f64>, radius: Option<i64>) -> MechanicSearchQuery {
        MechanicSearchQuery { lat, lng, radius }
    }

    #[test]
    fn test_missing_coordinates_is_bad_request() {
        let result = resolve_search_params(&query(None, Some(72.8), None), 3000, 50000);
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = resolve_search_params(&query(Some(19.0), None, None), 3000, 50000);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_out_of_range_coordinates_is_bad_request() {
        let result = resolve_search_params(&query(Some(91.0), Some(72.8), None), 3000, 50000);
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = resolve_search_params(&query(Some(19.0), Some(-181.0), None), 3000, 50000);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_default_radius_applied() {
        let (lat, lng, radius) =
            resolve_search_params(&query(Some(19.0760), Some(72.8777), None), 3000, 50000).unwrap();
        assert_eq!((lat, lng, radius), (19.0760, 72.8777, 3000));
    }

    #[test]
    fn test_non_positive_radius_is_bad_request() {
        let result = resolve_search_params(&query(Some(19.0), Some(72.8), Some(0)), 3000, 50000);
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = resolve_search_params(&query(Some(19.0), Some(72.8), Some(-5)), 3000, 50000);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_oversized_radius_is_clamped() {
        let (_, _, radius) =
            resolve_search_params(&query(Some(19.0), Some(72.8), Some(999_999)), 3000, 50000)
                .unwrap();
        assert_eq!(radius, 50000);
    }
}
