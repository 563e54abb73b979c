use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::ApiResponse;
use crate::dto::car_dto::{CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::repositories::car_repository::CarRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_registration_number;

pub struct CarController {
    repository: CarRepository,
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateCarRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        // Validar campos
        if request.car_name.trim().is_empty() {
            return Err(AppError::BadRequest("Car name is required".to_string()));
        }

        if validate_registration_number(&request.registration_number).is_err() {
            return Err(AppError::BadRequest(
                "Registration number format is invalid".to_string(),
            ));
        }

        // Verificar que el número de registro no exista para este usuario
        if self
            .repository
            .registration_exists(&request.registration_number, user_id)
            .await?
        {
            return Err(AppError::Conflict(
                "Registration number is already registered for this user".to_string(),
            ));
        }

        let car = self.repository.create(user_id, request).await?;

        log::info!("🚗 Coche creado: {} para usuario {}", car.id, user_id);
        Ok(ApiResponse::success_with_message(
            car.into(),
            "Car created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<CarResponse, AppError> {
        let car = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        // Verificar que pertenece al usuario
        if car.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not have access to this car".to_string(),
            ));
        }

        Ok(car.into())
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CarResponse>, AppError> {
        let cars = self.repository.find_by_user(user_id).await?;
        Ok(cars.into_iter().map(CarResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateCarRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        if let Some(ref registration) = request.registration_number {
            if validate_registration_number(registration).is_err() {
                return Err(AppError::BadRequest(
                    "Registration number format is invalid".to_string(),
                ));
            }
        }

        let car = self.repository.update(id, user_id, request).await?;

        Ok(ApiResponse::success_with_message(
            car.into(),
            "Car updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, user_id).await?;
        log::info!("🗑️ Coche eliminado: {}", id);
        Ok(())
    }
}
