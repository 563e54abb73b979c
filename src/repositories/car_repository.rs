use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::car_dto::{CreateCarRequest, UpdateCarRequest};
use crate::models::car::Car;
use crate::utils::errors::AppError;

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid, request: CreateCarRequest) -> Result<Car, AppError> {
        let now = Utc::now();

        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (
                id, user_id, car_name, registration_number, chassis_number, engine_number,
                make, model, year, color, fuel_type, puc_expiry, insurance_expiry,
                insurance_provider, notes, rc_book_url, insurance_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(request.car_name)
        .bind(request.registration_number)
        .bind(request.chassis_number)
        .bind(request.engine_number)
        .bind(request.make)
        .bind(request.model)
        .bind(request.year)
        .bind(request.color)
        .bind(request.fuel_type)
        .bind(request.puc_expiry)
        .bind(request.insurance_expiry)
        .bind(request.insurance_provider)
        .bind(request.notes)
        .bind(request.rc_book_url)
        .bind(request.insurance_url)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Car>, AppError> {
        let cars =
            sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE user_id = $1 ORDER BY created_at DESC")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(cars)
    }

    pub async fn registration_exists(
        &self,
        registration_number: &str,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM cars WHERE registration_number = $1 AND user_id = $2)",
        )
        .bind(registration_number)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateCarRequest,
    ) -> Result<Car, AppError> {
        // Obtener coche actual
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        // Verificar que pertenece al usuario
        if current.user_id != user_id {
            return Err(AppError::Forbidden(
                "Car does not belong to this user".to_string(),
            ));
        }

        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET car_name = $2, registration_number = $3, chassis_number = $4, engine_number = $5,
                make = $6, model = $7, year = $8, color = $9, fuel_type = $10, puc_expiry = $11,
                insurance_expiry = $12, insurance_provider = $13, notes = $14, rc_book_url = $15,
                insurance_url = $16, updated_at = $17
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.car_name.unwrap_or(current.car_name))
        .bind(request.registration_number.unwrap_or(current.registration_number))
        .bind(request.chassis_number.or(current.chassis_number))
        .bind(request.engine_number.or(current.engine_number))
        .bind(request.make.or(current.make))
        .bind(request.model.or(current.model))
        .bind(request.year.or(current.year))
        .bind(request.color.or(current.color))
        .bind(request.fuel_type.or(current.fuel_type))
        .bind(request.puc_expiry.or(current.puc_expiry))
        .bind(request.insurance_expiry.or(current.insurance_expiry))
        .bind(request.insurance_provider.or(current.insurance_provider))
        .bind(request.notes.or(current.notes))
        .bind(request.rc_book_url.or(current.rc_book_url))
        .bind(request.insurance_url.or(current.insurance_url))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        // Verificar que pertenece al usuario
        let car = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        if car.user_id != user_id {
            return Err(AppError::Forbidden(
                "Car does not belong to this user".to_string(),
            ));
        }

        sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
