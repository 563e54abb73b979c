pub mod auth_dto;
pub mod car_dto;
pub mod document_dto;
pub mod mechanic_dto;
pub mod notification_dto;
