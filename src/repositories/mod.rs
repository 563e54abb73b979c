pub mod car_repository;
pub mod document_repository;
pub mod notification_repository;
pub mod user_repository;
