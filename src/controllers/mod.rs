pub mod auth_controller;
pub mod car_controller;
pub mod document_controller;
pub mod notification_controller;
