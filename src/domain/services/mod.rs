pub mod access;
pub mod auth_service;
pub mod password;
pub mod token;
