pub mod auth;
pub mod config;
pub mod earning;
pub mod guild;
pub mod health;
pub mod user;
