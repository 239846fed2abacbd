pub mod auth;
pub mod earning;
pub mod guild;
pub mod tenant_config;
pub mod user;
