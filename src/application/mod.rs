/// Authentication session
pub mod auth;
/// Client facade
pub mod client;
/// Application configuration module
pub mod config;
/// Service interfaces
pub mod interfaces;
/// Resource services
pub mod services;
