/// Module containing environment based configuration helpers
pub mod config;
/// Module containing date range parsing and clamping
pub mod date_range;
/// Module containing utilities for handling unique identifiers
pub mod id;
/// Module containing logging utilities
pub mod logger;

pub use date_range::*;
pub use id::*;
pub use logger::*;
