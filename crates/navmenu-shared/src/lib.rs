//! # Navmenu Shared
//! 
//! Shared types, constants, configuration and telemetry for the navigation menu service.

pub mod constants;
pub mod types;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
