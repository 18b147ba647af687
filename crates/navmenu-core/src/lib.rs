//! # Navmenu Core
//! 
//! Domain entities, repository traits and the menu ordering / tree services.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod validation;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, EntityKind};
pub use validation::FieldErrors;
