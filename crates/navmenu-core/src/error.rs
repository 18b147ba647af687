//! Domain errors

use std::fmt;

use navmenu_shared::EntityId;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Entity named in not-found and protected-delete messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Module,
    Menu,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Module => "module",
            EntityKind::Menu => "menu",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("The {entity} with the pk = {id} does not exist")]
    NotFound { entity: EntityKind, id: EntityId },

    #[error("The {entity} with the pk = {id} cannot be deleted because menus still reference it")]
    ReferentialProtection { entity: EntityKind, id: EntityId },

    #[error("Integrity constraint violated on {field}: {message}")]
    IntegrityConstraint { field: String, message: String },

    #[error("Order conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn not_found(entity: EntityKind, id: EntityId) -> Self {
        DomainError::NotFound { entity, id }
    }

    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        DomainError::Validation(FieldErrors::single(field, message))
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        DomainError::Validation(errors)
    }
}
