//! PostgreSQL repository implementations

pub mod module_repo_impl;
pub mod menu_repo_impl;

pub use module_repo_impl::PgModuleRepository;
pub use menu_repo_impl::PgMenuRepository;

use navmenu_core::error::DomainError;
use tracing::error;

pub(crate) fn database_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
