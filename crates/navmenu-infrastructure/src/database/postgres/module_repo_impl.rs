// ============================================================================
// Navmenu Infrastructure - PostgreSQL Module Repository
// File: crates/navmenu-infrastructure/src/database/postgres/module_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{error, info, warn};

use navmenu_core::domain::{Module, NewModule};
use navmenu_core::error::{DomainError, EntityKind};
use navmenu_core::repositories::ModuleRepository;
use navmenu_core::validation::MODULE_EXISTS_MESSAGE;
use navmenu_shared::EntityId;

use super::{database_error, is_foreign_key_violation, is_unique_violation};

pub struct PgModuleRepository {
    pool: PgPool,
}

impl PgModuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ModuleRow {
    pub id: i64,
    pub name: String,
}

impl From<ModuleRow> for Module {
    fn from(row: ModuleRow) -> Self {
        Module {
            id: row.id,
            name: row.name,
        }
    }
}

fn name_taken(e: sqlx::Error, name: &str) -> DomainError {
    if is_unique_violation(&e) {
        warn!("Module name collision on write: {}", name);
        DomainError::IntegrityConstraint {
            field: "name".to_string(),
            message: MODULE_EXISTS_MESSAGE.to_string(),
        }
    } else {
        database_error("writing module", e)
    }
}

#[async_trait]
impl ModuleRepository for PgModuleRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Module>, DomainError> {
        let row: Option<ModuleRow> = sqlx::query_as("SELECT id, name FROM modules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("finding module by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Module>, DomainError> {
        let row: Option<ModuleRow> = sqlx::query_as("SELECT id, name FROM modules WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("finding module by name", e))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Module>, DomainError> {
        let rows: Vec<ModuleRow> = sqlx::query_as("SELECT id, name FROM modules ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("listing modules", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, module: &NewModule) -> Result<Module, DomainError> {
        info!("Creating module: {}", module.name);

        let row: ModuleRow = sqlx::query_as(
            r#"
            INSERT INTO modules (name)
            VALUES ($1)
            RETURNING id, name
            "#
        )
        .bind(&module.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| name_taken(e, &module.name))?;

        info!("Module created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update_name(&self, id: EntityId, name: &str) -> Result<Module, DomainError> {
        let row: Option<ModuleRow> = sqlx::query_as(
            r#"
            UPDATE modules
            SET name = $2
            WHERE id = $1
            RETURNING id, name
            "#
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| name_taken(e, name))?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::not_found(EntityKind::Module, id))
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    warn!("Refusing to delete module {} still referenced by menus", id);
                    DomainError::ReferentialProtection { entity: EntityKind::Module, id }
                } else {
                    error!("Database error deleting module: {}", e);
                    DomainError::DatabaseError(e.to_string())
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::Module, id));
        }

        info!("Module deleted: {}", id);
        Ok(())
    }
}
