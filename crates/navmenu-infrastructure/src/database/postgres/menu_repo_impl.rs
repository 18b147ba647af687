// ============================================================================
// Navmenu Infrastructure - PostgreSQL Menu Repository
// File: crates/navmenu-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info, warn};

use navmenu_core::domain::{Menu, NewMenu, SiblingGroup};
use navmenu_core::error::{DomainError, EntityKind};
use navmenu_core::repositories::MenuRepository;
use navmenu_core::services::ShiftPlan;
use navmenu_shared::EntityId;

use super::{database_error, is_foreign_key_violation};

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: i64,
    pub name: String,
    pub module_id: i64,
    pub parent_id: Option<i64>,
    pub menu_order: i32,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            name: row.name,
            module_id: row.module_id,
            parent_id: row.parent_id,
            order: row.menu_order,
        }
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Menu>, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            "SELECT id, name, module_id, parent_id, menu_order FROM menus WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding menu by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, module_id: Option<EntityId>) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT id, name, module_id, parent_id, menu_order
            FROM menus
            WHERE $1::BIGINT IS NULL OR module_id = $1
            ORDER BY module_id, id
            "#
        )
        .bind(module_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing menus", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_siblings(&self, group: &SiblingGroup) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM menus WHERE module_id = $1 AND parent_id IS NOT DISTINCT FROM $2"
        )
        .bind(group.module_id)
        .bind(group.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("counting sibling menus", e))
    }

    async fn create(&self, menu: &NewMenu) -> Result<Menu, DomainError> {
        info!("Creating menu: {} (module {}, order {})", menu.name, menu.module_id, menu.order);

        let row: MenuRow = sqlx::query_as(
            r#"
            INSERT INTO menus (name, module_id, parent_id, menu_order)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, module_id, parent_id, menu_order
            "#
        )
        .bind(&menu.name)
        .bind(menu.module_id)
        .bind(menu.parent_id)
        .bind(menu.order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("creating menu", e))?;

        info!("Menu created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update_name(&self, id: EntityId, name: &str) -> Result<Menu, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            UPDATE menus
            SET name = $2
            WHERE id = $1
            RETURNING id, name, module_id, parent_id, menu_order
            "#
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("renaming menu", e))?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::not_found(EntityKind::Menu, id))
    }

    async fn apply_shift(&self, plan: &ShiftPlan) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("starting shift transaction", e))?;

        // Lock the whole sibling group so concurrent moves serialize.
        let locked: Vec<(i64, i32)> = sqlx::query_as(
            r#"
            SELECT id, menu_order
            FROM menus
            WHERE module_id = $1 AND parent_id IS NOT DISTINCT FROM $2
            ORDER BY id
            FOR UPDATE
            "#
        )
        .bind(plan.group.module_id)
        .bind(plan.group.parent_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| database_error("locking sibling group", e))?;

        let current = locked
            .iter()
            .find(|(id, _)| *id == plan.menu_id)
            .map(|(_, order)| *order);
        if current != Some(plan.from) {
            warn!(
                "Menu {} moved concurrently (expected order {}, found {:?})",
                plan.menu_id, plan.from, current
            );
            return Err(DomainError::Conflict(format!(
                "menu {} is no longer at position {}",
                plan.menu_id, plan.from
            )));
        }

        let size = locked.len() as i32;
        if !(1..=size).contains(&plan.to) {
            warn!(
                "Sibling group of menu {} shrank to {} before moving to {}",
                plan.menu_id, size, plan.to
            );
            return Err(DomainError::Conflict(format!(
                "position {} no longer exists in a group of {}",
                plan.to, size
            )));
        }

        let shifted = sqlx::query(
            r#"
            UPDATE menus
            SET menu_order = menu_order + $1
            WHERE module_id = $2
              AND parent_id IS NOT DISTINCT FROM $3
              AND id <> $4
              AND menu_order BETWEEN $5 AND $6
            "#
        )
        .bind(plan.delta())
        .bind(plan.group.module_id)
        .bind(plan.group.parent_id)
        .bind(plan.menu_id)
        .bind(plan.lo())
        .bind(plan.hi())
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error("shifting sibling menus", e))?;

        sqlx::query("UPDATE menus SET menu_order = $1 WHERE id = $2")
            .bind(plan.to)
            .bind(plan.menu_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("placing moved menu", e))?;

        tx.commit()
            .await
            .map_err(|e| database_error("committing shift", e))?;

        debug!(
            "Menu {} moved {} -> {}, {} siblings shifted",
            plan.menu_id, plan.from, plan.to, shifted.rows_affected()
        );
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("starting delete transaction", e))?;

        let row: Option<MenuRow> = sqlx::query_as(
            "SELECT id, name, module_id, parent_id, menu_order FROM menus WHERE id = $1 FOR UPDATE"
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| database_error("locking menu for delete", e))?;

        let Some(menu) = row.map(Menu::from) else {
            return Err(DomainError::not_found(EntityKind::Menu, id));
        };

        sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    warn!("Refusing to delete menu {} that still has children", id);
                    DomainError::ReferentialProtection { entity: EntityKind::Menu, id }
                } else {
                    database_error("deleting menu", e)
                }
            })?;

        sqlx::query(
            r#"
            UPDATE menus
            SET menu_order = menu_order - 1
            WHERE module_id = $1
              AND parent_id IS NOT DISTINCT FROM $2
              AND menu_order > $3
            "#
        )
        .bind(menu.module_id)
        .bind(menu.parent_id)
        .bind(menu.order)
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error("closing order gap", e))?;

        tx.commit()
            .await
            .map_err(|e| database_error("committing delete", e))?;

        info!("Menu deleted: {}", id);
        Ok(())
    }
}
