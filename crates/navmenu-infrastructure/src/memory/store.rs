// ============================================================================
// Navmenu Infrastructure - In-Memory Store
// File: crates/navmenu-infrastructure/src/memory/store.rs
// ============================================================================
//! Both repositories over one pair of maps behind a single lock, so every
//! multi-row write (shift, delete with gap closing) is atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use navmenu_core::domain::{Menu, Module, NewMenu, NewModule, SiblingGroup};
use navmenu_core::error::{DomainError, EntityKind};
use navmenu_core::repositories::{MenuRepository, ModuleRepository};
use navmenu_core::services::ShiftPlan;
use navmenu_core::validation::MODULE_EXISTS_MESSAGE;
use navmenu_shared::EntityId;

#[derive(Debug, Default)]
struct Tables {
    modules: BTreeMap<EntityId, Module>,
    menus: BTreeMap<EntityId, Menu>,
    last_module_id: EntityId,
    last_menu_id: EntityId,
}

impl Tables {
    fn name_taken(&self, name: &str, exclude: Option<EntityId>) -> bool {
        self.modules
            .values()
            .any(|m| m.name == name && Some(m.id) != exclude)
    }

    fn siblings_mut(&mut self, group: SiblingGroup) -> impl Iterator<Item = &mut Menu> {
        self.menus.values_mut().filter(move |m| group.contains(m))
    }
}

fn name_taken_error() -> DomainError {
    DomainError::IntegrityConstraint {
        field: "name".to_string(),
        message: MODULE_EXISTS_MESSAGE.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModuleRepository for InMemoryStore {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Module>, DomainError> {
        Ok(self.tables.read().await.modules.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Module>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.modules.values().find(|m| m.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Module>, DomainError> {
        Ok(self.tables.read().await.modules.values().cloned().collect())
    }

    async fn create(&self, module: &NewModule) -> Result<Module, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(&module.name, None) {
            warn!("Module name collision on write: {}", module.name);
            return Err(name_taken_error());
        }

        tables.last_module_id += 1;
        let created = Module {
            id: tables.last_module_id,
            name: module.name.clone(),
        };
        tables.modules.insert(created.id, created.clone());

        info!("Module created successfully: {}", created.id);
        Ok(created)
    }

    async fn update_name(&self, id: EntityId, name: &str) -> Result<Module, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(name, Some(id)) {
            return Err(name_taken_error());
        }

        let module = tables
            .modules
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Module, id))?;
        module.name = name.to_string();
        Ok(module.clone())
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.modules.contains_key(&id) {
            return Err(DomainError::not_found(EntityKind::Module, id));
        }
        if tables.menus.values().any(|m| m.module_id == id) {
            warn!("Refusing to delete module {} still referenced by menus", id);
            return Err(DomainError::ReferentialProtection { entity: EntityKind::Module, id });
        }

        tables.modules.remove(&id);
        info!("Module deleted: {}", id);
        Ok(())
    }
}

#[async_trait]
impl MenuRepository for InMemoryStore {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Menu>, DomainError> {
        Ok(self.tables.read().await.menus.get(&id).cloned())
    }

    async fn list(&self, module_id: Option<EntityId>) -> Result<Vec<Menu>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .menus
            .values()
            .filter(|m| module_id.map_or(true, |id| m.module_id == id))
            .cloned()
            .collect())
    }

    async fn count_siblings(&self, group: &SiblingGroup) -> Result<i64, DomainError> {
        let tables = self.tables.read().await;
        let count = tables.menus.values().filter(|m| group.contains(m)).count();
        Ok(count as i64)
    }

    async fn create(&self, menu: &NewMenu) -> Result<Menu, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.modules.contains_key(&menu.module_id) {
            return Err(DomainError::DatabaseError(format!(
                "module {} referenced by menu does not exist",
                menu.module_id
            )));
        }
        if let Some(parent_id) = menu.parent_id {
            if !tables.menus.contains_key(&parent_id) {
                return Err(DomainError::DatabaseError(format!(
                    "parent menu {} does not exist",
                    parent_id
                )));
            }
        }

        tables.last_menu_id += 1;
        let created = Menu {
            id: tables.last_menu_id,
            name: menu.name.clone(),
            module_id: menu.module_id,
            parent_id: menu.parent_id,
            order: menu.order,
        };
        tables.menus.insert(created.id, created.clone());

        info!("Menu created successfully: {}", created.id);
        Ok(created)
    }

    async fn update_name(&self, id: EntityId, name: &str) -> Result<Menu, DomainError> {
        let mut tables = self.tables.write().await;
        let menu = tables
            .menus
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Menu, id))?;
        menu.name = name.to_string();
        Ok(menu.clone())
    }

    async fn apply_shift(&self, plan: &ShiftPlan) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let current = tables
            .menus
            .get(&plan.menu_id)
            .filter(|m| plan.group.contains(m))
            .map(|m| m.order);
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

        let size = tables.menus.values().filter(|m| plan.group.contains(m)).count() as i32;
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

        for menu in tables.siblings_mut(plan.group) {
            menu.order = plan.reordered(menu.id, menu.order);
        }

        debug!("Menu {} moved {} -> {}", plan.menu_id, plan.from, plan.to);
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let Some(menu) = tables.menus.get(&id).cloned() else {
            return Err(DomainError::not_found(EntityKind::Menu, id));
        };
        if tables.menus.values().any(|m| m.parent_id == Some(id)) {
            warn!("Refusing to delete menu {} that still has children", id);
            return Err(DomainError::ReferentialProtection { entity: EntityKind::Menu, id });
        }

        tables.menus.remove(&id);
        for sibling in tables.siblings_mut(menu.sibling_group()) {
            if sibling.order > menu.order {
                sibling.order -= 1;
            }
        }

        info!("Menu deleted: {}", id);
        Ok(())
    }
}
