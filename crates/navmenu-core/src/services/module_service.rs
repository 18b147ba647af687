// ============================================================================
// Navmenu Core - Module Service
// File: crates/navmenu-core/src/services/module_service.rs
// ============================================================================
//! Module create / rename / delete with name normalization and uniqueness.

use std::sync::Arc;

use async_trait::async_trait;
use navmenu_shared::EntityId;
use tracing::instrument;

use crate::domain::{Module, NewModule};
use crate::error::{DomainError, EntityKind};
use crate::repositories::ModuleRepository;
use crate::services::operations::ResourceOperations;
use crate::validation::{FieldErrors, MODULE_EXISTS_MESSAGE};

pub struct ModuleService<R: ModuleRepository + ?Sized> {
    module_repo: Arc<R>,
}

impl<R: ModuleRepository + ?Sized> ModuleService<R> {
    pub fn new(module_repo: Arc<R>) -> Self {
        Self { module_repo }
    }

    pub async fn list(&self) -> Result<Vec<Module>, DomainError> {
        self.module_repo.list().await
    }

    pub async fn find_by_pk(&self, id: EntityId) -> Result<Module, DomainError> {
        self.module_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Module, id))
    }

    /// Create a module. The name is trimmed and capitalized before any check.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_module(&self, name: &str) -> Result<Module, DomainError> {
        let module = NewModule::new(name)?;
        self.ensure_unique(&module.name, None).await?;
        self.module_repo.create(&module).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn update_name(&self, id: EntityId, name: &str) -> Result<Module, DomainError> {
        let existing = self.find_by_pk(id).await?;
        let module = NewModule::new(name)?;
        if module.name == existing.name {
            return Ok(existing);
        }

        self.ensure_unique(&module.name, Some(id)).await?;
        self.module_repo.update_name(id, &module.name).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        self.find_by_pk(id).await?;
        self.module_repo.delete(id).await
    }

    async fn ensure_unique(&self, name: &str, exclude: Option<EntityId>) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();
        if let Some(found) = self.module_repo.find_by_name(name).await? {
            if Some(found.id) != exclude {
                errors.push("name", MODULE_EXISTS_MESSAGE);
            }
        }
        errors.into_result().map_err(DomainError::from)
    }
}

#[async_trait]
impl<R: ModuleRepository + ?Sized> ResourceOperations for ModuleService<R> {
    type Entity = Module;
    type Create = String;
    type Update = String;

    const KIND: EntityKind = EntityKind::Module;

    async fn create(&self, name: String) -> Result<Module, DomainError> {
        self.create_module(&name).await
    }

    async fn find(&self, id: EntityId) -> Result<Module, DomainError> {
        self.find_by_pk(id).await
    }

    async fn update(&self, id: EntityId, name: String) -> Result<Module, DomainError> {
        self.update_name(id, &name).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        ModuleService::delete(self, id).await
    }
}
