//! Module repository trait (port)

use async_trait::async_trait;
use navmenu_shared::EntityId;

use crate::domain::{Module, NewModule};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModuleRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Module>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Module>, DomainError>;
    /// All modules ordered by id.
    async fn list(&self) -> Result<Vec<Module>, DomainError>;
    /// Fails with `IntegrityConstraint` when the name is already taken.
    async fn create(&self, module: &NewModule) -> Result<Module, DomainError>;
    async fn update_name(&self, id: EntityId, name: &str) -> Result<Module, DomainError>;
    /// Fails with `ReferentialProtection` while menus belong to the module.
    async fn delete(&self, id: EntityId) -> Result<(), DomainError>;
}
