//! Menu repository trait (port)

use async_trait::async_trait;
use navmenu_shared::EntityId;

use crate::domain::{Menu, NewMenu, SiblingGroup};
use crate::error::DomainError;
use crate::services::ordering::ShiftPlan;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Menu>, DomainError>;
    /// Menus of one module, or of every module when `module_id` is `None`.
    async fn list(&self, module_id: Option<EntityId>) -> Result<Vec<Menu>, DomainError>;
    async fn count_siblings(&self, group: &SiblingGroup) -> Result<i64, DomainError>;
    async fn create(&self, menu: &NewMenu) -> Result<Menu, DomainError>;
    async fn update_name(&self, id: EntityId, name: &str) -> Result<Menu, DomainError>;
    /// Applies the sibling shift and the target assignment of `plan` as one
    /// atomic unit. Fails with `Conflict` when the moved menu is no longer at
    /// `plan.from`.
    async fn apply_shift(&self, plan: &ShiftPlan) -> Result<(), DomainError>;
    /// Removes the menu and closes the gap it leaves among its siblings, in one
    /// transaction. Fails with `ReferentialProtection` while it has children.
    async fn delete(&self, id: EntityId) -> Result<(), DomainError>;
}
