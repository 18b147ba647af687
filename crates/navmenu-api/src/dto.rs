//! Request payloads. Every field is optional on the wire so a missing value
//! is reported as a field error rather than a decoding failure.

use navmenu_core::validation::REQUIRED_MESSAGE;
use navmenu_core::{CreateMenu, DomainError, MenuUpdate};
use navmenu_shared::EntityId;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct NamePayload {
    #[serde(default)]
    pub name: Option<String>,
}

impl NamePayload {
    pub fn into_name(self) -> Result<String, DomainError> {
        self.name.ok_or_else(|| DomainError::invalid("name", REQUIRED_MESSAGE))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateMenuPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub module: Option<EntityId>,
    #[serde(default)]
    pub parent: Option<EntityId>,
}

impl CreateMenuPayload {
    pub fn into_command(self) -> Result<CreateMenu, DomainError> {
        let name = self.name.ok_or_else(|| DomainError::invalid("name", REQUIRED_MESSAGE))?;
        Ok(CreateMenu {
            name,
            module: self.module,
            parent: self.parent,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderPayload {
    #[serde(default)]
    pub order: Option<i32>,
}

impl OrderPayload {
    pub fn into_update(self) -> Result<MenuUpdate, DomainError> {
        let order = self.order.ok_or_else(|| DomainError::invalid("order", REQUIRED_MESSAGE))?;
        Ok(MenuUpdate::Move { order })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuFilter {
    pub module: Option<EntityId>,
}
