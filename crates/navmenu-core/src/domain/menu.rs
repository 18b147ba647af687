// ============================================================================
// Navmenu Core - Menu Entity
// File: crates/navmenu-core/src/domain/menu.rs
// Description: Menu node, sibling groups and update commands
// ============================================================================

use navmenu_shared::constants::{FIRST_ORDER, MAX_NAME_LENGTH};
use navmenu_shared::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{check, normalize_menu_name, validate_not_blank, FieldErrors};

/// Menu entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: EntityId,
    pub name: String,
    pub module_id: EntityId,
    pub parent_id: Option<EntityId>,
    pub order: i32,
}

impl Menu {
    pub fn sibling_group(&self) -> SiblingGroup {
        SiblingGroup::new(self.module_id, self.parent_id)
    }
}

/// Menus sharing a module and a parent. `parent_id = None` is the root group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiblingGroup {
    pub module_id: EntityId,
    pub parent_id: Option<EntityId>,
}

impl SiblingGroup {
    pub fn new(module_id: EntityId, parent_id: Option<EntityId>) -> Self {
        Self { module_id, parent_id }
    }

    pub fn root(module_id: EntityId) -> Self {
        Self::new(module_id, None)
    }

    pub fn contains(&self, menu: &Menu) -> bool {
        menu.module_id == self.module_id && menu.parent_id == self.parent_id
    }
}

/// Menu creation request as received from a client. `module` is ignored when
/// `parent` is given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateMenu {
    pub name: String,
    #[serde(default)]
    pub module: Option<EntityId>,
    #[serde(default)]
    pub parent: Option<EntityId>,
}

/// Validated menu row ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewMenu {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = MAX_NAME_LENGTH)
    )]
    pub name: String,
    pub module_id: EntityId,
    pub parent_id: Option<EntityId>,
    pub order: i32,
}

impl NewMenu {
    pub fn new(
        name: &str,
        module_id: EntityId,
        parent_id: Option<EntityId>,
        order: i32,
    ) -> Result<Self, FieldErrors> {
        let menu = Self {
            name: normalize_menu_name(name),
            module_id,
            parent_id,
            order,
        };

        check(&menu)?;
        Ok(menu)
    }

    /// Field rules of a menu name alone, before its placement is known.
    pub fn check_name(name: &str) -> Result<(), FieldErrors> {
        check(&Self {
            name: normalize_menu_name(name),
            module_id: 0,
            parent_id: None,
            order: FIRST_ORDER,
        })
    }

    pub fn sibling_group(&self) -> SiblingGroup {
        SiblingGroup::new(self.module_id, self.parent_id)
    }
}

/// Mutation requested on an existing menu. The transport layer picks the
/// variant (rename on PUT, move on PATCH).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuUpdate {
    Rename { name: String },
    Move { order: i32 },
}
