// ============================================================================
// Navmenu Core - Module Entity
// File: crates/navmenu-core/src/domain/module.rs
// Description: Top-level container of a menu tree
// ============================================================================

use navmenu_shared::constants::MAX_NAME_LENGTH;
use navmenu_shared::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{check, normalize_module_name, validate_not_blank, FieldErrors};

/// Module entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: EntityId,
    pub name: String,
}

/// A module that passed normalization and field validation, ready to persist.
/// Uniqueness is checked by the service against the store.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewModule {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = MAX_NAME_LENGTH)
    )]
    pub name: String,
}

impl NewModule {
    pub fn new(name: &str) -> Result<Self, FieldErrors> {
        let module = Self {
            name: normalize_module_name(name),
        };

        check(&module)?;
        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{BLANK_MESSAGE, MAX_LENGTH_MESSAGE};

    #[test]
    fn test_new_module_normalizes_name() {
        let module = NewModule::new("    Module 1    ").unwrap();
        assert_eq!(module.name, "Module 1");

        let module = NewModule::new("  New Module  ").unwrap();
        assert_eq!(module.name, "New module");
    }

    #[test]
    fn test_blank_name_rejected() {
        let errors = NewModule::new("     ").unwrap_err();
        assert_eq!(errors.get("name"), Some(&[BLANK_MESSAGE.to_string()][..]));
    }

    #[test]
    fn test_name_max_length() {
        assert!(NewModule::new("Module 89012345").is_ok());

        let errors = NewModule::new("Module 890123456").unwrap_err();
        assert_eq!(errors.get("name"), Some(&[MAX_LENGTH_MESSAGE.to_string()][..]));
    }

    #[test]
    fn test_length_counts_characters_after_trim() {
        assert!(NewModule::new("   Módulo ñandú 1   ").is_ok());
    }
}
