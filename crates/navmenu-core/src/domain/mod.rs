//! # Navmenu Core - Domain Module
//! 
//! Domain entities for the navigation menu service.

pub mod module;
pub mod menu;
pub mod tree;

// Re-export all entities
pub use module::{Module, NewModule};
pub use menu::{CreateMenu, Menu, MenuUpdate, NewMenu, SiblingGroup};
pub use tree::{ModuleTree, TreeNode};
