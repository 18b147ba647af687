//! Domain services (business logic)

pub mod ordering;
pub mod tree_builder;
pub mod operations;
pub mod module_service;
pub mod menu_service;

pub use ordering::{OrderingEngine, ShiftPlan};
pub use tree_builder::TreeBuilder;
pub use operations::ResourceOperations;
pub use module_service::ModuleService;
pub use menu_service::MenuService;
