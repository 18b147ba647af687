//! Repository traits (ports)

pub mod module_repository;
pub mod menu_repository;

pub use module_repository::ModuleRepository;
pub use menu_repository::MenuRepository;

#[cfg(test)]
pub use module_repository::MockModuleRepository;
#[cfg(test)]
pub use menu_repository::MockMenuRepository;
