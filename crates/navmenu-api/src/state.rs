use std::sync::Arc;

use navmenu_core::repositories::{MenuRepository, ModuleRepository};
use navmenu_core::services::{MenuService, ModuleService};
use navmenu_shared::config::{AppSettings, MenuSettings};
use navmenu_shared::StorageBackend;

pub type Modules = ModuleService<dyn ModuleRepository>;
pub type Menus = MenuService<dyn ModuleRepository, dyn MenuRepository>;

#[derive(Clone)]
pub struct AppState {
    pub modules: Arc<Modules>,
    pub menus: Arc<Menus>,
    pub service_name: Arc<str>,
    pub storage: StorageBackend,
}

impl AppState {
    pub fn new(
        module_repo: Arc<dyn ModuleRepository>,
        menu_repo: Arc<dyn MenuRepository>,
        app: &AppSettings,
        menu: &MenuSettings,
    ) -> Self {
        let modules = ModuleService::new(module_repo.clone());
        let menus = MenuService::new(module_repo, menu_repo)
            .with_single_root(menu.single_root_per_module);

        Self {
            modules: Arc::new(modules),
            menus: Arc::new(menus),
            service_name: Arc::from(app.name.as_str()),
            storage: app.storage,
        }
    }
}
