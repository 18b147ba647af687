// ============================================================================
// Navmenu Core - Menu Service
// File: crates/navmenu-core/src/services/menu_service.rs
// ============================================================================
//! Menu operations: creation with sibling ordering, rename, move, delete and
//! tree retrieval.

use std::sync::Arc;

use async_trait::async_trait;
use navmenu_shared::EntityId;
use tracing::instrument;

use crate::domain::{CreateMenu, Menu, MenuUpdate, ModuleTree, NewMenu, SiblingGroup, TreeNode};
use crate::error::{DomainError, EntityKind};
use crate::repositories::{MenuRepository, ModuleRepository};
use crate::services::operations::ResourceOperations;
use crate::services::ordering::OrderingEngine;
use crate::services::tree_builder::TreeBuilder;
use crate::validation::{invalid_pk_message, FieldErrors, REQUIRED_MESSAGE, SINGLE_ROOT_MESSAGE};

pub struct MenuService<M, R>
where
    M: ModuleRepository + ?Sized,
    R: MenuRepository + ?Sized,
{
    module_repo: Arc<M>,
    menu_repo: Arc<R>,
    ordering: OrderingEngine<R>,
    single_root: bool,
}

impl<M, R> MenuService<M, R>
where
    M: ModuleRepository + ?Sized,
    R: MenuRepository + ?Sized,
{
    pub fn new(module_repo: Arc<M>, menu_repo: Arc<R>) -> Self {
        Self {
            module_repo,
            ordering: OrderingEngine::new(menu_repo.clone()),
            menu_repo,
            single_root: false,
        }
    }

    /// Allow at most one root menu per module.
    pub fn with_single_root(mut self, enabled: bool) -> Self {
        self.single_root = enabled;
        self
    }

    pub async fn find_by_pk(&self, id: EntityId) -> Result<Menu, DomainError> {
        self.menu_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Menu, id))
    }

    /// Create a menu at the end of its sibling group. When a parent is given
    /// the menu always joins the parent's module. Name and association errors
    /// are reported together.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_menu(&self, input: CreateMenu) -> Result<Menu, DomainError> {
        let mut errors = NewMenu::check_name(&input.name).err().unwrap_or_default();
        let Some(module_id) = self.resolve_module_id(&input, &mut errors).await? else {
            return Err(errors.into());
        };

        let group = SiblingGroup::new(module_id, input.parent);
        if self.single_root && input.parent.is_none() && self.menu_repo.count_siblings(&group).await? > 0 {
            errors.push("parent", SINGLE_ROOT_MESSAGE);
        }
        errors.into_result()?;

        let order = self.ordering.next_order(&group).await?;
        let menu = NewMenu::new(&input.name, module_id, input.parent, order)?;
        self.menu_repo.create(&menu).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn update_name(&self, id: EntityId, name: &str) -> Result<Menu, DomainError> {
        let existing = self.find_by_pk(id).await?;
        let menu = NewMenu::new(name, existing.module_id, existing.parent_id, existing.order)?;
        if menu.name == existing.name {
            return Ok(existing);
        }
        self.menu_repo.update_name(id, &menu.name).await
    }

    /// Move a menu to `new_order` inside its sibling group.
    pub async fn move_menu(&self, id: EntityId, new_order: i32) -> Result<Menu, DomainError> {
        self.ordering.shift(id, new_order).await
    }

    pub async fn apply(&self, id: EntityId, update: MenuUpdate) -> Result<Menu, DomainError> {
        match update {
            MenuUpdate::Rename { name } => self.update_name(id, &name).await,
            MenuUpdate::Move { order } => self.move_menu(id, order).await,
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        self.find_by_pk(id).await?;
        self.menu_repo.delete(id).await
    }

    /// Ordered forest of one module.
    pub async fn get_tree(&self, module_id: EntityId) -> Result<Vec<TreeNode>, DomainError> {
        self.module_repo
            .find_by_id(module_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Module, module_id))?;

        let nodes = self.menu_repo.list(Some(module_id)).await?;
        Ok(TreeBuilder::build(&nodes, module_id))
    }

    /// One forest per module, optionally restricted to a single module.
    pub async fn list_trees(&self, module_id: Option<EntityId>) -> Result<Vec<ModuleTree>, DomainError> {
        let nodes = self.menu_repo.list(module_id).await?;
        Ok(TreeBuilder::build_all(&nodes))
    }

    /// Module the new menu joins: the parent's when a parent is given, the
    /// requested one otherwise. `None` once a field error has been recorded.
    async fn resolve_module_id(
        &self,
        input: &CreateMenu,
        errors: &mut FieldErrors,
    ) -> Result<Option<EntityId>, DomainError> {
        if let Some(parent_id) = input.parent {
            return match self.menu_repo.find_by_id(parent_id).await? {
                Some(parent) => Ok(Some(parent.module_id)),
                None => {
                    errors.push("parent", invalid_pk_message(parent_id));
                    Ok(None)
                }
            };
        }

        let Some(module_id) = input.module else {
            errors.push("module", REQUIRED_MESSAGE);
            return Ok(None);
        };
        match self.module_repo.find_by_id(module_id).await? {
            Some(_) => Ok(Some(module_id)),
            None => {
                errors.push("module", invalid_pk_message(module_id));
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<M, R> ResourceOperations for MenuService<M, R>
where
    M: ModuleRepository + ?Sized,
    R: MenuRepository + ?Sized,
{
    type Entity = Menu;
    type Create = CreateMenu;
    type Update = MenuUpdate;

    const KIND: EntityKind = EntityKind::Menu;

    async fn create(&self, input: CreateMenu) -> Result<Menu, DomainError> {
        self.create_menu(input).await
    }

    async fn find(&self, id: EntityId) -> Result<Menu, DomainError> {
        self.find_by_pk(id).await
    }

    async fn update(&self, id: EntityId, input: MenuUpdate) -> Result<Menu, DomainError> {
        self.apply(id, input).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        MenuService::delete(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Module;
    use crate::repositories::{MockMenuRepository, MockModuleRepository};
    use crate::validation::{BLANK_MESSAGE, MAX_LENGTH_MESSAGE};
    use mockall::predicate::eq;

    fn menu(id: EntityId, module_id: EntityId, parent_id: Option<EntityId>, order: i32) -> Menu {
        Menu {
            id,
            name: format!("Menu {}", id),
            module_id,
            parent_id,
            order,
        }
    }

    fn modules_with(ids: &'static [EntityId]) -> MockModuleRepository {
        let mut repo = MockModuleRepository::new();
        repo.expect_find_by_id().returning(move |id| {
            Ok(ids.contains(&id).then(|| Module { id, name: format!("Module {}", id) }))
        });
        repo
    }

    fn create(name: &str, module: Option<EntityId>, parent: Option<EntityId>) -> CreateMenu {
        CreateMenu { name: name.to_string(), module, parent }
    }

    #[tokio::test]
    async fn test_create_root_menu_takes_next_order() {
        let mut menus = MockMenuRepository::new();
        menus.expect_count_siblings()
            .with(eq(SiblingGroup::root(1)))
            .returning(|_| Ok(1));
        menus.expect_create()
            .withf(|m| m.name == "Menu 2" && m.module_id == 1 && m.parent_id.is_none() && m.order == 2)
            .times(1)
            .returning(|m| Ok(Menu {
                id: 2,
                name: m.name.clone(),
                module_id: m.module_id,
                parent_id: m.parent_id,
                order: m.order,
            }));

        let service = MenuService::new(Arc::new(modules_with(&[1])), Arc::new(menus));
        let created = service.create_menu(create(" Menu 2 ", Some(1), None)).await.unwrap();
        assert_eq!(created.order, 2);
    }

    #[tokio::test]
    async fn test_child_menu_inherits_parent_module() {
        let mut menus = MockMenuRepository::new();
        menus.expect_find_by_id()
            .with(eq(10))
            .returning(|id| Ok(Some(menu(id, 7, None, 1))));
        menus.expect_count_siblings()
            .with(eq(SiblingGroup::new(7, Some(10))))
            .returning(|_| Ok(0));
        menus.expect_create()
            .withf(|m| m.module_id == 7 && m.parent_id == Some(10) && m.order == 1)
            .times(1)
            .returning(|m| Ok(Menu {
                id: 11,
                name: m.name.clone(),
                module_id: m.module_id,
                parent_id: m.parent_id,
                order: m.order,
            }));

        let mut modules = MockModuleRepository::new();
        modules.expect_find_by_id().never();

        let service = MenuService::new(Arc::new(modules), Arc::new(menus));
        let created = service.create_menu(create("Child", Some(3), Some(10))).await.unwrap();
        assert_eq!(created.module_id, 7);
    }

    #[tokio::test]
    async fn test_create_requires_module_or_parent() {
        let service = MenuService::new(
            Arc::new(MockModuleRepository::new()),
            Arc::new(MockMenuRepository::new()),
        );
        match service.create_menu(create("Menu", None, None)).await.unwrap_err() {
            DomainError::Validation(fields) => {
                assert_eq!(fields.get("module"), Some(&[REQUIRED_MESSAGE.to_string()][..]))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_with_unknown_parent_or_module() {
        let mut menus = MockMenuRepository::new();
        menus.expect_find_by_id().returning(|_| Ok(None));
        menus.expect_create().never();

        let service = MenuService::new(Arc::new(modules_with(&[])), Arc::new(menus));

        let err = service.create_menu(create("Menu", None, Some(5))).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref f) if f.has("parent")));

        let err = service.create_menu(create("Menu", Some(5), None)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref f) if f.has("module")));
    }

    #[tokio::test]
    async fn test_create_reports_name_and_parent_errors_together() {
        let mut menus = MockMenuRepository::new();
        menus.expect_find_by_id().with(eq(5)).returning(|_| Ok(None));
        menus.expect_create().never();

        let service = MenuService::new(Arc::new(modules_with(&[])), Arc::new(menus));
        match service.create_menu(create("   ", None, Some(5))).await.unwrap_err() {
            DomainError::Validation(fields) => {
                assert_eq!(fields.get("name"), Some(&[BLANK_MESSAGE.to_string()][..]));
                assert_eq!(fields.get("parent"), Some(&[invalid_pk_message(5)][..]));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_reports_long_name_with_second_root() {
        let mut menus = MockMenuRepository::new();
        menus.expect_count_siblings().returning(|_| Ok(1));
        menus.expect_create().never();

        let service = MenuService::new(Arc::new(modules_with(&[1])), Arc::new(menus))
            .with_single_root(true);
        match service.create_menu(create("Menu 89012345678", Some(1), None)).await.unwrap_err() {
            DomainError::Validation(fields) => {
                assert_eq!(fields.get("name"), Some(&[MAX_LENGTH_MESSAGE.to_string()][..]));
                assert_eq!(fields.get("parent"), Some(&[SINGLE_ROOT_MESSAGE.to_string()][..]));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_multiple_roots_allowed_by_default() {
        let mut menus = MockMenuRepository::new();
        menus.expect_count_siblings().returning(|_| Ok(3));
        menus.expect_create().times(1).returning(|m| Ok(Menu {
            id: 4,
            name: m.name.clone(),
            module_id: m.module_id,
            parent_id: None,
            order: m.order,
        }));

        let service = MenuService::new(Arc::new(modules_with(&[1])), Arc::new(menus));
        let created = service.create_menu(create("Menu 4", Some(1), None)).await.unwrap();
        assert_eq!(created.order, 4);
    }

    #[tokio::test]
    async fn test_single_root_policy() {
        let mut menus = MockMenuRepository::new();
        menus.expect_count_siblings().returning(|_| Ok(1));
        menus.expect_create().never();

        let service = MenuService::new(Arc::new(modules_with(&[1])), Arc::new(menus))
            .with_single_root(true);
        match service.create_menu(create("Menu 2", Some(1), None)).await.unwrap_err() {
            DomainError::Validation(fields) => {
                assert_eq!(fields.get("parent"), Some(&[SINGLE_ROOT_MESSAGE.to_string()][..]))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rename_keeps_order() {
        let mut menus = MockMenuRepository::new();
        menus.expect_find_by_id().returning(|id| Ok(Some(menu(id, 1, None, 3))));
        menus.expect_update_name()
            .with(eq(1), eq("Settings"))
            .times(1)
            .returning(|id, name| Ok(Menu { name: name.to_string(), ..menu(id, 1, None, 3) }));
        menus.expect_apply_shift().never();

        let service = MenuService::new(Arc::new(MockModuleRepository::new()), Arc::new(menus));
        let renamed = service
            .apply(1, MenuUpdate::Rename { name: "  Settings ".into() })
            .await
            .unwrap();
        assert_eq!((renamed.name.as_str(), renamed.order), ("Settings", 3));
    }

    #[tokio::test]
    async fn test_move_dispatches_to_ordering_engine() {
        let mut menus = MockMenuRepository::new();
        menus.expect_find_by_id().returning(|id| Ok(Some(menu(id, 1, None, 1))));
        menus.expect_count_siblings().returning(|_| Ok(2));
        menus.expect_apply_shift().times(1).returning(|_| Ok(()));
        menus.expect_update_name().never();

        let service = MenuService::new(Arc::new(MockModuleRepository::new()), Arc::new(menus));
        let moved = ResourceOperations::update(&service, 1, MenuUpdate::Move { order: 2 })
            .await
            .unwrap();
        assert_eq!(moved.order, 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_menu() {
        let mut menus = MockMenuRepository::new();
        menus.expect_find_by_id().returning(|_| Ok(None));
        menus.expect_delete().never();

        let service = MenuService::new(Arc::new(MockModuleRepository::new()), Arc::new(menus));
        let err = service.delete(9).await.unwrap_err();
        assert_eq!(err.to_string(), "The menu with the pk = 9 does not exist");
    }

    #[tokio::test]
    async fn test_get_tree_for_unknown_module() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list().never();

        let service = MenuService::new(Arc::new(modules_with(&[])), Arc::new(menus));
        let err = service.get_tree(3).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::Module, id: 3 }));
    }

    #[tokio::test]
    async fn test_get_tree_builds_forest() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list()
            .with(eq(Some(1)))
            .returning(|_| Ok(vec![menu(3, 1, Some(1), 2), menu(1, 1, None, 1), menu(2, 1, Some(1), 1)]));

        let service = MenuService::new(Arc::new(modules_with(&[1])), Arc::new(menus));
        let forest = service.get_tree(1).await.unwrap();
        assert_eq!(forest.len(), 1);
        let children: Vec<_> = forest[0].children.iter().map(|c| c.id).collect();
        assert_eq!(children, vec![2, 3]);
    }
}
