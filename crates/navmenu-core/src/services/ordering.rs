// ============================================================================
// Navmenu Core - Ordering Engine
// File: crates/navmenu-core/src/services/ordering.rs
// ============================================================================
//! Sibling ordering: insertion position and moves inside a dense `1..=N` rank.

use std::sync::Arc;

use navmenu_shared::constants::FIRST_ORDER;
use navmenu_shared::EntityId;
use tracing::instrument;

use crate::domain::{Menu, SiblingGroup};
use crate::error::{DomainError, EntityKind};
use crate::repositories::MenuRepository;
use crate::validation::order_out_of_range_message;

/// Move of one menu inside its sibling group.
///
/// Siblings whose order lies in `[lo, hi]` move one step towards the slot the
/// menu leaves; the menu itself lands on `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPlan {
    pub menu_id: EntityId,
    pub group: SiblingGroup,
    pub from: i32,
    pub to: i32,
}

impl ShiftPlan {
    pub fn lo(&self) -> i32 {
        self.from.min(self.to)
    }

    pub fn hi(&self) -> i32 {
        self.from.max(self.to)
    }

    /// -1 when moving later in the group, +1 when moving earlier.
    pub fn delta(&self) -> i32 {
        if self.from < self.to {
            -1
        } else {
            1
        }
    }

    /// Order a member of the group ends up with once the plan is applied.
    pub fn reordered(&self, id: EntityId, order: i32) -> i32 {
        if id == self.menu_id {
            self.to
        } else if (self.lo()..=self.hi()).contains(&order) {
            order + self.delta()
        } else {
            order
        }
    }
}

pub struct OrderingEngine<R: MenuRepository + ?Sized> {
    menus: Arc<R>,
}

impl<R: MenuRepository + ?Sized> OrderingEngine<R> {
    pub fn new(menus: Arc<R>) -> Self {
        Self { menus }
    }

    /// Position a new member of `group` takes: one past the current count.
    pub async fn next_order(&self, group: &SiblingGroup) -> Result<i32, DomainError> {
        let count = self.sibling_count(group).await?;
        Ok(count + FIRST_ORDER)
    }

    /// `None` when the menu already sits at `new_order`.
    pub fn plan(menu: &Menu, new_order: i32) -> Option<ShiftPlan> {
        if menu.order == new_order {
            return None;
        }
        Some(ShiftPlan {
            menu_id: menu.id,
            group: menu.sibling_group(),
            from: menu.order,
            to: new_order,
        })
    }

    /// Moves the menu to `new_order` and returns it at its new position.
    #[instrument(level = "debug", skip(self))]
    pub async fn shift(&self, menu_id: EntityId, new_order: i32) -> Result<Menu, DomainError> {
        let menu = self
            .menus
            .find_by_id(menu_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Menu, menu_id))?;

        let Some(plan) = Self::plan(&menu, new_order) else {
            return Ok(menu);
        };

        let count = self.sibling_count(&plan.group).await?;
        if !(FIRST_ORDER..=count).contains(&new_order) {
            return Err(DomainError::invalid("order", order_out_of_range_message(count)));
        }

        self.menus.apply_shift(&plan).await?;

        Ok(Menu {
            order: new_order,
            ..menu
        })
    }

    async fn sibling_count(&self, group: &SiblingGroup) -> Result<i32, DomainError> {
        let count = self.menus.count_siblings(group).await?;
        i32::try_from(count)
            .map_err(|_| DomainError::DatabaseError(format!("sibling count {} out of range", count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockMenuRepository;
    use mockall::predicate::eq;

    fn menu(id: EntityId, order: i32) -> Menu {
        Menu {
            id,
            name: format!("Menu {}", id),
            module_id: 1,
            parent_id: None,
            order,
        }
    }

    #[test]
    fn test_plan_noop_when_order_unchanged() {
        assert_eq!(OrderingEngine::<MockMenuRepository>::plan(&menu(1, 2), 2), None);
    }

    #[test]
    fn test_plan_moving_down_decrements_between() {
        let plan = OrderingEngine::<MockMenuRepository>::plan(&menu(1, 1), 3).unwrap();
        assert_eq!((plan.lo(), plan.hi(), plan.delta()), (1, 3, -1));
        assert_eq!(plan.reordered(1, 1), 3);
        assert_eq!(plan.reordered(2, 2), 1);
        assert_eq!(plan.reordered(3, 3), 2);
        assert_eq!(plan.reordered(4, 4), 4);
    }

    #[test]
    fn test_plan_moving_up_increments_between() {
        let plan = OrderingEngine::<MockMenuRepository>::plan(&menu(4, 4), 2).unwrap();
        assert_eq!(plan.delta(), 1);
        assert_eq!(plan.reordered(1, 1), 1);
        assert_eq!(plan.reordered(2, 2), 3);
        assert_eq!(plan.reordered(3, 3), 4);
        assert_eq!(plan.reordered(4, 4), 2);
    }

    #[tokio::test]
    async fn test_next_order_counts_siblings() {
        let mut repo = MockMenuRepository::new();
        repo.expect_count_siblings()
            .with(eq(SiblingGroup::root(1)))
            .returning(|_| Ok(0));
        repo.expect_count_siblings()
            .with(eq(SiblingGroup::new(1, Some(7))))
            .returning(|_| Ok(3));

        let engine = OrderingEngine::new(Arc::new(repo));
        assert_eq!(engine.next_order(&SiblingGroup::root(1)).await.unwrap(), 1);
        assert_eq!(engine.next_order(&SiblingGroup::new(1, Some(7))).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_shift_to_same_order_touches_nothing() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_id().returning(|id| Ok(Some(menu(id, 2))));
        repo.expect_count_siblings().never();
        repo.expect_apply_shift().never();

        let engine = OrderingEngine::new(Arc::new(repo));
        let moved = engine.shift(5, 2).await.unwrap();
        assert_eq!(moved.order, 2);
    }

    #[tokio::test]
    async fn test_shift_unknown_menu() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let engine = OrderingEngine::new(Arc::new(repo));
        let err = engine.shift(42, 1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::Menu, id: 42 }));
    }

    #[tokio::test]
    async fn test_shift_rejects_out_of_range_target() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_id().returning(|id| Ok(Some(menu(id, 1))));
        repo.expect_count_siblings().returning(|_| Ok(2));
        repo.expect_apply_shift().never();

        let engine = OrderingEngine::new(Arc::new(repo));
        for target in [0, 3, -1] {
            let err = engine.shift(1, target).await.unwrap_err();
            match err {
                DomainError::Validation(fields) => assert!(fields.has("order")),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_shift_hands_plan_to_store() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_id().returning(|id| Ok(Some(menu(id, 1))));
        repo.expect_count_siblings().returning(|_| Ok(2));
        repo.expect_apply_shift()
            .withf(|plan| plan.menu_id == 1 && plan.from == 1 && plan.to == 2)
            .times(1)
            .returning(|_| Ok(()));

        let engine = OrderingEngine::new(Arc::new(repo));
        let moved = engine.shift(1, 2).await.unwrap();
        assert_eq!(moved.order, 2);
    }
}
