// ============================================================================
// Navmenu Core - Tree Builder
// File: crates/navmenu-core/src/services/tree_builder.rs
// ============================================================================
//! Rebuilds ordered menu forests from flat parent-pointing rows.

use std::collections::{BTreeMap, HashMap};

use navmenu_shared::EntityId;

use crate::domain::{Menu, ModuleTree, TreeNode};

type ChildIndex<'a> = HashMap<Option<EntityId>, Vec<&'a Menu>>;

pub struct TreeBuilder;

impl TreeBuilder {
    /// Forest of `module_id`: root menus in order, each followed by its
    /// children in order, recursively. Rows of other modules are ignored.
    pub fn build(nodes: &[Menu], module_id: EntityId) -> Vec<TreeNode> {
        Self::build_scoped(nodes.iter().filter(|node| node.module_id == module_id).collect())
    }

    /// One forest per module present in `nodes`, ordered by module id.
    pub fn build_all(nodes: &[Menu]) -> Vec<ModuleTree> {
        let mut by_module: BTreeMap<EntityId, Vec<&Menu>> = BTreeMap::new();
        for node in nodes {
            by_module.entry(node.module_id).or_default().push(node);
        }

        by_module
            .into_iter()
            .map(|(module_id, scoped)| ModuleTree {
                module_id,
                menus: Self::build_scoped(scoped),
            })
            .collect()
    }

    fn build_scoped(mut scoped: Vec<&Menu>) -> Vec<TreeNode> {
        scoped.sort_by_key(|node| (node.order, node.id));

        let mut index: ChildIndex<'_> = HashMap::new();
        for node in scoped {
            index.entry(node.parent_id).or_default().push(node);
        }

        Self::attach(&index, None, 0)
    }

    // Rows whose parent chain never reaches a root (orphans, cycles) are never
    // visited from here, so the recursion always terminates.
    fn attach(index: &ChildIndex<'_>, anchor: Option<EntityId>, depth: usize) -> Vec<TreeNode> {
        let Some(children) = index.get(&anchor) else {
            return Vec::new();
        };

        children
            .iter()
            .map(|node| TreeNode {
                id: node.id,
                module_id: node.module_id,
                name: node.name.clone(),
                order: node.order,
                parent_id: node.parent_id,
                depth,
                children: Self::attach(index, Some(node.id), depth + 1),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(id: EntityId, module_id: EntityId, parent_id: Option<EntityId>, order: i32) -> Menu {
        Menu {
            id,
            name: format!("Menu {}", id),
            module_id,
            parent_id,
            order,
        }
    }

    #[test]
    fn test_build_root_with_two_children() {
        let nodes = vec![menu(1, 1, None, 1), menu(2, 1, Some(1), 1), menu(3, 1, Some(1), 2)];

        let forest = TreeBuilder::build(&nodes, 1);

        assert_eq!(forest.len(), 1);
        let root = &forest[0];
        assert_eq!((root.id, root.depth), (1, 0));
        let children: Vec<_> = root.children.iter().map(|c| (c.id, c.depth)).collect();
        assert_eq!(children, vec![(2, 1), (3, 1)]);
        assert!(root.children.iter().all(TreeNode::is_leaf));
    }

    #[test]
    fn test_siblings_follow_order_not_input_position() {
        let nodes = vec![
            menu(10, 1, Some(1), 3),
            menu(1, 1, None, 1),
            menu(11, 1, Some(1), 1),
            menu(12, 1, Some(1), 2),
            menu(13, 1, Some(12), 1),
        ];

        let forest = TreeBuilder::build(&nodes, 1);
        let ids: Vec<_> = forest[0].walk().iter().map(|n| (n.id, n.depth)).collect();
        assert_eq!(ids, vec![(1, 0), (11, 1), (12, 1), (13, 2), (10, 1)]);
    }

    #[test]
    fn test_multiple_roots_kept_in_order() {
        let nodes = vec![menu(2, 1, None, 2), menu(1, 1, None, 1), menu(3, 1, None, 3)];
        let roots: Vec<_> = TreeBuilder::build(&nodes, 1).iter().map(|n| n.id).collect();
        assert_eq!(roots, vec![1, 2, 3]);
    }

    #[test]
    fn test_other_modules_are_filtered_out() {
        let nodes = vec![menu(1, 1, None, 1), menu(2, 2, None, 1), menu(3, 2, Some(2), 1)];
        let forest = TreeBuilder::build(&nodes, 2);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, 2);
        assert_eq!(forest[0].children[0].id, 3);
        assert!(TreeBuilder::build(&nodes, 9).is_empty());
    }

    #[test]
    fn test_orphans_and_cycles_are_not_emitted() {
        let nodes = vec![
            menu(1, 1, None, 1),
            menu(2, 1, Some(99), 1),
            menu(3, 1, Some(4), 1),
            menu(4, 1, Some(3), 1),
            menu(5, 1, Some(5), 2),
        ];
        let forest = TreeBuilder::build(&nodes, 1);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].walk().len(), 1);
    }

    #[test]
    fn test_build_all_partitions_by_module() {
        let nodes = vec![
            menu(5, 2, None, 1),
            menu(1, 1, None, 1),
            menu(6, 2, Some(5), 1),
            menu(2, 1, None, 2),
        ];

        let trees = TreeBuilder::build_all(&nodes);
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].module_id, 1);
        assert_eq!(trees[0].paths(), vec!["Menu 1", "Menu 2"]);
        assert_eq!(trees[1].module_id, 2);
        assert_eq!(trees[1].paths(), vec!["Menu 5", "|---Menu 6"]);
    }

    #[test]
    fn test_build_all_empty() {
        assert!(TreeBuilder::build_all(&[]).is_empty());
    }
}
