//! Materialized menu trees

use navmenu_shared::constants::TREE_INDENT;
use navmenu_shared::EntityId;
use serde::Serialize;

/// A menu placed in its module's tree. `depth` is 0 for root menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: EntityId,
    pub module_id: EntityId,
    pub name: String,
    pub order: i32,
    pub parent_id: Option<EntityId>,
    pub depth: usize,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Display label indented by one marker per level, e.g. `|---|---Reports`.
    pub fn path(&self) -> String {
        format!("{}{}", TREE_INDENT.repeat(self.depth), self.name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// This node and all of its descendants, depth first.
    pub fn walk(&self) -> Vec<&TreeNode> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.walk());
        }
        nodes
    }
}

/// Forest of one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleTree {
    pub module_id: EntityId,
    pub menus: Vec<TreeNode>,
}

impl ModuleTree {
    /// Indented labels of every menu of the module, depth first.
    pub fn paths(&self) -> Vec<String> {
        self.menus
            .iter()
            .flat_map(|root| root.walk())
            .map(TreeNode::path)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: EntityId, name: &str, depth: usize, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            id,
            module_id: 1,
            name: name.to_string(),
            order: 1,
            parent_id: None,
            depth,
            children,
        }
    }

    #[test]
    fn test_path_indents_by_depth() {
        assert_eq!(node(1, "Home", 0, vec![]).path(), "Home");
        assert_eq!(node(2, "Reports", 2, vec![]).path(), "|---|---Reports");
    }

    #[test]
    fn test_walk_is_depth_first() {
        let tree = ModuleTree {
            module_id: 1,
            menus: vec![
                node(1, "A", 0, vec![node(2, "B", 1, vec![node(3, "C", 2, vec![])])]),
                node(4, "D", 0, vec![]),
            ],
        };
        assert_eq!(tree.paths(), vec!["A", "|---B", "|---|---C", "D"]);
        assert!(tree.menus[1].is_leaf());
    }
}
