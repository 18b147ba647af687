//! Application-wide constants

/// Longest module or menu name accepted, in characters.
pub const MAX_NAME_LENGTH: u64 = 15;

/// Prefix repeated once per tree level when rendering a menu path.
pub const TREE_INDENT: &str = "|---";

/// First position in every sibling group.
pub const FIRST_ORDER: i32 = 1;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
