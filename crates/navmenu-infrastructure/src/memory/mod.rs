//! In-memory entity store, used for local runs and tests.

mod store;

pub use store::InMemoryStore;
