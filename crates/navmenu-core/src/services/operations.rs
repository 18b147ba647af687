//! Uniform CRUD surface implemented by each entity service.

use async_trait::async_trait;
use navmenu_shared::EntityId;

use crate::error::{DomainError, EntityKind};

#[async_trait]
pub trait ResourceOperations: Send + Sync {
    type Entity: Send;
    type Create: Send;
    type Update: Send;

    const KIND: EntityKind;

    async fn create(&self, input: Self::Create) -> Result<Self::Entity, DomainError>;
    async fn find(&self, id: EntityId) -> Result<Self::Entity, DomainError>;
    async fn update(&self, id: EntityId, input: Self::Update) -> Result<Self::Entity, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<(), DomainError>;
}
