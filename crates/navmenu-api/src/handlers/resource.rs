// ============================================================================
// Navmenu API - Generic Resource Handlers
// File: crates/navmenu-api/src/handlers/resource.rs
// ============================================================================
//! CRUD responses shared by every entity exposing [`ResourceOperations`].

use axum::{http::StatusCode, Json};
use navmenu_core::services::ResourceOperations;
use navmenu_shared::EntityId;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::response::ApiResponse;

pub type Created<T> = (StatusCode, Json<ApiResponse<T>>);

pub async fn create<S>(service: &S, input: S::Create) -> Result<Created<S::Entity>, ApiError>
where
    S: ResourceOperations,
    S::Entity: Serialize,
{
    let entity = service.create(input).await?;
    info!("Created {}", S::KIND);
    Ok((StatusCode::CREATED, Json(ApiResponse::success(entity))))
}

pub async fn retrieve<S>(service: &S, id: EntityId) -> Result<Json<ApiResponse<S::Entity>>, ApiError>
where
    S: ResourceOperations,
    S::Entity: Serialize,
{
    let entity = service.find(id).await?;
    Ok(Json(ApiResponse::success(entity)))
}

pub async fn update<S>(
    service: &S,
    id: EntityId,
    input: S::Update,
) -> Result<Json<ApiResponse<S::Entity>>, ApiError>
where
    S: ResourceOperations,
    S::Entity: Serialize,
{
    let entity = service.update(id, input).await?;
    info!("Updated {} {}", S::KIND, id);
    Ok(Json(ApiResponse::success(entity)))
}

pub async fn destroy<S>(service: &S, id: EntityId) -> Result<StatusCode, ApiError>
where
    S: ResourceOperations,
{
    service.delete(id).await?;
    info!("Deleted {} {}", S::KIND, id);
    Ok(StatusCode::NO_CONTENT)
}
