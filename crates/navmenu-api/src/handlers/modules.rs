//! Module handlers - /api/modules

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use navmenu_core::{Module, ModuleTree};
use navmenu_shared::EntityId;

use crate::dto::NamePayload;
use crate::error::ApiError;
use crate::handlers::resource::{self, Created};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/modules
pub async fn list_modules(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Module>>>, ApiError> {
    let modules = state.modules.list().await?;
    Ok(Json(ApiResponse::success(modules)))
}

/// POST /api/modules
pub async fn create_module(
    State(state): State<AppState>,
    payload: Result<Json<NamePayload>, JsonRejection>,
) -> Result<Created<Module>, ApiError> {
    let Json(payload) = payload?;
    resource::create(state.modules.as_ref(), payload.into_name()?).await
}

/// GET /api/modules/{id}
pub async fn get_module(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<Module>>, ApiError> {
    resource::retrieve(state.modules.as_ref(), id).await
}

/// PUT /api/modules/{id}
pub async fn update_module(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    payload: Result<Json<NamePayload>, JsonRejection>,
) -> Result<Json<ApiResponse<Module>>, ApiError> {
    let Json(payload) = payload?;
    resource::update(state.modules.as_ref(), id, payload.into_name()?).await
}

/// DELETE /api/modules/{id}
pub async fn delete_module(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<StatusCode, ApiError> {
    resource::destroy(state.modules.as_ref(), id).await
}

/// GET /api/modules/{id}/tree
pub async fn module_tree(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<ModuleTree>>, ApiError> {
    let menus = state.menus.get_tree(id).await?;
    Ok(Json(ApiResponse::success(ModuleTree { module_id: id, menus })))
}
