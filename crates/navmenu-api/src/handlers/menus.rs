//! Menu handlers - /api/menus
//!
//! PUT renames a menu, PATCH moves it inside its sibling group.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use navmenu_core::{Menu, MenuUpdate, ModuleTree};
use navmenu_shared::EntityId;

use crate::dto::{CreateMenuPayload, MenuFilter, NamePayload, OrderPayload};
use crate::error::ApiError;
use crate::handlers::resource::{self, Created};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/menus?module={id}
pub async fn list_menus(
    State(state): State<AppState>,
    filter: Result<Query<MenuFilter>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ModuleTree>>>, ApiError> {
    let Query(filter) = filter?;
    let trees = state.menus.list_trees(filter.module).await?;
    Ok(Json(ApiResponse::success(trees)))
}

/// POST /api/menus
pub async fn create_menu(
    State(state): State<AppState>,
    payload: Result<Json<CreateMenuPayload>, JsonRejection>,
) -> Result<Created<Menu>, ApiError> {
    let Json(payload) = payload?;
    resource::create(state.menus.as_ref(), payload.into_command()?).await
}

/// GET /api/menus/{id}
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<ApiResponse<Menu>>, ApiError> {
    resource::retrieve(state.menus.as_ref(), id).await
}

/// PUT /api/menus/{id}
pub async fn rename_menu(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    payload: Result<Json<NamePayload>, JsonRejection>,
) -> Result<Json<ApiResponse<Menu>>, ApiError> {
    let Json(payload) = payload?;
    let update = MenuUpdate::Rename { name: payload.into_name()? };
    resource::update(state.menus.as_ref(), id, update).await
}

/// PATCH /api/menus/{id}
pub async fn move_menu(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    payload: Result<Json<OrderPayload>, JsonRejection>,
) -> Result<Json<ApiResponse<Menu>>, ApiError> {
    let Json(payload) = payload?;
    resource::update(state.menus.as_ref(), id, payload.into_update()?).await
}

/// DELETE /api/menus/{id}
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<StatusCode, ApiError> {
    resource::destroy(state.menus.as_ref(), id).await
}
