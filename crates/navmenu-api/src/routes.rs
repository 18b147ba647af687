// ============================================================================
// Navmenu API - Router
// File: crates/navmenu-api/src/routes.rs
// ============================================================================

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{health, menus, modules};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/modules", get(modules::list_modules).post(modules::create_module))
        .route(
            "/modules/{id}",
            get(modules::get_module)
                .put(modules::update_module)
                .delete(modules::delete_module),
        )
        .route("/modules/{id}/tree", get(modules::module_tree))
        .route("/menus", get(menus::list_menus).post(menus::create_menu))
        .route(
            "/menus/{id}",
            get(menus::get_menu)
                .put(menus::rename_menu)
                .patch(menus::move_menu)
                .delete(menus::delete_menu),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
