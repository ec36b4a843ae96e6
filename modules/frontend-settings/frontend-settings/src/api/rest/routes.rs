use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::{Extension, Router, middleware};
use settings_auth::{AuthState, authenticate};

use crate::api::rest::handlers::{
    color_range, filter_sets, map_color, module_settings, modules, presets, state,
    user_settings,
};
use crate::domain::model::PresetKind;
use crate::module::ConcreteAppServices;

fn table_routes(kind: PresetKind) -> Router {
    Router::new()
        .route("/default/tmo/{tmo_id}", get(presets::table_default))
        .route("/tmo/all", get(presets::table_list_all))
        .route(
            "/tmo/{tmo_id}",
            get(presets::table_list).post(presets::table_create),
        )
        .route(
            "/setting/{id}",
            get(presets::get).put(presets::update).delete(presets::delete),
        )
        .layer(Extension(kind))
}

/// Full paths: a nested `/` would not match the trailing slash.
fn object_params_routes() -> Router {
    Router::new()
        .route("/object/params/default", get(presets::object_default))
        .route(
            "/object/params/",
            get(presets::object_list).post(presets::object_create),
        )
        .route(
            "/object/params/{id}",
            get(presets::get).put(presets::update).delete(presets::delete),
        )
        .layer(Extension(PresetKind::ObjectParams))
}

/// Every API route; all of them require an identity.
pub fn router(services: Arc<ConcreteAppServices>, auth: AuthState) -> Router {
    Router::new()
        .route("/color_range/", post(color_range::create))
        .route("/color_range/filter", post(color_range::filter))
        .route("/color_range/defaults", get(color_range::defaults))
        .route(
            "/color_range/{id}",
            patch(color_range::update).delete(color_range::delete),
        )
        .route("/map/color/default", get(map_color::default_for))
        .route(
            "/map/color/attributes_with_existing_default_color_range",
            get(map_color::attributes_with_default),
        )
        .route("/map/color/", get(map_color::list).post(map_color::create))
        .route(
            "/map/color/{id}",
            get(map_color::get)
                .put(map_color::update)
                .delete(map_color::delete),
        )
        .nest("/table/columns", table_routes(PresetKind::Columns))
        .nest("/table/filters", table_routes(PresetKind::Filters))
        .merge(object_params_routes())
        .route("/modules/all", get(modules::list).patch(modules::rename_many))
        .route("/modules/", post(modules::create))
        .route(
            "/modules/{name}",
            get(modules::get).patch(modules::rename).delete(modules::delete),
        )
        .route(
            "/module_settings",
            get(module_settings::list).post(module_settings::create),
        )
        .route(
            "/module_settings/{name}",
            get(module_settings::get)
                .put(module_settings::update)
                .delete(module_settings::delete),
        )
        .route(
            "/module_settings_logs/get_msl_by_filters",
            post(module_settings::logs),
        )
        .route(
            "/process/filterSet",
            get(filter_sets::list)
                .post(filter_sets::create)
                .patch(filter_sets::update_many),
        )
        .route(
            "/process/filterSet/{id}",
            get(filter_sets::get)
                .put(filter_sets::update)
                .delete(filter_sets::delete),
        )
        .route("/state/", post(state::save))
        .route("/state/{id}", get(state::get))
        .route("/user_settings/", get(user_settings::keys))
        .route(
            "/user_settings/{key}",
            get(user_settings::get)
                .post(user_settings::create)
                .put(user_settings::update)
                .delete(user_settings::delete),
        )
        .route_layer(middleware::from_fn_with_state(auth, authenticate))
        .layer(Extension(services))
}
