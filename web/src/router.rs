use crate::controller::reactive_controller::{FLUX_PATH, LIST_PATH};
use crate::controller::{health_check_controller, reactive_controller};
use crate::AppState;
use axum::{
    routing::{any, get},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "onenine API"
        ),
        paths(
            health_check_controller::health_check,
            reactive_controller::produce_list,
            reactive_controller::produce_flux,
        ),
        tags(
            (name = "onenine", description = "The numbers 1 through 9, produced eagerly or streamed")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(reactive_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn reactive_routes(app_state: AppState) -> Router {
    Router::new()
        .route(LIST_PATH, any(reactive_controller::produce_list))
        .route(FLUX_PATH, get(reactive_controller::produce_flux))
        .with_state(app_state)
}
