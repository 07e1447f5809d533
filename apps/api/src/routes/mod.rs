pub mod health;
pub mod render;

use axum::{
    http::{header, StatusCode, Uri},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Router,
};

use crate::errors::AppError;
use crate::generation::handlers as generation;
use crate::session::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation proxy
        .route("/api/generate", post(generation::handle_generate))
        // Stateless rendering
        .route("/api/v1/render", post(render::handle_render))
        // Session API
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/personal",
            patch(sessions::handle_update_personal),
        )
        .route(
            "/api/v1/sessions/:id/template",
            put(sessions::handle_select_template),
        )
        .route("/api/v1/sessions/:id/theme", put(sessions::handle_set_theme))
        .route(
            "/api/v1/sessions/:id/experience",
            post(sessions::handle_add_experience),
        )
        .route(
            "/api/v1/sessions/:id/experience/:entry",
            patch(sessions::handle_update_experience).delete(sessions::handle_remove_experience),
        )
        .route(
            "/api/v1/sessions/:id/experience/:entry/improve",
            post(sessions::handle_improve_experience),
        )
        .route(
            "/api/v1/sessions/:id/education",
            post(sessions::handle_add_education),
        )
        .route(
            "/api/v1/sessions/:id/education/:entry",
            patch(sessions::handle_update_education).delete(sessions::handle_remove_education),
        )
        .route("/api/v1/sessions/:id/skills", post(sessions::handle_add_skill))
        .route(
            "/api/v1/sessions/:id/skills/:entry",
            patch(sessions::handle_update_skill).delete(sessions::handle_remove_skill),
        )
        .route(
            "/api/v1/sessions/:id/summary/generate",
            post(sessions::handle_generate_summary),
        )
        .route(
            "/api/v1/sessions/:id/design/dialog",
            post(sessions::handle_open_dialog)
                .put(sessions::handle_update_dialog)
                .delete(sessions::handle_dismiss_dialog),
        )
        .route(
            "/api/v1/sessions/:id/design/generate",
            post(sessions::handle_generate_design),
        )
        .route("/api/v1/sessions/:id/preview", get(sessions::handle_preview))
        .route("/api/v1/sessions/:id/print", get(sessions::handle_print))
        .fallback(no_route)
        .layer(map_response(json_method_not_allowed))
        .with_state(state)
}

async fn no_route(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

/// The method router answers 405 with an empty body; give it the usual error shape.
async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut json = AppError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        json.headers_mut().insert(header::ALLOW, allow);
    }
    json
}
