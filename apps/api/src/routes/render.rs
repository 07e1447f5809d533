use axum::{extract::State, response::Html};
use serde::Deserialize;

use crate::extract::{AppJson, AppQuery};
use crate::layout::RenderMode;
use crate::models::CvData;
use crate::render::render_document;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeParam {
    #[default]
    Preview,
    Print,
}

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    #[serde(default)]
    pub mode: ModeParam,
    /// Overrides the configured preview scale; clamped like it.
    pub scale: Option<f32>,
}

/// POST /api/v1/render
///
/// Stateless rendering of a Content Model body into an HTML document.
pub async fn handle_render(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RenderQuery>,
    AppJson(cv): AppJson<CvData>,
) -> Html<String> {
    let mode = match query.mode {
        ModeParam::Preview => {
            RenderMode::preview(query.scale.unwrap_or(state.config.preview_scale))
        }
        ModeParam::Print => RenderMode::Print,
    };
    Html(render_document(&cv, mode))
}
