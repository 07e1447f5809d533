//! Axum route handlers for the Session API.

use axum::{extract::State, http::StatusCode, response::Html, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::content::{EducationPatch, ExperiencePatch, SkillPatch};
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, OptionalJson};
use crate::layout::RenderMode;
use crate::models::{CvData, PersonalField, TemplateId};
use crate::render::render_document;
use crate::session::actions::{self, DialogUpdate, Edit};
use crate::session::SessionView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PersonalUpdate {
    pub field: PersonalField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSelection {
    pub template_id: TemplateId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSelection {
    pub theme_color: String,
}

/// Either a free-text prompt or the index of a suggestion.
#[derive(Debug, Deserialize)]
pub struct DialogBody {
    pub prompt: Option<String>,
    pub suggestion: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DesignBody {
    pub prompt: Option<String>,
}

type SessionResult = Result<Json<SessionView>, AppError>;

async fn edit(state: &AppState, id: Uuid, edit: Edit) -> SessionResult {
    Ok(Json(actions::apply_edit(&state.sessions, id, edit).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Starts a session. An empty body starts from the blank Content Model; a body that is
/// present but not a Content Model is a 400.
pub async fn handle_create_session(
    State(state): State<AppState>,
    OptionalJson(cv): OptionalJson<CvData>,
) -> (StatusCode, Json<SessionView>) {
    let view = state.sessions.create(cv.unwrap_or_default()).await;
    tracing::info!(session = %view.id, "session created");
    (StatusCode::CREATED, Json(view))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> SessionResult {
    Ok(Json(state.sessions.view(id).await?))
}

/// DELETE /api/v1/sessions/:id
///
/// Drops the session; later calls with its id are 404.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    tracing::info!(session = %id, "session deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Content edits
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/v1/sessions/:id/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<PersonalUpdate>,
) -> SessionResult {
    let update = Edit::Personal {
        field: body.field,
        value: body.value,
    };
    edit(&state, id, update).await
}

/// PUT /api/v1/sessions/:id/template
pub async fn handle_select_template(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<TemplateSelection>,
) -> SessionResult {
    edit(&state, id, Edit::Template(body.template_id)).await
}

/// PUT /api/v1/sessions/:id/theme
///
/// Any color string is accepted; rendering falls back to the default on anything unusable.
pub async fn handle_set_theme(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<ThemeSelection>,
) -> SessionResult {
    edit(&state, id, Edit::Theme(body.theme_color)).await
}

/// POST /api/v1/sessions/:id/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> SessionResult {
    edit(&state, id, Edit::AddExperience).await
}

/// PATCH /api/v1/sessions/:id/experience/:entry
pub async fn handle_update_experience(
    State(state): State<AppState>,
    AppPath((id, entry)): AppPath<(Uuid, Uuid)>,
    AppJson(patch): AppJson<ExperiencePatch>,
) -> SessionResult {
    edit(&state, id, Edit::PatchExperience(entry, patch)).await
}

/// DELETE /api/v1/sessions/:id/experience/:entry
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    AppPath((id, entry)): AppPath<(Uuid, Uuid)>,
) -> SessionResult {
    edit(&state, id, Edit::RemoveExperience(entry)).await
}

/// POST /api/v1/sessions/:id/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> SessionResult {
    edit(&state, id, Edit::AddEducation).await
}

/// PATCH /api/v1/sessions/:id/education/:entry
pub async fn handle_update_education(
    State(state): State<AppState>,
    AppPath((id, entry)): AppPath<(Uuid, Uuid)>,
    AppJson(patch): AppJson<EducationPatch>,
) -> SessionResult {
    edit(&state, id, Edit::PatchEducation(entry, patch)).await
}

/// DELETE /api/v1/sessions/:id/education/:entry
pub async fn handle_remove_education(
    State(state): State<AppState>,
    AppPath((id, entry)): AppPath<(Uuid, Uuid)>,
) -> SessionResult {
    edit(&state, id, Edit::RemoveEducation(entry)).await
}

/// POST /api/v1/sessions/:id/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> SessionResult {
    edit(&state, id, Edit::AddSkill).await
}

/// PATCH /api/v1/sessions/:id/skills/:entry
pub async fn handle_update_skill(
    State(state): State<AppState>,
    AppPath((id, entry)): AppPath<(Uuid, Uuid)>,
    AppJson(patch): AppJson<SkillPatch>,
) -> SessionResult {
    edit(&state, id, Edit::PatchSkill(entry, patch)).await
}

/// DELETE /api/v1/sessions/:id/skills/:entry
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    AppPath((id, entry)): AppPath<(Uuid, Uuid)>,
) -> SessionResult {
    edit(&state, id, Edit::RemoveSkill(entry)).await
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/summary/generate
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> SessionResult {
    let view = actions::generate_summary(&state.sessions, state.generator.as_ref(), id).await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/experience/:entry/improve
pub async fn handle_improve_experience(
    State(state): State<AppState>,
    AppPath((id, entry)): AppPath<(Uuid, Uuid)>,
) -> SessionResult {
    let view =
        actions::improve_experience(&state.sessions, state.generator.as_ref(), id, entry).await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/design/dialog
pub async fn handle_open_dialog(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> SessionResult {
    Ok(Json(actions::open_dialog(&state.sessions, id).await?))
}

/// PUT /api/v1/sessions/:id/design/dialog
pub async fn handle_update_dialog(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<DialogBody>,
) -> SessionResult {
    let update = match (body.prompt, body.suggestion) {
        (_, Some(index)) => DialogUpdate::Suggestion(index),
        (Some(prompt), None) => DialogUpdate::Prompt(prompt),
        (None, None) => {
            return Err(AppError::Validation(
                "either prompt or suggestion is required".to_string(),
            ))
        }
    };
    Ok(Json(actions::update_dialog(&state.sessions, id, update).await?))
}

/// DELETE /api/v1/sessions/:id/design/dialog
///
/// 409 while a design request is in flight.
pub async fn handle_dismiss_dialog(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> SessionResult {
    Ok(Json(actions::dismiss_dialog(&state.sessions, id).await?))
}

/// POST /api/v1/sessions/:id/design/generate
///
/// Uses the dialog prompt unless the body carries one.
pub async fn handle_generate_design(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    OptionalJson(body): OptionalJson<DesignBody>,
) -> SessionResult {
    let prompt = body.and_then(|b| b.prompt);
    let view =
        actions::generate_design(&state.sessions, state.generator.as_ref(), id, prompt).await?;
    Ok(Json(view))
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Html<String>, AppError> {
    let cv = state.sessions.snapshot(id).await?;
    let mode = RenderMode::preview(state.config.preview_scale);
    Ok(Html(render_document(&cv, mode)))
}

/// GET /api/v1/sessions/:id/print
///
/// Unscaled A4 document for the browser's print facility.
pub async fn handle_print(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Html<String>, AppError> {
    let cv = state.sessions.snapshot(id).await?;
    Ok(Html(render_document(&cv, RenderMode::Print)))
}
