//! Session operations: snapshot edits and the three generation flows.
//!
//! Every generation flow follows the same shape:
//! 1. validate and mark `Requesting` under the store lock
//! 2. release the lock and await the backend
//! 3. re-take the lock and settle the phase on the snapshot current at completion
//!
//! Step 3 runs on every outcome, so no phase is ever left in `Requesting`.

use tracing::{info, warn};
use uuid::Uuid;

use crate::content::{EducationPatch, ExperiencePatch, SkillPatch};
use crate::generation::request::GenerationRequest;
use crate::generation::service::{GenerationError, GenerationOutput, GenerationService};
use crate::models::{CvData, DesignConfig, PersonalField, TemplateId};
use crate::session::state::{DesignDialog, GenerationPhase, SessionView, DESIGN_SUGGESTIONS};
use crate::session::store::SessionStore;
use crate::session::SessionError;

// ────────────────────────────────────────────────────────────────────────────
// Content edits
// ────────────────────────────────────────────────────────────────────────────

/// One user edit to the Content Model.
#[derive(Debug, Clone)]
pub enum Edit {
    Personal { field: PersonalField, value: String },
    Template(TemplateId),
    Theme(String),
    AddExperience,
    PatchExperience(Uuid, ExperiencePatch),
    RemoveExperience(Uuid),
    AddEducation,
    PatchEducation(Uuid, EducationPatch),
    RemoveEducation(Uuid),
    AddSkill,
    PatchSkill(Uuid, SkillPatch),
    RemoveSkill(Uuid),
}

impl Edit {
    /// Produces the next snapshot. Patching an unknown entry is an error; removing one is not.
    fn apply(&self, cv: &CvData) -> Result<CvData, SessionError> {
        let next = match self {
            Edit::Personal { field, value } => cv.with_personal_field(*field, value.as_str()),
            Edit::Template(template_id) => cv.with_template(*template_id),
            Edit::Theme(color) => cv.with_theme_color(color.as_str()),
            Edit::AddExperience => cv.with_new_experience().0,
            Edit::PatchExperience(entry, patch) => {
                require(cv.experience.iter().any(|e| e.id == *entry), *entry)?;
                cv.with_experience_patch(*entry, patch)
            }
            Edit::RemoveExperience(entry) => cv.without_experience(*entry),
            Edit::AddEducation => cv.with_new_education().0,
            Edit::PatchEducation(entry, patch) => {
                require(cv.education.iter().any(|e| e.id == *entry), *entry)?;
                cv.with_education_patch(*entry, patch)
            }
            Edit::RemoveEducation(entry) => cv.without_education(*entry),
            Edit::AddSkill => cv.with_new_skill().0,
            Edit::PatchSkill(entry, patch) => {
                require(cv.skills.iter().any(|s| s.id == *entry), *entry)?;
                cv.with_skill_patch(*entry, patch)
            }
            Edit::RemoveSkill(entry) => cv.without_skill(*entry),
        };
        Ok(next)
    }
}

fn require(found: bool, entry: Uuid) -> Result<(), SessionError> {
    if found {
        Ok(())
    } else {
        Err(SessionError::EntryNotFound(entry))
    }
}

pub async fn apply_edit(
    store: &SessionStore,
    id: Uuid,
    edit: Edit,
) -> Result<SessionView, SessionError> {
    store
        .update(id, |session| {
            let next = edit.apply(&session.cv)?;
            session.replace_cv(next);
            if let Edit::RemoveExperience(entry) = &edit {
                session.rewrites.remove(entry);
            }
            Ok(session.view())
        })
        .await
}

// ────────────────────────────────────────────────────────────────────────────
// Generation flows
// ────────────────────────────────────────────────────────────────────────────

fn expect_text(output: GenerationOutput) -> Result<String, GenerationError> {
    match output {
        GenerationOutput::Text(text) => Ok(text),
        GenerationOutput::Design(_) => Err(GenerationError::Malformed(
            "design returned for a text action".to_string(),
        )),
    }
}

fn expect_design(output: GenerationOutput) -> Result<DesignConfig, GenerationError> {
    match output {
        GenerationOutput::Design(design) => Ok(design),
        GenerationOutput::Text(_) => Err(GenerationError::Malformed(
            "text returned for a design action".to_string(),
        )),
    }
}

fn failed(e: &GenerationError) -> GenerationPhase {
    GenerationPhase::Failed { notice: e.notice() }
}

/// GENERATE_SUMMARY for the current job title; the result replaces `personal.summary`.
pub async fn generate_summary(
    store: &SessionStore,
    generator: &dyn GenerationService,
    id: Uuid,
) -> Result<SessionView, SessionError> {
    let request = store
        .update(id, |session| {
            let request = GenerationRequest::summary(&session.cv.personal.job_title);
            request.validate()?;
            session.summary.begin("summary")?;
            session.touch();
            Ok(request)
        })
        .await?;

    let outcome = generator.generate(&request).await.and_then(expect_text);

    store
        .update(id, |session| match outcome {
            Ok(text) => {
                let next = session.cv.with_personal_field(PersonalField::Summary, text);
                session.replace_cv(next);
                session.summary = GenerationPhase::Succeeded;
                info!(session = %id, "summary generated");
                Ok(session.view())
            }
            Err(e) => {
                warn!(session = %id, "summary generation failed: {e}");
                session.summary = failed(&e);
                session.touch();
                Err(e.into())
            }
        })
        .await
}

/// IMPROVE_EXPERIENCE for one entry. Different entries may be rewritten concurrently.
pub async fn improve_experience(
    store: &SessionStore,
    generator: &dyn GenerationService,
    id: Uuid,
    entry: Uuid,
) -> Result<SessionView, SessionError> {
    let request = store
        .update(id, |session| {
            let experience = session
                .cv
                .find_experience(entry)
                .ok_or(SessionError::EntryNotFound(entry))?;
            let request = GenerationRequest::improve(&experience.role, &experience.description);
            request.validate()?;
            session
                .rewrites
                .entry(entry)
                .or_default()
                .begin("experience rewrite")?;
            session.touch();
            Ok(request)
        })
        .await?;

    let outcome = generator.generate(&request).await.and_then(expect_text);

    store
        .update(id, |session| {
            let still_present = session.cv.find_experience(entry).is_some();
            match outcome {
                Ok(text) => {
                    if still_present {
                        let patch = ExperiencePatch {
                            description: Some(text),
                            ..Default::default()
                        };
                        let next = session.cv.with_experience_patch(entry, &patch);
                        session.replace_cv(next);
                        session.rewrites.insert(entry, GenerationPhase::Succeeded);
                    } else {
                        session.rewrites.remove(&entry);
                        session.touch();
                    }
                    info!(session = %id, %entry, "experience rewritten");
                    Ok(session.view())
                }
                Err(e) => {
                    warn!(session = %id, %entry, "experience rewrite failed: {e}");
                    if still_present {
                        session.rewrites.insert(entry, failed(&e));
                    } else {
                        session.rewrites.remove(&entry);
                    }
                    session.touch();
                    Err(e.into())
                }
            }
        })
        .await
}

// ────────────────────────────────────────────────────────────────────────────
// Design dialog
// ────────────────────────────────────────────────────────────────────────────

/// Prompt edit: free text, or one of the fixed suggestions by index.
#[derive(Debug, Clone)]
pub enum DialogUpdate {
    Prompt(String),
    Suggestion(usize),
}

pub async fn open_dialog(store: &SessionStore, id: Uuid) -> Result<SessionView, SessionError> {
    store
        .update(id, |session| {
            session.dialog.open = true;
            if session.dialog.prompt.trim().is_empty() {
                if let Some(prefill) = DesignDialog::prefill(&session.cv.personal.job_title) {
                    session.dialog.prompt = prefill;
                }
            }
            session.touch();
            Ok(session.view())
        })
        .await
}

pub async fn update_dialog(
    store: &SessionStore,
    id: Uuid,
    update: DialogUpdate,
) -> Result<SessionView, SessionError> {
    store
        .update(id, |session| {
            if session.design.is_requesting() {
                return Err(SessionError::Busy("design"));
            }
            session.dialog.prompt = match update {
                DialogUpdate::Prompt(prompt) => prompt,
                DialogUpdate::Suggestion(index) => DESIGN_SUGGESTIONS
                    .get(index)
                    .map(|s| s.to_string())
                    .ok_or_else(|| {
                        SessionError::Validation(format!("unknown suggestion {index}"))
                    })?,
            };
            session.touch();
            Ok(session.view())
        })
        .await
}

/// Closes the dialog. Refused while a design request is in flight.
pub async fn dismiss_dialog(store: &SessionStore, id: Uuid) -> Result<SessionView, SessionError> {
    store
        .update(id, |session| {
            if session.design.is_requesting() {
                return Err(SessionError::DismissBlocked);
            }
            session.dialog.open = false;
            session.touch();
            Ok(session.view())
        })
        .await
}

/// GENERATE_DESIGN from the dialog prompt, or from `prompt` when given.
///
/// Success stores the config wholesale, selects the unique template and closes the dialog.
/// Failure leaves the template and any previous config untouched.
pub async fn generate_design(
    store: &SessionStore,
    generator: &dyn GenerationService,
    id: Uuid,
    prompt: Option<String>,
) -> Result<SessionView, SessionError> {
    let request = store
        .update(id, |session| {
            if session.design.is_requesting() {
                return Err(SessionError::Busy("design"));
            }
            let request =
                GenerationRequest::design(prompt.as_deref().unwrap_or(&session.dialog.prompt));
            request.validate()?;
            if let Some(prompt) = prompt {
                session.dialog.prompt = prompt;
            }
            session.design.begin("design")?;
            session.touch();
            Ok(request)
        })
        .await?;

    let outcome = generator.generate(&request).await.and_then(expect_design);

    store
        .update(id, |session| match outcome {
            Ok(design) => {
                info!(session = %id, layout = ?design.layout, "design generated");
                let next = session.cv.with_design(design);
                session.replace_cv(next);
                session.design = GenerationPhase::Succeeded;
                session.dialog.open = false;
                Ok(session.view())
            }
            Err(e) => {
                warn!(session = %id, "design generation failed: {e}");
                session.design = failed(&e);
                session.touch();
                Err(e.into())
            }
        })
        .await
}
