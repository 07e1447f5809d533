//! Session-scoped state: the current snapshot plus one explicit state machine per
//! generation affordance.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::cv::THEME_PRESETS;
use crate::models::CvData;
use crate::session::SessionError;

/// Style ideas offered in the design dialog.
pub const DESIGN_SUGGESTIONS: [&str; 5] = [
    "Minimaliste, noir et blanc, police clean",
    "Professionnel, bleu marine, avec sidebar",
    "Créatif, couleurs pastel, layout grille",
    "Élégant, vert forêt, police avec serif",
    "Tech, mode sombre, police monospace",
];

/// Lifecycle of one generation affordance.
///
/// `Idle → Requesting → Succeeded | Failed`; any settled phase may start a new request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum GenerationPhase {
    #[default]
    Idle,
    Requesting,
    Succeeded,
    Failed {
        notice: String,
    },
}

impl GenerationPhase {
    pub fn is_requesting(&self) -> bool {
        matches!(self, GenerationPhase::Requesting)
    }

    /// Transition into `Requesting`, refusing while a request is already in flight.
    pub fn begin(&mut self, what: &'static str) -> Result<(), SessionError> {
        if self.is_requesting() {
            return Err(SessionError::Busy(what));
        }
        *self = GenerationPhase::Requesting;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DesignDialog {
    pub open: bool,
    pub prompt: String,
}

impl DesignDialog {
    /// Prefill used when the dialog opens on an empty prompt.
    pub fn prefill(job_title: &str) -> Option<String> {
        let job_title = job_title.trim();
        (!job_title.is_empty()).then(|| format!("Un design professionnel pour un {job_title}..."))
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    /// Replaced wholesale on every edit.
    pub cv: Arc<CvData>,
    pub summary: GenerationPhase,
    pub design: GenerationPhase,
    /// Keyed by experience id; independent per entry.
    pub rewrites: HashMap<Uuid, GenerationPhase>,
    pub dialog: DesignDialog,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(cv: CvData) -> Self {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4(),
            cv: Arc::new(cv),
            summary: GenerationPhase::Idle,
            design: GenerationPhase::Idle,
            rewrites: HashMap::new(),
            dialog: DesignDialog::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Installs a new snapshot.
    pub fn replace_cv(&mut self, cv: CvData) {
        self.cv = Arc::new(cv);
        self.touch();
    }

    /// True while any generation request is in flight.
    pub fn is_busy(&self) -> bool {
        self.summary.is_requesting()
            || self.design.is_requesting()
            || self.rewrites.values().any(GenerationPhase::is_requesting)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            cv: self.cv.as_ref().clone(),
            summary: self.summary.clone(),
            design: self.design.clone(),
            rewrites: self.rewrites.clone(),
            dialog: self.dialog.clone(),
            suggestions: DESIGN_SUGGESTIONS,
            theme_presets: THEME_PRESETS,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Serialized shape of a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub cv: CvData,
    pub summary: GenerationPhase,
    pub design: GenerationPhase,
    pub rewrites: HashMap<Uuid, GenerationPhase>,
    pub dialog: DesignDialog,
    pub suggestions: [&'static str; 5],
    pub theme_presets: [&'static str; 4],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
