// Editing sessions: one Content Model snapshot plus the generation state machines around it.
// Sessions live in memory only.

pub mod actions;
pub mod handlers;
pub mod state;
pub mod store;

use thiserror::Error;
use uuid::Uuid;

use crate::generation::service::GenerationError;

pub use state::SessionView;
pub use store::SessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(Uuid),

    #[error("entry {0} not found")]
    EntryNotFound(Uuid),

    #[error("{0}")]
    Validation(String),

    #[error("a {0} request is already in progress")]
    Busy(&'static str),

    #[error("the design dialog cannot be closed while a design is being generated")]
    DismissBlocked,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
