use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::CvData;
use crate::session::state::{Session, SessionView};
use crate::session::SessionError;

/// In-memory session registry. Cheap to clone; all clones share one map.
///
/// The write lock is only ever held for synchronous state transitions, never across
/// a generation call.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, cv: CvData) -> SessionView {
        let session = Session::new(cv);
        let view = session.view();
        self.sessions.write().await.insert(session.id, session);
        view
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, SessionError> {
        self.read(id, Session::view).await
    }

    /// Current snapshot, shared with the session.
    pub async fn snapshot(&self, id: Uuid) -> Result<Arc<CvData>, SessionError> {
        self.read(id, |s| Arc::clone(&s.cv)).await
    }

    pub async fn read<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&Session) -> T,
    ) -> Result<T, SessionError> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).map(f).ok_or(SessionError::NotFound(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(drop)
            .ok_or(SessionError::NotFound(id))
    }

    /// Drops every session untouched for longer than `max_idle`. Returns how many went.
    ///
    /// Sessions with a request in flight are kept.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.updated_at >= cutoff || s.is_busy());
        before - sessions.len()
    }

    /// Runs one transition under the write lock.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        f(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_view() {
        let store = SessionStore::new();
        let created = store.create(CvData::default()).await;
        let viewed = store.view(created.id).await.unwrap();
        assert_eq!(viewed.id, created.id);
        assert_eq!(viewed.cv, CvData::default());
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.view(id).await,
            Err(SessionError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new();
        let id = store.create(CvData::default()).await.id;
        store.remove(id).await.unwrap();
        assert!(matches!(store.view(id).await, Err(SessionError::NotFound(_))));
        assert!(matches!(store.remove(id).await, Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_evict_idle_keeps_recent_and_busy_sessions() {
        let store = SessionStore::new();
        let stale = store.create(CvData::default()).await.id;
        let busy = store.create(CvData::default()).await.id;
        let fresh = store.create(CvData::default()).await.id;

        let long_ago = Utc::now() - Duration::hours(5);
        store
            .update(stale, |s| {
                s.updated_at = long_ago;
                Ok(())
            })
            .await
            .unwrap();
        store
            .update(busy, |s| {
                s.updated_at = long_ago;
                s.design.begin("design")
            })
            .await
            .unwrap();

        assert_eq!(store.evict_idle(Duration::hours(1)).await, 1);
        assert!(store.view(stale).await.is_err());
        assert!(store.view(busy).await.is_ok());
        assert!(store.view(fresh).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_update_is_reported() {
        let store = SessionStore::new();
        let id = store.create(CvData::default()).await.id;
        let result: Result<(), _> = store
            .update(id, |_| Err(SessionError::Validation("non".into())))
            .await;
        assert!(matches!(result, Err(SessionError::Validation(_))));
    }
}
