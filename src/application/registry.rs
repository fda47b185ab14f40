use crate::application::view::PhotoCollectionView;
use crate::domain::SessionProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Live album views, one per session.
///
/// Views whose session has expired or been revoked are dropped whenever a
/// view is handed out, so the map never outgrows the set of live sessions.
pub struct ViewRegistry {
    sessions: Arc<dyn SessionProvider>,
    views: Mutex<HashMap<String, Arc<PhotoCollectionView>>>,
}

impl ViewRegistry {
    pub fn new(sessions: Arc<dyn SessionProvider>) -> Self {
        Self {
            sessions,
            views: Mutex::new(HashMap::new()),
        }
    }

    fn views(&self) -> MutexGuard<'_, HashMap<String, Arc<PhotoCollectionView>>> {
        self.views.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_or_create(&self, session: &str) -> Arc<PhotoCollectionView> {
        let mut views = self.views();
        let before = views.len();
        views.retain(|token, _| token == session || self.sessions.is_authenticated(token));
        if views.len() < before {
            debug!("Dropped {} album views of ended sessions", before - views.len());
        }

        views
            .entry(session.to_string())
            .or_insert_with(|| Arc::new(PhotoCollectionView::new()))
            .clone()
    }

    /// Tears the session's view down. Returns false if it had none.
    pub fn remove(&self, session: &str) -> bool {
        self.views().remove(session).is_some()
    }

    pub fn len(&self) -> usize {
        self.views().len()
    }

    pub fn is_empty(&self) -> bool {
        self.views().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SignedSessionStore;
    use chrono::Duration;

    fn registry(store: Arc<SignedSessionStore>) -> ViewRegistry {
        ViewRegistry::new(store)
    }

    #[test]
    fn test_views_are_per_session() {
        let store = Arc::new(SignedSessionStore::new());
        let a = store.login("a@b.c", "pw").unwrap().token;
        let b = store.login("d@e.f", "pw").unwrap().token;
        let registry = registry(store);

        let first = registry.get_or_create(&a);
        let again = registry.get_or_create(&a);
        let other = registry.get_or_create(&b);

        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_tears_down() {
        let store = Arc::new(SignedSessionStore::new());
        let a = store.login("a@b.c", "pw").unwrap().token;
        let registry = registry(store);

        registry.get_or_create(&a);
        assert!(registry.remove(&a));
        assert!(!registry.remove(&a));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_revoked_sessions_lose_their_views() {
        let store = Arc::new(SignedSessionStore::new());
        let a = store.login("a@b.c", "pw").unwrap().token;
        let b = store.login("d@e.f", "pw").unwrap().token;
        let registry = registry(store.clone());

        registry.get_or_create(&a);
        registry.get_or_create(&b);
        assert_eq!(registry.len(), 2);

        store.logout(&a);
        registry.get_or_create(&b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_expired_sessions_lose_their_views() {
        let store = Arc::new(SignedSessionStore::with_secret(b"secret", Duration::milliseconds(200)));
        let registry = registry(store.clone());

        let first = store.login("a@b.c", "pw").unwrap().token;
        registry.get_or_create(&first);
        assert_eq!(registry.len(), 1);

        std::thread::sleep(std::time::Duration::from_millis(300));

        let second = store.login("d@e.f", "pw").unwrap().token;
        registry.get_or_create(&second);
        assert_eq!(registry.len(), 1);
        assert!(registry.remove(&second));
        assert!(!registry.remove(&first));
    }
}
