use crate::application::registry::ViewRegistry;
use crate::application::view::{PhotoCollectionView, ViewSnapshot};
use crate::domain::{DomainError, PhotoId, PhotoSource};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResult {
    pub id: PhotoId,
    pub is_liked: bool,
}

pub struct AlbumUseCase {
    source: Arc<dyn PhotoSource>,
    views: Arc<ViewRegistry>,
}

impl AlbumUseCase {
    pub fn new(source: Arc<dyn PhotoSource>, views: Arc<ViewRegistry>) -> Self {
        Self { source, views }
    }

    /// Returns the session's view, loading it the first time it is opened.
    async fn activated_view(&self, session: &str) -> Arc<PhotoCollectionView> {
        let view = self.views.get_or_create(session);
        if !view.is_activated() {
            info!("Activating album view ({} open)", self.views.len());
            view.load(self.source.as_ref()).await;
        }
        view
    }

    pub async fn open(&self, session: &str) -> ViewSnapshot {
        self.activated_view(session).await.snapshot()
    }

    pub async fn reload(&self, session: &str) -> ViewSnapshot {
        let view = self.views.get_or_create(session);
        view.load(self.source.as_ref()).await;
        view.snapshot()
    }

    pub async fn search(&self, session: &str, query: &str) -> Result<ViewSnapshot, DomainError> {
        self.activated_view(session).await.search(query)
    }

    pub async fn toggle_like(&self, session: &str, id: PhotoId) -> Result<LikeResult, DomainError> {
        let is_liked = self.activated_view(session).await.toggle_like(id)?;
        Ok(LikeResult { id, is_liked })
    }

    pub fn close(&self, session: &str) {
        if self.views.remove(session) {
            info!("Album view closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PhotoRecord, SessionProvider};
    use crate::infrastructure::SignedSessionStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PhotoSource for CountingSource {
        async fn fetch_photos(&self) -> Result<Vec<PhotoRecord>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                PhotoRecord {
                    id: 1,
                    title: "Nairobi Sunset".to_string(),
                    photographer: "A".to_string(),
                    country: "Kenya".to_string(),
                    url: "u1".to_string(),
                },
                PhotoRecord {
                    id: 2,
                    title: "Paris Lights".to_string(),
                    photographer: "B".to_string(),
                    country: "France".to_string(),
                    url: "u2".to_string(),
                },
            ])
        }
    }

    struct Fixture {
        album: AlbumUseCase,
        source: Arc<CountingSource>,
        views: Arc<ViewRegistry>,
        sessions: Arc<SignedSessionStore>,
    }

    impl Fixture {
        fn login(&self) -> String {
            self.sessions.login("test@example.com", "password123").unwrap().token
        }

        fn fetches(&self) -> usize {
            self.source.calls.load(Ordering::SeqCst)
        }
    }

    fn setup() -> Fixture {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
        let sessions = Arc::new(SignedSessionStore::new());
        let views = Arc::new(ViewRegistry::new(sessions.clone()));
        Fixture {
            album: AlbumUseCase::new(source.clone(), views.clone()),
            source,
            views,
            sessions,
        }
    }

    #[tokio::test]
    async fn test_open_loads_once_per_activation() {
        let f = setup();
        let s1 = f.login();
        assert_eq!(f.album.open(&s1).await.photos.len(), 2);
        f.album.open(&s1).await;
        f.album.search(&s1, "kenya").await.unwrap();
        assert_eq!(f.fetches(), 1);

        f.album.reload(&s1).await;
        assert_eq!(f.fetches(), 2);
    }

    #[tokio::test]
    async fn test_sessions_have_independent_likes() {
        let f = setup();
        let (s1, s2) = (f.login(), f.login());
        let liked = f.album.toggle_like(&s1, 2).await.unwrap();
        assert!(liked.is_liked);

        let other = f.album.open(&s2).await;
        assert!(other.photos.iter().all(|p| !p.is_liked));
    }

    #[tokio::test]
    async fn test_close_discards_the_view() {
        let f = setup();
        let s1 = f.login();
        f.album.toggle_like(&s1, 1).await.unwrap();
        f.album.close(&s1);
        assert!(f.views.is_empty());

        let snap = f.album.open(&s1).await;
        assert!(snap.photos.iter().all(|p| !p.is_liked));
        assert_eq!(f.fetches(), 2);
    }

    #[tokio::test]
    async fn test_logged_out_views_are_dropped_on_next_open() {
        let f = setup();
        let (s1, s2) = (f.login(), f.login());
        f.album.open(&s1).await;
        f.album.open(&s2).await;
        assert_eq!(f.views.len(), 2);

        f.sessions.logout(&s1);
        f.album.open(&s2).await;
        assert_eq!(f.views.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_unknown_photo() {
        let f = setup();
        let s1 = f.login();
        assert!(matches!(f.album.toggle_like(&s1, 42).await, Err(DomainError::NotFound)));
    }
}
