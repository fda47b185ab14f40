use super::models::{DirectoryUser, NewDirectoryUser, PhotoRecord, Session};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("Photo not found")]
    NotFound,
    #[error("Collection is still loading")]
    Busy,
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Invalid input: {0}")]
    Validation(String),
}

/// The photo-listing service a collection view loads from.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    async fn fetch_photos(&self) -> Result<Vec<PhotoRecord>, DomainError>;
}

/// The public placeholder directory of users, photos and albums.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DomainError>;
    async fn count_photos(&self) -> Result<usize, DomainError>;
    async fn list_album_titles(&self) -> Result<Vec<String>, DomainError>;
    /// Returns the id the directory assigned to the new user.
    async fn create_user(&self, user: &NewDirectoryUser) -> Result<i64, DomainError>;
}

pub trait SessionProvider: Send + Sync {
    fn login(&self, email: &str, password: &str) -> Result<Session, DomainError>;
    fn is_authenticated(&self, token: &str) -> bool;
    fn logout(&self, token: &str);
}
