use crate::domain::{Address, DirectoryService, DirectoryUser, DomainError, NewDirectoryUser};
use async_trait::async_trait;
use std::sync::Mutex;

pub fn user(id: i64, name: &str, city: Option<&str>) -> DirectoryUser {
    DirectoryUser {
        id,
        name: name.to_string(),
        username: name.split(' ').next().unwrap_or_default().to_lowercase(),
        email: format!("user{}@example.com", id),
        address: Some(Address {
            city: city.map(str::to_string),
        }),
    }
}

/// In-memory directory. `fail` makes every call return a network error.
pub struct MockDirectory {
    pub users: Vec<DirectoryUser>,
    pub photos: usize,
    pub albums: Vec<String>,
    pub fail: bool,
    pub created: Mutex<Vec<NewDirectoryUser>>,
}

impl MockDirectory {
    pub fn new(users: Vec<DirectoryUser>) -> Self {
        Self {
            users,
            photos: 0,
            albums: Vec::new(),
            fail: false,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail {
            Err(DomainError::Network("status 503 Service Unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DirectoryService for MockDirectory {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DomainError> {
        self.check()?;
        Ok(self.users.clone())
    }

    async fn count_photos(&self) -> Result<usize, DomainError> {
        self.check()?;
        Ok(self.photos)
    }

    async fn list_album_titles(&self) -> Result<Vec<String>, DomainError> {
        self.check()?;
        Ok(self.albums.clone())
    }

    async fn create_user(&self, user: &NewDirectoryUser) -> Result<i64, DomainError> {
        self.check()?;
        let mut created = self.created.lock().unwrap();
        created.push(user.clone());
        Ok(10 + created.len() as i64)
    }
}
