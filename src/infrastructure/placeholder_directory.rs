use crate::domain::{DirectoryService, DirectoryUser, DomainError, NewDirectoryUser};
use crate::infrastructure::http_client::read_json;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;

#[derive(Deserialize)]
struct AlbumRecord {
    title: String,
}

#[derive(Deserialize)]
struct CreatedUser {
    id: i64,
}

/// The public placeholder REST API (users, photos, albums).
pub struct PlaceholderDirectory {
    client: Client,
    base_url: String,
}

impl PlaceholderDirectory {
    pub fn new(client: Client, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        let url = format!("{}{}", self.base_url, path);
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Network(format!("Request to {} failed: {}", path, e)))?;
        read_json(res, path).await
    }
}

#[async_trait]
impl DirectoryService for PlaceholderDirectory {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DomainError> {
        self.get_json("/users").await
    }

    async fn count_photos(&self) -> Result<usize, DomainError> {
        let photos: Vec<IgnoredAny> = self.get_json("/photos").await?;
        Ok(photos.len())
    }

    async fn list_album_titles(&self) -> Result<Vec<String>, DomainError> {
        let albums: Vec<AlbumRecord> = self.get_json("/albums").await?;
        Ok(albums.into_iter().map(|a| a.title).collect())
    }

    async fn create_user(&self, user: &NewDirectoryUser) -> Result<i64, DomainError> {
        let res = self
            .client
            .post(format!("{}/users", self.base_url))
            .json(user)
            .send()
            .await
            .map_err(|e| DomainError::Network(format!("Request to /users failed: {}", e)))?;
        let created: CreatedUser = read_json(res, "/users").await?;
        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Company};
    use crate::infrastructure::http_client::build_client;
    use axum::{
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use std::time::Duration;

    async fn mock_placeholder() -> String {
        let router = Router::new()
            .route(
                "/users",
                get(|| async {
                    Json(serde_json::json!([
                        { "id": 1, "name": "Leanne Graham", "username": "Bret", "email": "leanne@april.biz",
                          "address": { "street": "Kulas Light", "city": "Gwenborough" } },
                        { "id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "shanna@melissa.tv" }
                    ]))
                })
                .post(|Json(body): Json<serde_json::Value>| async move {
                    let mut created = body;
                    created["id"] = serde_json::json!(11);
                    (StatusCode::CREATED, Json(created))
                }),
            )
            .route(
                "/photos",
                get(|| async {
                    Json(serde_json::json!([
                        { "albumId": 1, "id": 1, "title": "accusamus", "url": "a", "thumbnailUrl": "b" },
                        { "albumId": 1, "id": 2, "title": "reprehenderit", "url": "c", "thumbnailUrl": "d" },
                        { "albumId": 2, "id": 3, "title": "officia", "url": "e", "thumbnailUrl": "f" }
                    ]))
                }),
            )
            .route(
                "/albums",
                get(|| async {
                    Json(serde_json::json!([
                        { "userId": 1, "id": 1, "title": "quidem molestiae enim" },
                        { "userId": 1, "id": 2, "title": "sunt qui excepturi" }
                    ]))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn directory(base_url: String) -> PlaceholderDirectory {
        PlaceholderDirectory::new(build_client(Duration::from_secs(5)), base_url)
    }

    #[tokio::test]
    async fn test_directory_reads() {
        let directory = directory(mock_placeholder().await);

        let users = directory.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].address.as_ref().and_then(|a| a.city.as_deref()), Some("Gwenborough"));
        assert!(users[1].address.is_none());

        assert_eq!(directory.count_photos().await.unwrap(), 3);
        assert_eq!(
            directory.list_album_titles().await.unwrap(),
            vec!["quidem molestiae enim", "sunt qui excepturi"]
        );
    }

    #[tokio::test]
    async fn test_directory_create_user() {
        let directory = directory(mock_placeholder().await);
        let user = NewDirectoryUser {
            name: "QA Test".to_string(),
            email: "qa@test.com".to_string(),
            username: "qa@test.com".to_string(),
            company: Company {
                catch_phrase: "Street scenes".to_string(),
            },
            address: Address {
                city: Some("Lisbon".to_string()),
            },
        };
        assert_eq!(directory.create_user(&user).await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_directory_missing_route() {
        let directory = directory(mock_placeholder().await);
        let err = directory.get_json::<Vec<IgnoredAny>>("/comments").await.unwrap_err();
        assert!(matches!(err, DomainError::Network(_)));
    }
}
