use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PhotoId = i64;

/// A photo exactly as the listing service sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub title: String,
    pub photographer: String,
    pub country: String,
    pub url: String,
}

/// A photo held by a collection view. `is_liked` lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    pub title: String,
    pub photographer: String,
    pub country: String,
    pub url: String,
    #[serde(default)]
    pub is_liked: bool,
}

impl Photo {
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.photographer.to_lowercase().contains(needle)
            || self.country.to_lowercase().contains(needle)
    }
}

impl From<PhotoRecord> for Photo {
    fn from(record: PhotoRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            photographer: record.photographer,
            country: record.country,
            url: record.url,
            is_liked: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub city: Option<String>,
}

/// A user record from the placeholder directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Traveller {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub country: String,
    pub travelled_countries: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryStats {
    pub users: usize,
    pub countries: usize,
    pub photos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photographer {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeOverview {
    pub stats: GalleryStats,
    pub top_photographers: Vec<Photographer>,
}

/// Profile form as submitted by a prospective photographer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub countries: String,
    #[serde(default)]
    pub sample_photos: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub catch_phrase: String,
}

/// Payload accepted by the directory's user-creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDirectoryUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub company: Company,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
