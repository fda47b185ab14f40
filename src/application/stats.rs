use crate::domain::{DirectoryService, DomainError, GalleryStats, HomeOverview, Photographer};
use std::collections::HashSet;
use std::sync::Arc;

const TOP_PHOTOGRAPHERS: usize = 5;

pub struct GalleryStatsUseCase {
    directory: Arc<dyn DirectoryService>,
}

impl GalleryStatsUseCase {
    pub fn new(directory: Arc<dyn DirectoryService>) -> Self {
        Self { directory }
    }

    /// Home page data. Fails if any of the three directory calls fails.
    pub async fn execute(&self) -> Result<HomeOverview, DomainError> {
        let (mut users, photos, albums) = tokio::try_join!(
            self.directory.list_users(),
            self.directory.count_photos(),
            self.directory.list_album_titles(),
        )?;

        // Album titles stand in for countries.
        let countries = albums.iter().collect::<HashSet<_>>().len();
        let stats = GalleryStats {
            users: users.len(),
            countries,
            photos,
        };

        users.sort_by(|a, b| b.id.cmp(&a.id));
        let top_photographers = users
            .into_iter()
            .take(TOP_PHOTOGRAPHERS)
            .map(|u| {
                let first_name = u.name.split(' ').next().unwrap_or_default().to_string();
                Photographer {
                    id: u.id,
                    image_url: format!("https://via.placeholder.com/150/1C3C58?text={}", first_name),
                    name: u.name,
                    username: u.username,
                }
            })
            .collect();

        Ok(HomeOverview {
            stats,
            top_photographers,
        })
    }
}
