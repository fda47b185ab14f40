use crate::domain::{DirectoryService, DirectoryUser, DomainError, Traveller};
use std::sync::Arc;

const LANDSCAPE_IMAGES: [&str; 6] = [
    "https://images.unsplash.com/photo-1542051841857-5f9976535a29?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=MnwzNTg0NTd8MHwxfHNlYXJjaHwxfHxKYXBhbnxlbnwwfHx8fDE2NzY3ODAzMDM&ixlib=rb-4.0.3&q=80&w=1080",
    "https://images.unsplash.com/photo-1533105079780-92b9be482077?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=MnwzNTg0NTd8MHwxfHNlYXJjaHwyfHxJdGFseXxlbnwwfHx8fDE2NzY3ODAzMDM&ixlib=rb-4.0.3&q=80&w=1080",
    "https://images.unsplash.com/photo-1555027552-b13c1c9c0b2b?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=MnwzNTg0NTd8MHwxfHNlYXJjaHwzfHxicmF6aWx8ZW58MHx8fHwxNjc2NzgwMzAz&ixlib=rb-4.0.3&q=80&w=1080",
    "https://images.unsplash.com/photo-1596707174676-e41c4d4f8f4a?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=MnwzNTg0NTd8MHwxfHNlYXJjaHw0fHxBdXN0cmFsaWF8ZW58MHx8fHwxNjc2NzgwMzAz&ixlib=rb-4.0.3&q=80&w=1080",
    "https://images.unsplash.com/photo-1559828453-2ce5255c4a4a?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=MnwzNTg0NTd8MHwxfHxHZ3lwdHxlbnwwfHx8fDE2NzY3ODAzMDM&ixlib=rb-4.0.3&q=80&w=1080",
    "https://images.unsplash.com/photo-1502602898950-8b02441c0975?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=MnwzNTg0NTd8MHwxfHNlYXJjaHw2fHxGcmFuY2V8ZW58MHx8fHwxNjc2NzgwMzAz&ixlib=rb-4.0.3&q=80&w=1080",
];

const DESTINATIONS: [&str; 4] = ["Paris", "Tokyo", "London", "Sydney"];

const DEFAULT_COUNTRY: &str = "Global Traveler";

/// Landing page: every directory user presented as a travelling photographer.
pub struct ListTravellersUseCase {
    directory: Arc<dyn DirectoryService>,
}

impl ListTravellersUseCase {
    pub fn new(directory: Arc<dyn DirectoryService>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self) -> Result<Vec<Traveller>, DomainError> {
        let users = self.directory.list_users().await?;
        Ok(users
            .into_iter()
            .enumerate()
            .map(|(index, user)| to_traveller(index, user))
            .collect())
    }
}

fn to_traveller(index: usize, user: DirectoryUser) -> Traveller {
    let country = user
        .address
        .and_then(|a| a.city)
        .filter(|city| !city.is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

    Traveller {
        id: user.id,
        name: user.name,
        username: user.username,
        email: user.email,
        country,
        travelled_countries: DESTINATIONS[..2].join(", "),
        image_url: LANDSCAPE_IMAGES[index % LANDSCAPE_IMAGES.len()].to_string(),
    }
}
