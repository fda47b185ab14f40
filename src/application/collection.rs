//! Single source of truth for one loaded photo listing.
//!
//! Photos are indexed by id and remember their load order. Filtering never
//! copies records, it returns ids, so a like toggle can only ever touch one
//! record and every projection reads that same record back.

use crate::domain::{DomainError, Photo, PhotoId, PhotoRecord};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct PhotoCollection {
    order: Vec<PhotoId>,
    photos: HashMap<PhotoId, Photo>,
}

impl PhotoCollection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a collection with every photo unliked.
    /// A listing that repeats an id is rejected as a whole.
    pub fn from_records(records: Vec<PhotoRecord>) -> Result<Self, DomainError> {
        let mut order = Vec::with_capacity(records.len());
        let mut photos = HashMap::with_capacity(records.len());

        for record in records {
            let id = record.id;
            if photos.insert(id, Photo::from(record)).is_some() {
                return Err(DomainError::Malformed(format!("duplicate photo id {}", id)));
            }
            order.push(id);
        }

        Ok(Self { order, photos })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.get(&id)
    }

    pub fn ids(&self) -> Vec<PhotoId> {
        self.order.clone()
    }

    /// Photos in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Photo> + '_ {
        self.order.iter().filter_map(|id| self.photos.get(id))
    }

    /// Ids of every photo whose title, photographer or country contains
    /// `query`, ignoring case. An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<PhotoId> {
        let needle = normalize_query(query);
        self.iter()
            .filter(|photo| photo.matches(&needle))
            .map(|photo| photo.id)
            .collect()
    }

    /// Flips the like flag of `id` and returns its new value.
    pub fn toggle_like(&mut self, id: PhotoId) -> Result<bool, DomainError> {
        let photo = self.photos.get_mut(&id).ok_or(DomainError::NotFound)?;
        photo.is_liked = !photo.is_liked;
        Ok(photo.is_liked)
    }

    /// Clones the photos behind `ids`, skipping any the collection doesn't hold.
    pub fn resolve(&self, ids: &[PhotoId]) -> Vec<Photo> {
        ids.iter().filter_map(|id| self.photos.get(id)).cloned().collect()
    }
}

pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

/// Message shown when a search comes back empty. `query` is shown as given.
pub fn no_results_message(query: &str) -> String {
    format!("No photos found for \"{}\".", query)
}
