//! Caller owned cache for episode lists.

use crate::media::{Anime, EpisodeList};
use crate::Result;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Maps anime ids to their previously fetched [`EpisodeList`]. Nothing is invalidated on its own,
/// use [`EpisodeCache::invalidate`] or [`EpisodeCache::clear`] if the episodes of an anime may
/// have changed (e.g. because a new episode aired).
#[derive(Clone, Debug, Default)]
pub struct EpisodeCache {
    entries: HashMap<u64, EpisodeList>,
}

impl EpisodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the episodes of the given anime. They are only requested if the cache doesn't
    /// contain them yet.
    pub async fn episodes(&mut self, anime: &Anime) -> Result<&EpisodeList> {
        match self.entries.entry(anime.id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!("Episodes of anime {} are not cached, requesting them", anime.id);
                Ok(entry.insert(anime.episodes().await?))
            }
        }
    }

    pub fn get(&self, anime_id: u64) -> Option<&EpisodeList> {
        self.entries.get(&anime_id)
    }

    /// Stores the episodes for an anime. Returns the previously cached episodes, if any.
    pub fn insert(&mut self, anime_id: u64, episodes: EpisodeList) -> Option<EpisodeList> {
        self.entries.insert(anime_id, episodes)
    }

    /// Removes the cached episodes of an anime so that the next [`EpisodeCache::episodes`] call
    /// requests them again.
    pub fn invalidate(&mut self, anime_id: u64) -> Option<EpisodeList> {
        self.entries.remove(&anime_id)
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
