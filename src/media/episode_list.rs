use crate::common::Request;
use crate::media::Episode;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// All episodes of an anime, in the order the api delivered them.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Request)]
#[request(executor(episodes))]
#[serde(transparent)]
pub struct EpisodeList {
    episodes: Vec<Episode>,
}

impl EpisodeList {
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Episode> {
        self.episodes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Episode> {
        self.episodes.iter_mut()
    }

    /// Get an episode by its episode number (not its id).
    pub fn by_number(&self, number: u32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.number == Some(number))
    }

    /// The episode with the highest episode number.
    pub fn last(&self) -> Option<&Episode> {
        self.episodes.iter().filter(|e| e.number.is_some()).max_by_key(|e| e.number)
    }

    pub fn into_inner(self) -> Vec<Episode> {
        self.episodes
    }
}

impl Index<usize> for EpisodeList {
    type Output = Episode;

    fn index(&self, index: usize) -> &Self::Output {
        &self.episodes[index]
    }
}

impl IntoIterator for EpisodeList {
    type Item = Episode;
    type IntoIter = std::vec::IntoIter<Episode>;

    fn into_iter(self) -> Self::IntoIter {
        self.episodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a EpisodeList {
    type Item = &'a Episode;
    type IntoIter = std::slice::Iter<'a, Episode>;

    fn into_iter(self) -> Self::IntoIter {
        self.episodes.iter()
    }
}

impl From<Vec<Episode>> for EpisodeList {
    fn from(episodes: Vec<Episode>) -> Self {
        Self { episodes }
    }
}
