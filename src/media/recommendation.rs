use crate::aniwatch::Executor;
use crate::common::Request;
use crate::media::anime::request_anime;
use crate::{Anime, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An anime users recommended for another one. Obtained via [`Anime::recommendations`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, Request)]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct RecommendationEntry {
    #[serde(skip)]
    executor: Arc<Executor>,

    #[serde(rename = "detail_id")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_number")]
    pub anime_id: u64,
    pub title: String,
    pub cover: String,
    /// How many users recommended it.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub votes: Option<u32>,
    /// If the logged-in user voted for this recommendation.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub voted: Option<bool>,
}

impl RecommendationEntry {
    /// Requests the recommended anime.
    pub async fn anime(&self) -> Result<Anime> {
        request_anime(&self.executor, self.anime_id).await
    }
}
