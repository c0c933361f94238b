use crate::aniwatch::Executor;
use crate::common::Request;
use crate::media::anime::request_anime;
use crate::{Anime, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An entry of the watch history of the logged-in user.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Request)]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct ChronicleEntry {
    #[serde(skip)]
    executor: Arc<Executor>,

    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub chronicle_id: Option<u64>,
    #[serde(rename = "detail_id")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_number")]
    pub anime_id: u64,
    pub anime_title: String,
    #[serde(rename = "ep_id")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub episode_id: Option<u64>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub episode_number: Option<u32>,
    /// When the episode was watched. Is [`None`] if the timestamp is missing or couldn't be
    /// parsed.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_timestamp")]
    pub date: Option<DateTime<Utc>>,
}

impl ChronicleEntry {
    pub async fn anime(&self) -> Result<Anime> {
        request_anime(&self.executor, self.anime_id).await
    }
}
