use crate::aniwatch::Executor;
use crate::common::Request;
use crate::media::{Language, Stream};
use crate::{Locale, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Metadata for an episode. Obtained via [`crate::Anime::episodes`].
#[derive(Clone, Debug, Deserialize, Serialize, smart_default::SmartDefault, Request)]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct Episode {
    #[serde(skip)]
    pub(crate) executor: Arc<Executor>,

    /// Id of the anime this episode belongs to.
    #[serde(skip_deserializing)]
    pub anime_id: u64,

    #[serde(rename = "ep_id")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_number")]
    pub id: u64,
    /// The episode number may be [`None`] for specials.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub number: Option<u32>,
    pub title: String,
    pub description: String,
    /// Url to the thumbnail image.
    pub thumbnail: String,

    /// When the episode was added. Is [`None`] if the timestamp is missing or couldn't be
    /// parsed.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_timestamp")]
    pub added: Option<DateTime<Utc>>,
    /// Duration in seconds.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub duration: Option<u32>,

    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub filler: Option<bool>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub is_aired: Option<bool>,
    /// If the logged-in user has watched the episode.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub watched: Option<bool>,

    /// Languages the episode is available in, as delivered by the api (e.g. `en-US`).
    #[serde(deserialize_with = "crate::internal::serde::deserialize_string_or_vec")]
    pub lang: Vec<String>,
}

impl Episode {
    /// Requests the streaming information of this episode in the given language.
    pub async fn aniwatch_episode(&self, locale: Locale) -> Result<AniWatchEpisode> {
        let body = json!({
            "controller": "Anime",
            "action": "watchAnime",
            "lang": locale,
            "ep_id": self.id,
            "hoster": "",
        });
        let mut aniwatch_episode: AniWatchEpisode = self.executor.action(&body, None).await?;
        aniwatch_episode.episode_id = self.id;
        Ok(aniwatch_episode)
    }

    /// Marks the episode as watched by the logged-in user.
    pub async fn mark_as_watched(&self) -> Result<bool> {
        let body = json!({
            "controller": "Profile",
            "action": "markAsWatched",
            "detail_id": self.anime_id.to_string(),
            "episode_id": self.id,
        });
        self.executor.action(&body, Some("success")).await
    }

    /// The page on which this episode is watched on the website. Media requests must carry it
    /// as `Referer`.
    pub fn referer(&self) -> String {
        format!(
            "{}/anime/{}/{}",
            self.executor.site_root,
            self.anime_id,
            self.number.map_or("".to_string(), |n| n.to_string())
        )
    }
}

impl std::fmt::Display for Episode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.number {
            Some(number) => write!(f, "Episode {number}: {}", self.title),
            None => write!(f, "Episode: {}", self.title),
        }
    }
}

/// Streaming information of an episode, obtained via [`Episode::aniwatch_episode`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, Request)]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct AniWatchEpisode {
    #[serde(skip)]
    pub episode_id: u64,

    /// All languages the episode is available in.
    #[serde(rename = "lang")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_null_to_default")]
    pub languages: Vec<Language>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_null_to_default")]
    pub stream: Stream,
}

impl std::fmt::Display for AniWatchEpisode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Episode ID : {}", self.episode_id)
    }
}
