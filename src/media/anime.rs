use crate::aniwatch::Executor;
use crate::common::Request;
use crate::media::{ChronicleEntry, EpisodeList, RecommendationEntry, Relation, StaffMember, Tag};
use crate::{AniWatch, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Metadata for an anime. AniWatch calls the id of an anime `detail_id`.
///
/// Fields the api didn't deliver are [`None`] (or empty for lists / strings). Use
/// [`Anime::complete`] to get all fields if this struct was obtained from a partial listing (e.g.
/// a [`RecommendationEntry`]).
#[derive(Clone, Debug, Deserialize, Serialize, smart_default::SmartDefault, Request)]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct Anime {
    #[serde(skip)]
    pub(crate) executor: Arc<Executor>,

    #[serde(rename = "detail_id")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_number")]
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Url to the cover image.
    pub cover: String,
    /// E.g. `TV`, `Movie` or `OVA`.
    #[serde(rename = "type")]
    pub anime_type: String,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_string_or_vec")]
    pub synonyms: Vec<String>,

    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_null_to_default")]
    pub genre: Vec<Tag>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_null_to_default")]
    pub tags: Vec<Tag>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_null_to_default")]
    pub staff: Vec<StaffMember>,

    /// Id which can be used to get all related anime, see [`Anime::relations`].
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub relation_id: Option<u64>,

    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_string")]
    pub airing_start: Option<String>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_string")]
    pub airing_end: Option<String>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub airing_start_unknown: Option<bool>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub airing_end_unknown: Option<bool>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub start_index: Option<i64>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub end_index: Option<i64>,

    /// Is [`None`] if the timestamp is missing or couldn't be parsed.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_timestamp")]
    pub broadcast_start: Option<DateTime<Utc>>,
    /// Is [`None`] if the timestamp is missing or couldn't be parsed.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_timestamp")]
    pub launch_day: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_string")]
    pub broadcast_time: Option<String>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub launch_offset: Option<i64>,

    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub episode_max: Option<u32>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub cur_episodes: Option<u32>,

    #[serde(rename = "hasNudity")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub has_nudity: Option<bool>,

    // list state of the logged-in user. all `None` if no user is logged in
    #[serde(rename = "isOnAnimeList")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub is_on_anime_list: Option<bool>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub planned_to_watch: Option<bool>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub completed: Option<bool>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub watching: Option<bool>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub dropped: Option<bool>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub on_hold: Option<bool>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub progress: Option<u32>,
    /// The rating the logged-in user gave.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub rating: Option<u32>,

    #[serde(rename = "member_counters")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub members_counter: Option<u64>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub members_counter_rank: Option<u64>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub score: Option<f64>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub score_count: Option<u64>,
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub score_rank: Option<u64>,
}

impl Anime {
    /// Requests an anime by its id (`detail_id`).
    pub async fn from_id(aniwatch: &AniWatch, id: u64) -> Result<Anime> {
        request_anime(&aniwatch.executor, id).await
    }

    /// Returns all episodes of this anime. Every call requests them again, use
    /// [`crate::EpisodeCache`] if you want to reuse them.
    pub async fn episodes(&self) -> Result<EpisodeList> {
        let mut episodes: EpisodeList = self
            .executor
            .action(&self.action_body("Anime", "getEpisodes"), Some("episodes"))
            .await?;
        for episode in episodes.iter_mut() {
            episode.anime_id = self.id;
        }
        Ok(episodes)
    }

    /// Returns the relation (e.g. prequels and sequels) this anime is part of. Is [`None`] if the
    /// anime has no [`Anime::relation_id`].
    pub async fn relations(&self) -> Result<Option<Relation>> {
        let Some(relation_id) = self.relation_id else {
            return Ok(None);
        };
        let body = json!({
            "controller": "Relation",
            "action": "getRelation",
            "relation_id": relation_id,
        });
        Ok(Some(self.executor.action(&body, Some("relation")).await?))
    }

    /// Returns anime which were recommended by users who liked this anime.
    pub async fn recommendations(&self) -> Result<Vec<RecommendationEntry>> {
        self.executor
            .action(
                &self.action_body("Anime", "getRecommendations"),
                Some("entries"),
            )
            .await
    }

    /// Returns the watch history of the logged-in user for this anime. Pages start at 1.
    pub async fn chronicle(&self, page: u32) -> Result<Vec<ChronicleEntry>> {
        let body = json!({
            "controller": "Profile",
            "action": "getChronicle",
            "detail_id": self.id.to_string(),
            "page": page,
        });
        self.executor.action(&body, Some("chronicle")).await
    }

    pub async fn mark_as_completed(&self) -> Result<bool> {
        self.profile_action("markAsCompleted").await
    }

    pub async fn mark_as_plan_to_watch(&self) -> Result<bool> {
        self.profile_action("markAsPlannedToWatch").await
    }

    pub async fn mark_as_on_hold(&self) -> Result<bool> {
        self.profile_action("markAsOnHold").await
    }

    pub async fn mark_as_dropped(&self) -> Result<bool> {
        self.profile_action("markAsDropped").await
    }

    pub async fn mark_as_watching(&self) -> Result<bool> {
        self.profile_action("markAsWatching").await
    }

    /// Removes the anime from the anime list of the logged-in user.
    pub async fn remove_from_list(&self) -> Result<bool> {
        self.profile_action("removeAnime").await
    }

    /// Rates the anime. A rating of 0 removes the rating.
    pub async fn rate(&self, rating: u32) -> Result<bool> {
        let body = json!({
            "controller": "Profile",
            "action": "rateAnime",
            "detail_id": self.id.to_string(),
            "rating": rating,
        });
        self.executor.action(&body, Some("success")).await
    }

    /// Requests this anime again with all fields populated.
    pub async fn complete(&self) -> Result<Anime> {
        request_anime(&self.executor, self.id).await
    }

    /// Recommends another anime for this one. The raw api response is returned as its content
    /// differs depending on whether the recommendation was accepted.
    pub async fn add_recommendation(&self, recommended_anime_id: u64) -> Result<Value> {
        let body = json!({
            "controller": "Anime",
            "action": "addRecommendation",
            "detail_id": self.id.to_string(),
            "recommendation": recommended_anime_id.to_string(),
        });
        self.executor.action(&body, None).await
    }

    async fn profile_action(&self, action: &str) -> Result<bool> {
        self.executor
            .action(&self.action_body("Profile", action), Some("success"))
            .await
    }

    fn action_body(&self, controller: &str, action: &str) -> Value {
        json!({
            "controller": controller,
            "action": action,
            "detail_id": self.id.to_string(),
        })
    }
}

pub(crate) async fn request_anime(executor: &Arc<Executor>, id: u64) -> Result<Anime> {
    let body = json!({
        "controller": "Anime",
        "action": "getAnime",
        "detail_id": id.to_string(),
    });
    executor.action(&body, Some("anime")).await
}

impl AniWatch {
    /// Requests an anime by its id (`detail_id`).
    pub async fn anime_from_id(&self, id: u64) -> Result<Anime> {
        Anime::from_id(self, id).await
    }
}

impl std::fmt::Display for Anime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}
