use crate::aniwatch::Executor;
use crate::common::Request;
use crate::media::anime::request_anime;
use crate::{Anime, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A group of anime which belong together, e.g. all seasons and movies of a franchise.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Request)]
#[request(executor(entries))]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct Relation {
    #[serde(alias = "relation_id")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub id: Option<u64>,
    pub title: String,
    pub description: String,

    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_null_to_default")]
    pub entries: Vec<RelationEntry>,
}

/// A single anime in a [`Relation`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, Request)]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct RelationEntry {
    #[serde(skip)]
    executor: Arc<Executor>,

    #[serde(rename = "detail_id")]
    #[serde(deserialize_with = "crate::internal::serde::deserialize_number")]
    pub anime_id: u64,
    pub title: String,
    /// E.g. `Sequel`, `Prequel` or `Side story`.
    #[serde(rename = "type")]
    pub relation_type: String,
    pub cover: String,
}

impl RelationEntry {
    pub async fn anime(&self) -> Result<Anime> {
        request_anime(&self.executor, self.anime_id).await
    }
}
