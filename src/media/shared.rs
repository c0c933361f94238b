use crate::Locale;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A genre or tag of an anime.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct Tag {
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub id: Option<u64>,
    pub name: String,
}

/// A person who was involved in the production of an anime.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct StaffMember {
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_number")]
    pub id: Option<u64>,
    pub name: String,
    /// What the person did, e.g. `Director`.
    pub role: String,
}

/// A language an episode is available in.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct Language {
    #[serde(alias = "lang")]
    pub locale: Locale,
    pub name: String,
    /// If the language is a dub (`true`) or the original audio with subtitles (`false`). [`None`]
    /// if not delivered.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_bool")]
    pub dub: Option<bool>,
}

/// Stream sources of an episode.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "__test_strict", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "__test_strict"), serde(default))]
pub struct Stream {
    /// Maps a quality label (like `FHD`, `HD` or `SD`) to the url of the HLS playlist of this
    /// quality.
    #[serde(deserialize_with = "crate::internal::serde::deserialize_maybe_null_to_default")]
    pub sources: HashMap<String, String>,
}

impl Stream {
    /// All quality labels which have a stream source.
    pub fn qualities(&self) -> Vec<String> {
        let mut qualities: Vec<String> = self.sources.keys().cloned().collect();
        qualities.sort();
        qualities
    }
}
