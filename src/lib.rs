//! # aniwatch-rs
//!
//! A easy-to-use library for the undocumented [AniWatch](https://aniwatch.me/) api, completely
//! written in Rust.
//!
//! Beside browsing the catalog (anime, episodes, relations, recommendations) and managing the
//! anime list of a logged-in user, the main feature of this crate is downloading episodes. Episodes
//! are delivered as (optionally AES-128 encrypted) HLS streams which are fetched segment by
//! segment, decrypted and written into a single transport stream file.
//!
//! ```no_run
//! use aniwatch::{AniWatch, Anime};
//! use aniwatch::stream::DownloadOptions;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), aniwatch::error::Error> {
//! let aniwatch = AniWatch::builder()
//!     .cookie("SESSION", "<session cookie>")
//!     .build()?;
//!
//! let anime = Anime::from_id(&aniwatch, 1234).await?;
//! let episodes = anime.episodes().await?;
//! if let Some(episode) = episodes.by_number(1) {
//!     let options = DownloadOptions::new()
//!         .prefetch(4)
//!         .progress(|completed, total| {
//!             println!("{completed}/{total}");
//!             Ok(())
//!         });
//!     episode.download("HD", "episode-1.ts", options).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Implementation
//! AniWatch has no versioned api, changes are likely to happen without notice. To catch them, a
//! special feature only for testing is implemented. When running tests with the `__test_strict`
//! feature, it ensures that no fields were added to an api response, otherwise the associated
//! test will fail.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod aniwatch;
pub mod cache;
pub mod error;
pub mod media;
#[cfg(feature = "parse")]
pub mod parse;
#[cfg(feature = "stream")]
pub mod stream;

// internal
mod common;
mod internal;
mod macros;

// internal
pub(crate) use aniwatch::Executor;
pub(crate) use common::Request;
pub(crate) use error::Result;
pub(crate) use macros::enum_values;

pub use aniwatch::{AniWatch, AniWatchBuilder, Locale};
pub use cache::EpisodeCache;
pub use media::{AniWatchEpisode, Anime, Episode, EpisodeList};
