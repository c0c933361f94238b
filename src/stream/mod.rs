//! Download the video data of episodes.
//!
//! Episodes are delivered as HLS streams. A [`Manifest`] lists the segments of an episode, each
//! segment is fetched with a [`SegmentFetcher`], decrypted with [`decode`] if it's encrypted and
//! then appended to the output. Use [`crate::Episode::download`] to do all of this at once.

mod decode;
mod download;
mod fetch;
mod manifest;

pub use decode::{decode, decode_with_iv, KEY_SIZE};
pub use download::{write_segments, DownloadOptions};
pub use fetch::{FetchedSegment, RequestContext, SegmentFetcher};
pub use manifest::{KeyRef, Manifest, Segment};
