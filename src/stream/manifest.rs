use crate::error::Error;
use crate::Result;
use m3u8_rs::{ExtTag, KeyMethod, Playlist};
use reqwest::Url;

/// Location of the key a [`Segment`] is encrypted with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyRef {
    /// Url to the raw key bytes.
    pub uri: String,
    /// Initialization vector, only [`Some`] if the manifest specified one explicitly. If
    /// [`None`], a zero iv is used.
    pub iv: Option<[u8; 16]>,
}

/// A single part of a video stream. The actual video stream consists of multiple [`Segment`]s,
/// in playback order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    /// Url to the actual data.
    pub uri: String,
    /// Key to decrypt the segment data with (if encrypted).
    pub key: Option<KeyRef>,
}

/// All segments of an episode in a specific quality, parsed from a HLS media playlist.
#[derive(Clone, Debug, Default)]
pub struct Manifest {
    url: String,
    segments: Vec<Segment>,
}

impl Manifest {
    /// Parses a HLS media playlist. Relative segment and key urls are resolved against `url`.
    /// Master playlists are rejected, use [`crate::Episode::manifest`] if the playlist may be one.
    pub fn parse(raw: &[u8], url: impl AsRef<str>) -> Result<Manifest> {
        match parse_playlist(raw, url.as_ref())? {
            ParsedPlaylist::Media(manifest) => Ok(manifest),
            ParsedPlaylist::Master(_) => Err(Error::Resolution {
                message: "expected a media playlist but got a master playlist".to_string(),
                url: url.as_ref().to_string(),
            }),
        }
    }

    /// Creates a manifest from already known segments.
    pub fn from_segments(url: impl AsRef<str>, segments: Vec<Segment>) -> Manifest {
        Manifest {
            url: url.as_ref().to_string(),
            segments,
        }
    }

    /// Url the manifest was fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

pub(crate) enum ParsedPlaylist {
    Media(Manifest),
    /// Variant urls (already resolved) with their bandwidth.
    Master(Vec<(u64, String)>),
}

impl ParsedPlaylist {
    /// Url of the variant with the highest bandwidth.
    pub(crate) fn best_variant(variants: &[(u64, String)]) -> Option<&str> {
        variants
            .iter()
            .max_by_key(|(bandwidth, _)| *bandwidth)
            .map(|(_, url)| url.as_str())
    }
}

pub(crate) fn parse_playlist(raw: &[u8], url: &str) -> Result<ParsedPlaylist> {
    let resolution_err = |message: String| Error::Resolution {
        message,
        url: url.to_string(),
    };

    let playlist = m3u8_rs::parse_playlist_res(raw)
        .map_err(|e| resolution_err(format!("malformed manifest: {e}")))?;

    let media_playlist = match playlist {
        Playlist::MasterPlaylist(master) => {
            let mut variants = vec![];
            for variant in master.variants.into_iter().filter(|v| !v.is_i_frame) {
                variants.push((variant.bandwidth, resolve_uri(url, &variant.uri)?));
            }
            return Ok(ParsedPlaylist::Master(variants));
        }
        Playlist::MediaPlaylist(media) => media,
    };

    let mut segments = vec![];
    // a key tag applies to every following segment until the next key tag
    let mut current_key: Option<KeyRef> = None;

    for segment in media_playlist.segments {
        // m3u8-rs keeps a bare `METHOD=NONE` key tag as an unknown tag
        if clears_key(&segment.unknown_tags) {
            current_key = None
        }
        if let Some(key) = segment.key {
            current_key = match key.method {
                KeyMethod::None => None,
                KeyMethod::AES128 => {
                    let uri = key
                        .uri
                        .ok_or_else(|| resolution_err("key without uri".to_string()))?;
                    let iv = key.iv.as_deref().map(|iv| parse_iv(iv, url)).transpose()?;
                    Some(KeyRef {
                        uri: resolve_uri(url, &uri)?,
                        iv,
                    })
                }
                other => {
                    return Err(resolution_err(format!(
                        "unsupported encryption method: {other}"
                    )))
                }
            }
        }

        segments.push(Segment {
            uri: resolve_uri(url, &segment.uri)?,
            key: current_key.clone(),
        })
    }

    Ok(ParsedPlaylist::Media(Manifest {
        url: url.to_string(),
        segments,
    }))
}

fn clears_key(tags: &[ExtTag]) -> bool {
    tags.iter().any(|tag| {
        tag.tag == "X-KEY"
            && tag
                .rest
                .as_deref()
                .is_some_and(|rest| rest.split(',').any(|attr| attr.trim() == "METHOD=NONE"))
    })
}

fn resolve_uri(base: &str, uri: &str) -> Result<String> {
    if Url::parse(uri).is_ok() {
        return Ok(uri.to_string());
    }
    Url::parse(base)
        .and_then(|base_url| base_url.join(uri))
        .map(|url| url.to_string())
        .map_err(|e| Error::Resolution {
            message: format!("cannot resolve '{uri}': {e}"),
            url: base.to_string(),
        })
}

/// Parses a hex iv like `0x000102030405060708090a0b0c0d0e0f`.
fn parse_iv(raw: &str, url: &str) -> Result<[u8; 16]> {
    let hex = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    if hex.len() != 32 {
        return Err(Error::Resolution {
            message: format!("invalid iv length: '{raw}'"),
            url: url.to_string(),
        });
    }
    u128::from_str_radix(hex, 16)
        .map(u128::to_be_bytes)
        .map_err(|e| Error::Resolution {
            message: format!("invalid iv '{raw}': {e}"),
            url: url.to_string(),
        })
}
