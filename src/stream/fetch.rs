use crate::error::Error;
use crate::media::Episode;
use crate::stream::Segment;
use crate::{Executor, Result};
use bytes::Bytes;
use http::header::{self, HeaderMap, HeaderValue};
use std::sync::Arc;

/// Headers every media request of one download carries. Built once per download and never
/// modified afterwards, the base headers of the [`crate::AniWatch`] instance stay untouched.
#[derive(Clone, Debug)]
pub struct RequestContext {
    headers: HeaderMap,
}

impl RequestContext {
    /// Merges `Referer` and `Origin` into a copy of `base`.
    pub fn new(base: &HeaderMap, referer: &str, origin: &str) -> Result<Self> {
        let mut headers = base.clone();
        headers.insert(header::REFERER, header_value(referer)?);
        headers.insert(header::ORIGIN, header_value(origin)?);

        Ok(Self { headers })
    }

    /// Context for media requests of `episode`, its `Referer` is the episode page.
    pub fn for_episode(episode: &Episode) -> Result<Self> {
        Self::new(
            &episode.executor.headers,
            &episode.referer(),
            &episode.executor.site_root,
        )
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Input {
        message: format!("invalid header value '{value}': {e}"),
    })
}

/// Raw data of a [`Segment`], not decrypted yet.
#[derive(Clone, Debug)]
pub struct FetchedSegment {
    pub data: Bytes,
    /// The key bytes, if the segment is encrypted.
    pub key: Option<Bytes>,
    pub iv: Option<[u8; 16]>,
}

/// Fetches manifests, segments and keys with the headers of a [`RequestContext`].
#[derive(Clone, Debug)]
pub struct SegmentFetcher {
    executor: Arc<Executor>,
    context: RequestContext,
}

impl SegmentFetcher {
    pub(crate) fn new(executor: Arc<Executor>, context: RequestContext) -> Self {
        Self { executor, context }
    }

    pub fn for_episode(episode: &Episode) -> Result<Self> {
        Ok(Self::new(
            episode.executor.clone(),
            RequestContext::for_episode(episode)?,
        ))
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Fetches the raw body of `url`. Non-success status codes result in [`Error::Request`].
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        self.executor
            .get(url)
            .headers(self.context.headers.clone())
            .request_raw()
            .await
    }

    /// Fetches the data of a segment and, if it's encrypted, its key.
    pub async fn fetch_segment(&self, segment: &Segment) -> Result<FetchedSegment> {
        let data = self.fetch(&segment.uri).await?;

        let (key, iv) = match &segment.key {
            Some(key_ref) => (Some(self.fetch(&key_ref.uri).await?), key_ref.iv),
            None => (None, None),
        };

        Ok(FetchedSegment { data, key, iv })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_does_not_touch_base_headers() {
        let mut base = HeaderMap::new();
        base.insert(header::COOKIE, HeaderValue::from_static("session=abc"));

        let context = RequestContext::new(
            &base,
            "https://aniwatch.me/anime/1/2",
            "https://aniwatch.me",
        )
        .unwrap();

        assert_eq!(
            context.headers().get(header::REFERER).unwrap(),
            "https://aniwatch.me/anime/1/2"
        );
        assert_eq!(
            context.headers().get(header::ORIGIN).unwrap(),
            "https://aniwatch.me"
        );
        assert_eq!(context.headers().get(header::COOKIE).unwrap(), "session=abc");
        assert!(base.get(header::REFERER).is_none())
    }

    #[test]
    fn invalid_referer_is_rejected() {
        let result = RequestContext::new(&HeaderMap::new(), "bad\nvalue", "https://aniwatch.me");
        assert!(matches!(result, Err(Error::Input { .. })))
    }
}
