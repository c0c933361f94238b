use crate::error::Error;
use crate::media::Episode;
use crate::stream::manifest::{parse_playlist, ParsedPlaylist};
use crate::stream::{decode_with_iv, Manifest, SegmentFetcher};
use crate::{Locale, Result};
use futures::{stream, StreamExt};
use log::{debug, info};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio_util::sync::CancellationToken;

type ProgressFn = Box<dyn FnMut(usize, usize) -> Result<()> + Send>;

/// Options for [`Episode::download`].
pub struct DownloadOptions {
    locale: Locale,
    prefetch: usize,
    progress: Option<ProgressFn>,
    cancel: Option<CancellationToken>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            prefetch: 1,
            progress: None,
            cancel: None,
        }
    }
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Language whose stream should be downloaded. Defaults to [`Locale::en_US`].
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// How many segments may be fetched ahead of the one currently written. Segments are always
    /// written in manifest order, regardless of the order their requests finish. Values below 1
    /// are treated as 1, which fetches strictly one segment after another.
    pub fn prefetch(mut self, prefetch: usize) -> Self {
        self.prefetch = prefetch.max(1);
        self
    }

    /// Called with `(completed, total)` after every segment was written and flushed to the
    /// output. Returning an error aborts the download with that error, all segments written until
    /// then stay in the output.
    pub fn progress<F: FnMut(usize, usize) -> Result<()> + Send + 'static>(
        mut self,
        progress: F,
    ) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Aborts the download with [`Error::Cancelled`] once the token is cancelled. It's checked
    /// between segments, a segment which is currently written is always finished.
    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl Episode {
    /// Resolves the segments of this episode in the given quality (e.g. `HD`), in english. Use
    /// [`Episode::manifest_with_locale`] to get another language.
    pub async fn manifest<S: AsRef<str>>(&self, quality: S) -> Result<Manifest> {
        self.manifest_with_locale(quality, Locale::en_US).await
    }

    /// Resolves the segments of this episode in the given quality and language.
    pub async fn manifest_with_locale<S: AsRef<str>>(
        &self,
        quality: S,
        locale: Locale,
    ) -> Result<Manifest> {
        let fetcher = SegmentFetcher::for_episode(self)?;
        self.resolve_manifest(&fetcher, quality.as_ref(), locale)
            .await
    }

    /// Downloads this episode in the given quality to `path`. The file is created (or truncated)
    /// after the manifest was resolved successfully. If an error occurs, all segments which were
    /// written until then stay in the file.
    pub async fn download<S: AsRef<str>, P: AsRef<Path>>(
        &self,
        quality: S,
        path: P,
        options: DownloadOptions,
    ) -> Result<()> {
        let fetcher = SegmentFetcher::for_episode(self)?;
        let manifest = self
            .resolve_manifest(&fetcher, quality.as_ref(), options.locale.clone())
            .await?;

        let file = File::create(path.as_ref()).await?;
        info!(
            "Downloading {} ({} segments) to {}",
            self,
            manifest.len(),
            path.as_ref().display()
        );
        write_segments(&fetcher, &manifest, file, options).await
    }

    /// Like [`Episode::download`] but writes to any [`AsyncWrite`] sink.
    pub async fn download_to_writer<S: AsRef<str>, W: AsyncWrite + Unpin>(
        &self,
        quality: S,
        writer: W,
        options: DownloadOptions,
    ) -> Result<()> {
        let fetcher = SegmentFetcher::for_episode(self)?;
        let manifest = self
            .resolve_manifest(&fetcher, quality.as_ref(), options.locale.clone())
            .await?;

        write_segments(&fetcher, &manifest, writer, options).await
    }

    async fn resolve_manifest(
        &self,
        fetcher: &SegmentFetcher,
        quality: &str,
        locale: Locale,
    ) -> Result<Manifest> {
        let aniwatch_episode = self.aniwatch_episode(locale.clone()).await?;
        let Some(url) = aniwatch_episode.stream.sources.get(quality) else {
            return Err(Error::Resolution {
                message: format!(
                    "quality '{quality}' is not available for {locale} (available: {})",
                    aniwatch_episode.stream.qualities().join(", ")
                ),
                url: self.executor.api_url.clone(),
            });
        };

        debug!("Resolving manifest {url}");
        match parse_playlist(&fetcher.fetch(url).await?, url)? {
            ParsedPlaylist::Media(manifest) => Ok(manifest),
            ParsedPlaylist::Master(variants) => {
                let Some(variant_url) = ParsedPlaylist::best_variant(&variants) else {
                    return Err(Error::Resolution {
                        message: "master playlist has no variants".to_string(),
                        url: url.clone(),
                    });
                };
                debug!("Manifest is a master playlist, following {variant_url}");
                Manifest::parse(&fetcher.fetch(variant_url).await?, variant_url)
            }
        }
    }
}

/// Fetches, decodes and writes every segment of `manifest` in order. The sink is flushed before
/// returning, also if the download failed.
pub async fn write_segments<W: AsyncWrite + Unpin>(
    fetcher: &SegmentFetcher,
    manifest: &Manifest,
    writer: W,
    mut options: DownloadOptions,
) -> Result<()> {
    let mut sink = BufWriter::new(writer);

    let result = pipe_segments(fetcher, manifest, &mut sink, &mut options).await;
    let flushed = sink.flush().await;

    result?;
    flushed?;
    Ok(())
}

async fn pipe_segments<W: AsyncWrite + Unpin>(
    fetcher: &SegmentFetcher,
    manifest: &Manifest,
    sink: &mut W,
    options: &mut DownloadOptions,
) -> Result<()> {
    let total = manifest.len();
    let mut fetched = stream::iter(manifest.segments())
        .map(|segment| fetcher.fetch_segment(segment))
        .buffered(options.prefetch.max(1));

    let mut completed = 0;
    loop {
        if let Some(cancel) = &options.cancel {
            if cancel.is_cancelled() {
                info!("Download cancelled after {completed} of {total} segments");
                return Err(Error::Cancelled);
            }
        }

        let Some(segment) = fetched.next().await else {
            break;
        };
        let segment = segment?;

        let data = decode_with_iv(segment.data, segment.key.as_deref(), segment.iv)?;
        sink.write_all(&data).await?;

        completed += 1;
        debug!("Wrote segment {completed}/{total} ({} bytes)", data.len());
        if let Some(progress) = &mut options.progress {
            sink.flush().await?;
            progress(completed, total)?
        }
    }

    Ok(())
}
