use regex::Regex;

/// Types of AniWatch urls, pointing to anime or episodes.
#[cfg_attr(docsrs, doc(cfg(feature = "parse")))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UrlType {
    /// The parsed url points to an anime. Use [`crate::Anime::from_id`] with the value of this
    /// field to get a usable struct out of it.
    Anime(u64),
    /// The parsed url points to an episode page. Request the anime with
    /// [`crate::Anime::from_id`] and use [`crate::EpisodeList::by_number`] on its episodes to
    /// get the episode.
    Episode { anime_id: u64, number: u32 },
}

/// Extract information out of AniWatch urls which are pointing to anime or episodes.
#[cfg_attr(docsrs, doc(cfg(feature = "parse")))]
pub fn parse_url<S: AsRef<str>>(url: S) -> Option<UrlType> {
    lazy_static::lazy_static! {
        static ref ANIME_REGEX: Regex = Regex::new(r"^https?://(www\.)?aniwatch\.me/anime/(?P<id>[0-9]+)(/(?P<number>[0-9]+))?/?([?#].*)?$").unwrap();
    }

    let capture = ANIME_REGEX.captures(url.as_ref())?;
    let anime_id = capture.name("id")?.as_str().parse().ok()?;

    match capture.name("number") {
        Some(number) => Some(UrlType::Episode {
            anime_id,
            number: number.as_str().parse().ok()?,
        }),
        None => Some(UrlType::Anime(anime_id)),
    }
}

impl crate::AniWatch {
    /// Shorthand for [`parse_url`].
    #[cfg_attr(docsrs, doc(cfg(feature = "parse")))]
    pub fn parse_url<S: AsRef<str>>(url: S) -> Option<UrlType> {
        parse_url(url)
    }
}
