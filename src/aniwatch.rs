//! Builder and access to the [`AniWatch`] struct which is required to make any action.

use crate::enum_values;
use reqwest::Client;
use std::sync::Arc;

/// Default endpoint every api action is sent to.
pub const API_URL: &str = "https://aniwatch.me/api/ajax/APIHandle";
/// Default site root. Used to build `Referer` and `Origin` headers for media requests.
pub const SITE_ROOT: &str = "https://aniwatch.me";

enum_values! {
    /// Languages AniWatch delivers episodes in.
    #[allow(non_camel_case_types)]
    #[derive(Hash)]
    pub enum Locale {
        de_DE = "de-DE" => "German"
        en_US = "en-US" => "English (US)"
        ja_JP = "ja-JP" => "Japanese"
    }
}

/// Starting point of this whole library.
#[derive(Clone, Debug)]
pub struct AniWatch {
    pub(crate) executor: Arc<Executor>,
}

impl AniWatch {
    pub fn builder() -> AniWatchBuilder {
        AniWatchBuilder::default()
    }

    /// Return the (cloned) [`Client`] which is internally used to make requests.
    pub fn client(&self) -> Client {
        self.executor.client.clone()
    }

    /// The endpoint all api actions are sent to.
    pub fn api_url(&self) -> &str {
        &self.executor.api_url
    }

    /// The site root which is used as `Origin` of media requests.
    pub fn site_root(&self) -> &str {
        &self.executor.site_root
    }
}

mod executor {
    use crate::error::{check_request, check_status, Error};
    use crate::{AniWatch, Request, Result};
    use http::header::{self, HeaderMap, HeaderValue};
    use log::debug;
    use reqwest::{Client, IntoUrl, RequestBuilder};
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use serde_json::Value;
    use std::sync::Arc;

    /// Internal struct to execute all request with. Everything in here is immutable after
    /// [`AniWatchBuilder::build`] was called, request specific headers are always merged into a
    /// copy of [`Executor::headers`].
    #[derive(Debug)]
    pub struct Executor {
        pub(crate) client: Client,

        pub(crate) api_url: String,
        pub(crate) site_root: String,

        /// Caller supplied base headers, including the `Cookie` header if any session cookies
        /// were set.
        pub(crate) headers: HeaderMap,
    }

    impl Executor {
        #[cfg_attr(not(feature = "stream"), allow(dead_code))]
        pub(crate) fn get<U: IntoUrl>(self: &Arc<Self>, url: U) -> ExecutorRequestBuilder {
            ExecutorRequestBuilder::new(self.clone(), self.client.get(url))
                .headers(self.headers.clone())
        }

        pub(crate) fn post<U: IntoUrl>(self: &Arc<Self>, url: U) -> ExecutorRequestBuilder {
            ExecutorRequestBuilder::new(self.clone(), self.client.post(url))
                .headers(self.headers.clone())
        }

        /// Sends an api action (`{"controller": ..., "action": ..., ...}`) to the api endpoint and
        /// extracts the result from `key`. If `key` is [`None`], the whole response is the result.
        pub(crate) async fn action<T: Request + DeserializeOwned, B: Serialize + ?Sized>(
            self: &Arc<Self>,
            body: &B,
            key: Option<&str>,
        ) -> Result<T> {
            let mut value: Value = self
                .post(self.api_url.as_str())
                .json(body)
                .request_json()
                .await?;

            let result = match key {
                Some(key) => value
                    .get_mut(key)
                    .map(Value::take)
                    .ok_or_else(|| Error::Decode {
                        message: format!("response has no '{key}' field"),
                        content: value.to_string().into_bytes(),
                        url: self.api_url.clone(),
                    })?,
                None => value,
            };

            let mut resp: T = serde_json::from_value(result).map_err(|e| Error::Decode {
                message: e.to_string(),
                content: vec![],
                url: self.api_url.clone(),
            })?;
            resp.__set_executor(self.clone());

            Ok(resp)
        }
    }

    impl Default for Executor {
        fn default() -> Self {
            Self {
                client: Client::new(),
                api_url: super::API_URL.to_string(),
                site_root: super::SITE_ROOT.to_string(),
                headers: HeaderMap::new(),
            }
        }
    }

    pub(crate) struct ExecutorRequestBuilder {
        executor: Arc<Executor>,
        builder: RequestBuilder,
    }

    impl ExecutorRequestBuilder {
        pub(crate) fn new(executor: Arc<Executor>, builder: RequestBuilder) -> Self {
            Self { executor, builder }
        }

        pub(crate) fn headers(mut self, headers: HeaderMap) -> Self {
            self.builder = self.builder.headers(headers);

            self
        }

        pub(crate) fn json<T: Serialize + ?Sized>(mut self, json: &T) -> Self {
            self.builder = self.builder.json(json);

            self
        }

        pub(crate) async fn request_json<T: DeserializeOwned>(self) -> Result<T> {
            let built_req = self.builder.build()?;
            let url = built_req.url().to_string();
            debug!("Requesting {url}");
            let resp = self.executor.client.execute(built_req).await?;

            check_request(url, resp).await
        }

        #[cfg_attr(not(feature = "stream"), allow(dead_code))]
        pub(crate) async fn request_raw(self) -> Result<bytes::Bytes> {
            let built_req = self.builder.build()?;
            debug!("Requesting {}", built_req.url());
            let resp = check_status(self.executor.client.execute(built_req).await?)?;

            Ok(resp.bytes().await?)
        }
    }

    /// A builder to construct a new [`AniWatch`] instance. To create it, call
    /// [`AniWatch::builder`].
    pub struct AniWatchBuilder {
        client: Option<Client>,
        api_url: String,
        site_root: String,
        headers: HeaderMap,
        cookies: Vec<(String, String)>,
    }

    impl Default for AniWatchBuilder {
        fn default() -> Self {
            Self {
                client: None,
                api_url: super::API_URL.to_string(),
                site_root: super::SITE_ROOT.to_string(),
                headers: HeaderMap::new(),
                cookies: vec![],
            }
        }
    }

    impl AniWatchBuilder {
        /// Return a [`reqwest::ClientBuilder`] which has all configurations applied this crate
        /// expects from a client. Use it as base if you want to use [`AniWatchBuilder::client`].
        pub fn predefined_client_builder() -> reqwest::ClientBuilder {
            Client::builder()
                .cookie_store(true)
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36")
        }

        /// Set a custom client that will be used in all requests.
        pub fn client(mut self, client: Client) -> AniWatchBuilder {
            self.client = Some(client);
            self
        }

        /// Set the endpoint every api action is sent to. Defaults to [`super::API_URL`].
        pub fn api_url<S: AsRef<str>>(mut self, api_url: S) -> AniWatchBuilder {
            self.api_url = api_url.as_ref().to_string();
            self
        }

        /// Set the site root which is used to build the `Referer` and `Origin` headers for media
        /// requests. Defaults to [`super::SITE_ROOT`].
        pub fn site_root<S: AsRef<str>>(mut self, site_root: S) -> AniWatchBuilder {
            self.site_root = site_root.as_ref().trim_end_matches('/').to_string();
            self
        }

        /// Set base headers which are sent with every request. The AniWatch api usually requires
        /// at least an `x-auth` / `x-path` header for actions which need a logged-in user, this
        /// crate doesn't manage them on its own.
        pub fn headers(mut self, headers: HeaderMap) -> AniWatchBuilder {
            self.headers = headers;
            self
        }

        /// Add a session cookie which is forwarded with every request.
        pub fn cookie<S: AsRef<str>>(mut self, name: S, value: S) -> AniWatchBuilder {
            self.cookies
                .push((name.as_ref().to_string(), value.as_ref().to_string()));
            self
        }

        pub fn build(self) -> Result<AniWatch> {
            let client = match self.client {
                Some(client) => client,
                None => Self::predefined_client_builder().build()?,
            };

            let mut headers = self.headers;
            if !self.cookies.is_empty() {
                let raw_cookies = self
                    .cookies
                    .iter()
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect::<Vec<String>>()
                    .join("; ");
                let cookie = HeaderValue::from_str(&raw_cookies).map_err(|e| Error::Input {
                    message: format!("invalid cookie: {e}"),
                })?;
                headers.insert(header::COOKIE, cookie);
            }

            Ok(AniWatch {
                executor: Arc::new(Executor {
                    client,
                    api_url: self.api_url,
                    site_root: self.site_root,
                    headers,
                }),
            })
        }
    }
}

pub(crate) use executor::Executor;
pub use executor::AniWatchBuilder;
