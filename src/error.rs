//! Library specific errors.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::{Debug, Display, Formatter};

pub(crate) type Result<T, E = Error> = core::result::Result<T, E>;

/// Crate specific error types.
#[derive(Clone, Debug)]
pub enum Error {
    /// Error was caused by something library internal. This only happens if something was
    /// implemented incorrectly (which hopefully should never be the case) or if AniWatch
    /// surprisingly changed specific parts of their api which broke a part of this crate.
    Internal { message: String },

    /// Some sort of error occurred while requesting the AniWatch api or fetching media data
    /// (segments, decryption keys, manifests). Either the request could not be sent at all or the
    /// server responded with a non-success status code.
    Request {
        message: String,
        status: Option<StatusCode>,
        url: String,
    },
    /// While decoding the api response body something went wrong.
    Decode {
        message: String,
        content: Vec<u8>,
        url: String,
    },

    /// A stream manifest could not be resolved. Either the requested quality isn't available or
    /// the manifest itself is malformed.
    Resolution { message: String, url: String },
    /// A segment could not be decrypted, e.g. because the fetched key doesn't have the size the
    /// cipher requires.
    Decryption { message: String },
    /// Writing to the output sink failed.
    Io { message: String },
    /// A download was cancelled from the outside.
    Cancelled,

    /// Generally malformed or invalid user input.
    Input { message: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Internal { message } => write!(f, "{message}"),
            Error::Request {
                message,
                status,
                url,
            } => {
                if let Some(status) = status {
                    write!(f, "{message} ({status}, {url})")
                } else {
                    write!(f, "{message} ({url})")
                }
            }
            Error::Decode {
                message,
                content,
                url,
            } => {
                let mut msg = format!("{message} ({url})");
                if !content.is_empty() {
                    msg.push_str(&format!(
                        ": {}",
                        std::str::from_utf8(content).unwrap_or("-- not displayable --")
                    ))
                }
                write!(f, "{msg}")
            }
            Error::Resolution { message, url } => {
                if url.is_empty() {
                    write!(f, "{message}")
                } else {
                    write!(f, "{message} ({url})")
                }
            }
            Error::Decryption { message } => write!(f, "{message}"),
            Error::Io { message } => write!(f, "{message}"),
            Error::Cancelled => write!(f, "download was cancelled"),
            Error::Input { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
            content: vec![],
            url: "n/a".to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map_or("n/a".to_string(), |url| url.to_string());

        if err.is_request()
            || err.is_redirect()
            || err.is_timeout()
            || err.is_connect()
            || err.is_body()
            || err.is_status()
        {
            Error::Request {
                message: err.to_string(),
                status: err.status(),
                url,
            }
        } else if err.is_decode() {
            Error::Decode {
                message: err.to_string(),
                content: vec![],
                url,
            }
        } else if err.is_builder() {
            Error::Internal {
                message: err.to_string(),
            }
        } else {
            Error::Internal {
                message: format!("Could not determine request error type - {err}"),
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}

/// Turns a non-success status code into an [`Error::Request`].
pub(crate) fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    let url = resp.url().to_string();

    if status.is_client_error() {
        Err(Error::Request {
            message: "Unexpected client error".to_string(),
            status: Some(status),
            url,
        })
    } else if status.is_server_error() {
        Err(Error::Request {
            message: "Server error detected".to_string(),
            status: Some(status),
            url,
        })
    } else if !status.is_success() {
        Err(Error::Request {
            message: "Unexpected response status".to_string(),
            status: Some(status),
            url,
        })
    } else {
        Ok(resp)
    }
}

/// Checks the response status and decodes the json body. An empty body is treated as `{}`.
pub(crate) async fn check_request<T: DeserializeOwned>(url: String, resp: Response) -> Result<T> {
    let resp = check_status(resp)?;

    let raw = resp.bytes().await?;
    let body: &[u8] = if raw.is_empty() { b"{}" } else { raw.as_ref() };

    let value: Value = serde_json::from_slice(body).map_err(|e| Error::Decode {
        message: format!("{} at {}:{}", e, e.line(), e.column()),
        content: body.to_vec(),
        url: url.clone(),
    })?;
    serde_json::from_value::<T>(value).map_err(|e| Error::Decode {
        message: e.to_string(),
        content: body.to_vec(),
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_display_contains_status_and_url() {
        let err = Error::Request {
            message: "Unexpected client error".to_string(),
            status: Some(StatusCode::NOT_FOUND),
            url: "https://aniwatch.me/seg1.ts".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("404"));
        assert!(display.contains("https://aniwatch.me/seg1.ts"))
    }

    #[test]
    fn decode_error_with_binary_content() {
        let err = Error::Decode {
            message: "expected value".to_string(),
            content: vec![0xff, 0xfe],
            url: "https://aniwatch.me/api".to_string(),
        };
        assert!(err.to_string().ends_with("-- not displayable --"))
    }
}
