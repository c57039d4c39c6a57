//! Cookie helpers over `axum` header maps.
//!
//! Values are percent-encoded on the way out and decoded on the way in, so
//! arbitrary text survives the round trip through `Cookie`/`Set-Cookie`.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use thiserror::Error;
use tracing::{debug, trace};

const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Error)]
pub enum CookieError {
    #[error("invalid cookie name: {0:?}")]
    InvalidName(String),

    #[error("invalid cookie {attribute} attribute: {value:?}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },

    #[error("cookie {name:?} produced an invalid header: {source}")]
    InvalidHeader {
        name: String,
        #[source]
        source: axum::http::header::InvalidHeaderValue,
    },
}

/// `SameSite` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes written with a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieOptions {
    pub http_only: bool,
    pub secure: bool,
    pub path: String,
    pub domain: Option<String>,
    #[serde(skip)]
    pub max_age: Option<Duration>,
    pub expires: Option<DateTime<Utc>>,
    pub same_site: Option<SameSite>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            http_only: true,
            secure: false,
            path: "/".to_string(),
            domain: None,
            max_age: None,
            expires: None,
            same_site: None,
        }
    }
}

impl CookieOptions {
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// `Path` and `Domain` may not contain `;` or control characters.
    fn validate(&self) -> Result<(), CookieError> {
        let attributes = [("Path", Some(&self.path)), ("Domain", self.domain.as_ref())];
        for (attribute, value) in attributes {
            if let Some(value) = value
                && value.chars().any(|c| c == ';' || c.is_control())
            {
                return Err(CookieError::InvalidAttribute {
                    attribute,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    fn write_attributes(&self, out: &mut String) {
        if !self.path.is_empty() {
            let _ = write!(out, "; Path={}", self.path);
        }
        if let Some(domain) = &self.domain {
            let _ = write!(out, "; Domain={}", domain);
        }
        if let Some(max_age) = self.max_age {
            let _ = write!(out, "; Max-Age={}", max_age.num_seconds().max(0));
        }
        if let Some(expires) = self.expires {
            let _ = write!(out, "; Expires={}", expires.format(EXPIRES_FORMAT));
        }
        if let Some(same_site) = self.same_site {
            let _ = write!(out, "; SameSite={}", same_site.as_str());
        }
        if self.secure {
            out.push_str("; Secure");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
    }
}

/// Cookie names must be RFC 6265 tokens.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')'
                        | b'<'
                        | b'>'
                        | b'@'
                        | b','
                        | b';'
                        | b':'
                        | b'\\'
                        | b'"'
                        | b'/'
                        | b'['
                        | b']'
                        | b'?'
                        | b'='
                        | b'{'
                        | b'}'
                )
        })
}

/// Value of the request cookie `name`, or `default` when it is absent.
///
/// All `Cookie` headers are scanned; the first match wins.
pub fn get(headers: &HeaderMap, name: &str, default: Option<&str>) -> Option<String> {
    let found = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            let value = value.trim_matches('"');
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        });
    trace!(name, found = found.is_some(), "Read cookie");
    found.or_else(|| default.map(str::to_string))
}

fn append(headers: &mut HeaderMap, name: &str, cookie: String) -> Result<(), CookieError> {
    let value = HeaderValue::from_str(&cookie).map_err(|source| CookieError::InvalidHeader {
        name: name.to_string(),
        source,
    })?;
    headers.append(SET_COOKIE, value);
    Ok(())
}

/// Append a `Set-Cookie` header for `name`.
pub fn set(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
    options: &CookieOptions,
) -> Result<(), CookieError> {
    if !is_valid_name(name) {
        return Err(CookieError::InvalidName(name.to_string()));
    }
    options.validate()?;
    let mut cookie = format!("{}={}", name, urlencoding::encode(value));
    options.write_attributes(&mut cookie);
    debug!(name, "Setting cookie");
    append(headers, name, cookie)
}

/// Append a `Set-Cookie` header that expires `name` immediately.
///
/// `path` and `domain` must match the ones the cookie was set with.
pub fn clear(headers: &mut HeaderMap, name: &str, options: &CookieOptions) -> Result<(), CookieError> {
    let expired = CookieOptions {
        max_age: Some(Duration::zero()),
        expires: DateTime::from_timestamp(0, 0),
        ..options.clone()
    };
    set(headers, name, "", &expired)
}
