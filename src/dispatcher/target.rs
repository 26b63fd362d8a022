use url::Url;

use crate::error::SsoError;

/// Absolute http(s) URL a caller may be redirected to.
///
/// Only constructed through [`RedirectTarget::parse`], so holding one means
/// the URL can carry query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(Url);

impl RedirectTarget {
    pub fn parse(raw: &str) -> Result<Self, SsoError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| SsoError::InvalidParameter(format!("'{}' is not a valid URL: {}", raw, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SsoError::InvalidParameter(format!(
                "'{}' must use http or https",
                raw
            )));
        }
        if url.host_str().is_none() || url.cannot_be_a_base() {
            return Err(SsoError::InvalidParameter(format!(
                "'{}' is not an absolute URL",
                raw
            )));
        }
        Ok(Self(url))
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl std::fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
