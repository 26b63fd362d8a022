use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use url::Url;

use crate::config::dispatcher::{DispatchMode, DispatcherConfig};
use crate::config::issuer::TenantField;
use crate::dispatcher::target::RedirectTarget;
use crate::error::SsoError;
use crate::issuer::{Identity, Token};
use crate::utils::constants::{RETURN_TO_PARAM, TOKEN_QUERY_PARAM};

/// What goes back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Json(Value),
    Redirect(Url),
}

impl IntoResponse for Dispatch {
    fn into_response(self) -> Response {
        match self {
            Dispatch::Json(body) => (StatusCode::OK, Json(body)).into_response(),
            Dispatch::Redirect(url) => {
                (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
            }
        }
    }
}

/// Append `jwt=<token>` (and optionally `return_to`) to `target`, keeping
/// the rest of its query. A `jwt` already present on the target is dropped,
/// and so is `return_to` when a new one is appended.
pub fn redirect_url(
    target: &RedirectTarget,
    token: &str,
    return_to: Option<&str>,
) -> Result<Url, SsoError> {
    append_token(target.as_url().clone(), token, return_to)
}

fn append_token(mut url: Url, token: &str, return_to: Option<&str>) -> Result<Url, SsoError> {
    if url.cannot_be_a_base() {
        return Err(SsoError::Dispatch(format!(
            "redirect target '{}' cannot carry query parameters",
            url
        )));
    }
    // Pairs this service owns are replaced, never duplicated.
    let owned = |k: &str| k == TOKEN_QUERY_PARAM || (return_to.is_some() && k == RETURN_TO_PARAM);
    if url.query_pairs().any(|(k, _)| owned(&k)) {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !owned(k))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        url.set_query(None);
        if !kept.is_empty() {
            url.query_pairs_mut().extend_pairs(kept);
        }
    }
    {
        let mut query = url.query_pairs_mut();
        query.append_pair(TOKEN_QUERY_PARAM, token);
        if let Some(return_to) = return_to {
            query.append_pair(RETURN_TO_PARAM, return_to);
        }
    }
    Ok(url)
}

/// Basic contract: `{ token }` in JSON mode, a 302 to `target` otherwise.
pub fn dispatch(
    token: &str,
    mode: DispatchMode,
    target: Option<&RedirectTarget>,
    return_to: Option<&str>,
) -> Result<Dispatch, SsoError> {
    match mode {
        DispatchMode::Json => Ok(Dispatch::Json(json!({ "token": token }))),
        DispatchMode::Redirect => {
            let target = target.ok_or_else(|| {
                SsoError::Dispatch("redirect mode without a redirect target".to_owned())
            })?;
            redirect_url(target, token, return_to).map(Dispatch::Redirect)
        }
    }
}

#[derive(Debug, Clone)]
struct SsoUrl {
    base: RedirectTarget,
    path: String,
}

/// Dispatcher bound to the service configuration.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    mode: DispatchMode,
    default_target: Option<RedirectTarget>,
    forward_return_to: bool,
    sso_url: Option<SsoUrl>,
    tenant_url_field: Option<TenantField>,
}

impl Dispatcher {
    pub fn from_config(
        cfg: &DispatcherConfig,
        tenant_url_field: Option<TenantField>,
    ) -> Result<Self, SsoError> {
        let default_target = cfg
            .default_target
            .as_deref()
            .map(RedirectTarget::parse)
            .transpose()
            .map_err(|e| SsoError::Configuration(format!("dispatcher.default_target: {}", e)))?;
        let sso_url = cfg
            .sso_url
            .as_ref()
            .map(|s| {
                RedirectTarget::parse(&s.base_url).map(|base| SsoUrl {
                    base,
                    path: s.path.clone(),
                })
            })
            .transpose()
            .map_err(|e| SsoError::Configuration(format!("dispatcher.sso_url: {}", e)))?;

        Ok(Self {
            mode: cfg.mode,
            default_target,
            forward_return_to: cfg.forward_return_to,
            sso_url,
            tenant_url_field,
        })
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// `target` from the resolver wins over the configured default.
    pub fn dispatch(
        &self,
        token: &Token,
        identity: &Identity,
        target: Option<&RedirectTarget>,
        return_to: Option<&str>,
    ) -> Result<Dispatch, SsoError> {
        let return_to = return_to.filter(|_| self.forward_return_to);
        let target = target.or(self.default_target.as_ref());
        let mut response = dispatch(&token.value, self.mode, target, return_to)?;

        if let (Dispatch::Json(Value::Object(body)), Some(sso_url)) = (&mut response, &self.sso_url) {
            let tenant = self.tenant_url_field.and_then(|f| identity.tenant(f));
            let url = Self::compose_sso_url(sso_url, tenant, &token.value, return_to)?;
            body.insert("redirectUrl".to_owned(), Value::String(url.to_string()));
        }
        Ok(response)
    }

    /// `<base>[/<tenant>]<path>?jwt=<token>`
    fn compose_sso_url(
        sso_url: &SsoUrl,
        tenant: Option<&str>,
        token: &str,
        return_to: Option<&str>,
    ) -> Result<Url, SsoError> {
        let mut url = sso_url.base.as_url().clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| SsoError::Dispatch(format!("sso url '{}' has no path", sso_url.base)))?;
            segments.pop_if_empty();
            if let Some(tenant) = tenant {
                segments.push(tenant);
            }
            segments.extend(sso_url.path.split('/').filter(|s| !s.is_empty()));
        }
        append_token(url, token, return_to)
    }
}
