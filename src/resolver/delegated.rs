use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::config::resolver::DelegatedAuthConfig;
use crate::error::SsoError;
use crate::issuer::Identity;
use crate::resolver::params::RequestParams;
use crate::utils::constants::{PARAM_PASSWORD, PARAM_USERNAME};

/// Successful downstream login.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: Option<String>,
    user: Option<RemoteUser>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RemoteUser {
    #[serde(alias = "_id")]
    id: Option<RemoteId>,
    email: Option<String>,
    user_name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    tenant_id: Option<String>,
    tenant_name: Option<String>,
    #[serde(default)]
    groups: Vec<String>,
}

/// Downstream user ids come back as strings or as plain numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoteId {
    Text(String),
    Number(serde_json::Number),
}

impl std::fmt::Display for RemoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteId::Text(s) => f.write_str(s),
            RemoteId::Number(n) => n.fmt(f),
        }
    }
}

/// Forwards the credentials to the platform's own login API.
#[derive(Debug, Clone)]
pub struct DelegatedAuthResolver {
    client: Client,
    login_url: Url,
    user_info_url: Option<Url>,
}

impl DelegatedAuthResolver {
    pub fn new(cfg: &DelegatedAuthConfig) -> Result<Self, SsoError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| SsoError::Configuration(format!("cannot build http client: {}", e)))?;

        let login_url = join_url(&cfg.base_url, &cfg.login_path)?;
        let user_info_url = cfg
            .user_info_path
            .as_deref()
            .map(|p| join_url(&cfg.base_url, p))
            .transpose()?;

        Ok(Self {
            client,
            login_url,
            user_info_url,
        })
    }

    pub async fn resolve(&self, params: &RequestParams) -> Result<Identity, SsoError> {
        let [username, password] = params.require_all([PARAM_USERNAME, PARAM_PASSWORD])?;

        let response = self
            .client
            .post(self.login_url.clone())
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| auth_failed("login request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(auth_failed("login rejected", format!("status {}", status)));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| auth_failed("login response unreadable", e))?;

        let access_token = login
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(SsoError::InvalidCredentials)?;

        let user = match (login.user, &self.user_info_url) {
            (Some(user), _) => user,
            (None, Some(url)) => self.fetch_user(url, &access_token).await?,
            (None, None) => RemoteUser::default(),
        };
        debug!("downstream login succeeded for '{}'", username);

        Ok(into_identity(user, username))
    }

    async fn fetch_user(&self, url: &Url, access_token: &str) -> Result<RemoteUser, SsoError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| auth_failed("user lookup failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(auth_failed("user lookup rejected", format!("status {}", status)));
        }
        response
            .json()
            .await
            .map_err(|e| auth_failed("user lookup response unreadable", e))
    }
}

fn into_identity(user: RemoteUser, username: &str) -> Identity {
    let subject = user
        .id
        .as_ref()
        .map(RemoteId::to_string)
        .or_else(|| user.email.clone())
        .or_else(|| user.user_name.clone())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| username.to_owned());

    Identity {
        subject,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        tenant_id: user.tenant_id,
        tenant_name: user.tenant_name,
        groups: user.groups,
    }
}

fn join_url(base: &str, path: &str) -> Result<Url, SsoError> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&raw).map_err(|e| SsoError::Configuration(format!("invalid url '{}': {}", raw, e)))
}

fn auth_failed(context: &str, detail: impl std::fmt::Display) -> SsoError {
    let detail = format!("{}: {}", context, detail);
    warn!("delegated authentication failed, {}", detail);
    SsoError::AuthenticationFailed { detail }
}
