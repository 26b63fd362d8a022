use serde::Deserialize;

use crate::utils::constants::{
    DEFAULT_DELEGATED_LOGIN_PATH, DEFAULT_DELEGATED_TIMEOUT_MS, DEFAULT_DELEGATED_USER_INFO_PATH,
};

/// ================================
/// Identity resolution strategy
/// ================================
/// Exactly one strategy is active per service.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolverConfig {
    StaticCredential(StaticCredentialConfig),
    DelegatedAuth(DelegatedAuthConfig),
    TrustedParams(TrustedParamsConfig),
}

impl ResolverConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            ResolverConfig::StaticCredential(_) => "static_credential",
            ResolverConfig::DelegatedAuth(_) => "delegated_auth",
            ResolverConfig::TrustedParams(_) => "trusted_params",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticCredentialConfig {
    pub users: Vec<StaticUser>,
}

/// One accepted username/password pair with the profile it maps to.
#[derive(Deserialize, Clone)]
pub struct StaticUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub tenant_id: Option<String>,
    pub tenant_name: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl std::fmt::Debug for StaticUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticUser")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DelegatedAuthConfig {
    /// Root of the downstream platform, e.g. `https://company.sisense.com`.
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Profile lookup used when the login response carries no `user`.
    #[serde(default = "default_user_info_path")]
    pub user_info_path: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TrustedParamsConfig {
    /// When set, `returnUrl` hosts outside this list are rejected.
    pub allowed_return_hosts: Option<Vec<String>>,
}

fn default_login_path() -> String {
    DEFAULT_DELEGATED_LOGIN_PATH.to_owned()
}

fn default_user_info_path() -> Option<String> {
    Some(DEFAULT_DELEGATED_USER_INFO_PATH.to_owned())
}

fn default_timeout_ms() -> u64 {
    DEFAULT_DELEGATED_TIMEOUT_MS
}
