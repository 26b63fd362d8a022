use serde::{Deserialize, Serialize};

/// ================================
/// Response dispatch
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct DispatcherConfig {
    pub mode: DispatchMode,
    /// Redirect target used when the resolver supplies none.
    pub default_target: Option<String>,
    /// Re-append the caller's `return_to` parameter to redirects.
    #[serde(default = "default_true")]
    pub forward_return_to: bool,
    /// Extra `redirectUrl` field in JSON mode.
    pub sso_url: Option<SsoUrlConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    Json,
    Redirect,
}

impl DispatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchMode::Json => "json",
            DispatchMode::Redirect => "redirect",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SsoUrlConfig {
    pub base_url: String,
    #[serde(default = "default_sso_path")]
    pub path: String,
}

fn default_sso_path() -> String {
    "/jwt".to_owned()
}

fn default_true() -> bool {
    true
}
