use jsonwebtoken::Algorithm;
use serde::Deserialize;

use crate::utils::constants::DEFAULT_TTL_SECONDS;

/// ================================
/// Token issuance
/// ================================
#[derive(Deserialize, Clone)]
pub struct IssuerConfig {
    /// Shared secret, usually `${SISENSE_SHARED_SECRET}`.
    pub secret: String,
    #[serde(default)]
    pub secret_encoding: SecretEncoding,
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
    /// Omit `exp` entirely. Off unless explicitly enabled.
    #[serde(default)]
    pub non_expiring: bool,
    #[serde(default = "default_true")]
    pub jti: bool,
    /// Constant `return_to` claim stamped into every token.
    pub return_to: Option<String>,
    #[serde(default)]
    pub tenant: TenantPolicy,
}

impl std::fmt::Debug for IssuerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuerConfig")
            .field("secret", &"[REDACTED]")
            .field("secret_encoding", &self.secret_encoding)
            .field("algorithm", &self.algorithm)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("non_expiring", &self.non_expiring)
            .field("jti", &self.jti)
            .field("return_to", &self.return_to)
            .field("tenant", &self.tenant)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    #[default]
    Plain,
    Base64,
}

/// Which tenant identifier goes where.
///
/// `claim_field` feeds the `tid` claim; `url_field`, when set, becomes a path
/// segment of the SSO URL composed in JSON mode.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TenantPolicy {
    #[serde(default = "default_claim_field")]
    pub claim_field: TenantField,
    pub url_field: Option<TenantField>,
}

impl Default for TenantPolicy {
    fn default() -> Self {
        Self {
            claim_field: TenantField::TenantId,
            url_field: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TenantField {
    TenantId,
    TenantName,
}

fn default_algorithm() -> Algorithm {
    Algorithm::HS256
}

fn default_ttl_seconds() -> i64 {
    DEFAULT_TTL_SECONDS
}

fn default_claim_field() -> TenantField {
    TenantField::TenantId
}

fn default_true() -> bool {
    true
}
