//! Turns raw request parameters into an authenticated [`Identity`].

pub mod delegated;
pub mod params;
pub mod static_credential;
pub mod trusted_params;

use crate::config::resolver::ResolverConfig;
use crate::dispatcher::RedirectTarget;
use crate::error::SsoError;
use crate::issuer::Identity;

use delegated::DelegatedAuthResolver;
pub use params::RequestParams;
use static_credential::StaticCredentialResolver;
use trusted_params::TrustedParamsResolver;

/// Result of a successful resolution.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub identity: Identity,
    /// Caller-chosen redirect target, validated.
    pub target: Option<RedirectTarget>,
}

/// Resolution strategy, fixed at startup.
#[derive(Debug, Clone)]
pub enum Resolver {
    StaticCredential(StaticCredentialResolver),
    DelegatedAuth(DelegatedAuthResolver),
    TrustedParams(TrustedParamsResolver),
}

impl Resolver {
    pub fn from_config(cfg: &ResolverConfig) -> Result<Self, SsoError> {
        Ok(match cfg {
            ResolverConfig::StaticCredential(c) => {
                Resolver::StaticCredential(StaticCredentialResolver::new(c))
            }
            ResolverConfig::DelegatedAuth(c) => {
                Resolver::DelegatedAuth(DelegatedAuthResolver::new(c)?)
            }
            ResolverConfig::TrustedParams(c) => {
                Resolver::TrustedParams(TrustedParamsResolver::new(c))
            }
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Resolver::StaticCredential(_) => "static_credential",
            Resolver::DelegatedAuth(_) => "delegated_auth",
            Resolver::TrustedParams(_) => "trusted_params",
        }
    }

    pub async fn resolve(&self, params: &RequestParams) -> Result<Resolved, SsoError> {
        let (identity, target) = match self {
            Resolver::StaticCredential(r) => (r.resolve(params)?, None),
            Resolver::DelegatedAuth(r) => (r.resolve(params).await?, None),
            Resolver::TrustedParams(r) => {
                let (identity, target) = r.resolve(params)?;
                (identity, Some(target))
            }
        };
        Ok(Resolved { identity, target })
    }
}
