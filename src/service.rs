use tracing::{info, warn};

use crate::config::types::ServiceConfig;
use crate::dispatcher::{Dispatch, Dispatcher};
use crate::error::SsoError;
use crate::helpers::time::get_instant;
use crate::issuer::TokenIssuer;
use crate::observability::metrics::get_metrics;
use crate::resolver::{RequestParams, Resolver};
use crate::utils::constants::RETURN_TO_PARAM;

/// One login: resolve the caller, sign a token, hand it back.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct SsoService {
    resolver: Resolver,
    issuer: TokenIssuer,
    dispatcher: Dispatcher,
}

impl SsoService {
    pub fn new(resolver: Resolver, issuer: TokenIssuer, dispatcher: Dispatcher) -> Self {
        Self {
            resolver,
            issuer,
            dispatcher,
        }
    }

    pub fn from_config(cfg: &ServiceConfig) -> Result<Self, SsoError> {
        let resolver = Resolver::from_config(&cfg.resolver)?;
        let issuer = TokenIssuer::from_config(&cfg.issuer)?;
        let dispatcher = Dispatcher::from_config(&cfg.dispatcher, cfg.issuer.tenant.url_field)?;
        Ok(Self::new(resolver, issuer, dispatcher))
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub async fn login(&self, params: &RequestParams) -> Result<Dispatch, SsoError> {
        let metrics = get_metrics().await;
        let kind = self.resolver.kind();
        let start = get_instant();
        metrics.login_requests.with_label_values(&[kind]).inc();

        let result = self.run(params).await;

        metrics
            .login_duration
            .with_label_values(&[kind])
            .observe(start.elapsed().as_secs_f64());
        if let Err(e) = &result {
            if !e.status().is_server_error() {
                warn!("login rejected ({}): {}", kind, e);
            }
            metrics
                .login_failures
                .with_label_values(&[kind, e.reason()])
                .inc();
        }
        result
    }

    async fn run(&self, params: &RequestParams) -> Result<Dispatch, SsoError> {
        let metrics = get_metrics().await;
        let resolved = self.resolver.resolve(params).await?;

        let token = self
            .issuer
            .issue(&resolved.identity)
            .inspect_err(|_| metrics.signing_failures.inc())?;
        let algorithm = format!("{:?}", self.issuer.options().algorithm);
        metrics.tokens_issued.with_label_values(&[algorithm.as_str()]).inc();

        let response = self.dispatcher.dispatch(
            &token,
            &resolved.identity,
            resolved.target.as_ref(),
            params.get(RETURN_TO_PARAM),
        )?;
        let mode = self.dispatcher.mode().as_str();
        metrics.dispatches.with_label_values(&[mode]).inc();

        info!("issued token for '{}' ({})", token.claims.sub, mode);
        Ok(response)
    }
}
