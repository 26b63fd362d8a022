//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Validates invariants:
//!   * signing secret present and decodable, HMAC algorithm only
//!   * expiry window positive unless non-expiring tokens are opted into
//!   * resolver specifics (user list, downstream URL, timeout)
//!   * redirect targets are absolute URLs
//!   * path / logging invariants, literal route syntax and route collisions

use std::collections::HashSet;

use jsonwebtoken::Algorithm;
use tracing::{error, info};
use url::Url;

use crate::config::dispatcher::{DispatchMode, DispatcherConfig};
use crate::config::issuer::IssuerConfig;
use crate::config::resolver::ResolverConfig;
use crate::config::settings::SettingsConfig;
use crate::config::types::ServiceConfig;
use crate::dispatcher::target::RedirectTarget;
use crate::issuer::secret::SigningSecret;
use crate::observability::metrics::get_metrics;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_routes(cfg, &mut errors);
    validate_resolver(&cfg.resolver, &mut errors);
    validate_issuer(&cfg.issuer, &mut errors);
    validate_dispatcher(&cfg.dispatcher, &cfg.resolver, &mut errors);

    if errors.is_empty() {
        info!("config is valid");
        Ok(())
    } else {
        let metrics = get_metrics().await;
        for e in &errors {
            error!("config: {}", e);
            metrics.config_validation_errors.inc();
        }
        Err(errors)
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' is not a valid port",
            settings.server.port
        ));
    }
    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }
}

fn validate_routes(cfg: &ServiceConfig, errors: &mut Vec<String>) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut routes: Vec<(&str, String)> = vec![("endpoints.login_path", cfg.login_path())];
    if let Some(p) = &cfg.endpoints.protected_path {
        routes.push(("endpoints.protected_path", p.clone()));
    }
    if let Some(p) = &cfg.endpoints.logout_path {
        routes.push(("endpoints.logout_path", p.clone()));
    }
    if cfg.settings.metrics.is_enabled {
        routes.push(("settings.metrics.path", cfg.settings.metrics.path.clone()));
    }

    for (name, path) in routes {
        if !path.starts_with('/') {
            errors.push(format!("{} '{}' must start with '/'", name, path));
        }
        if !is_literal_path(&path) {
            errors.push(format!(
                "{} '{}' must be a literal path of letters, digits, '-', '_', '.', '~' and '/'",
                name, path
            ));
        }
        if !seen.insert(path.clone()) {
            errors.push(format!("{} '{}' collides with another route", name, path));
        }
    }
}

/// Routes are static: no `{param}`, `:param` or `*wildcard` segments,
/// which the router would either capture or refuse with a panic.
fn is_literal_path(path: &str) -> bool {
    path.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '/'))
}

fn validate_resolver(resolver: &ResolverConfig, errors: &mut Vec<String>) {
    match resolver {
        ResolverConfig::StaticCredential(cfg) => {
            if cfg.users.is_empty() {
                errors.push("resolver.users is empty; at least one user required".to_string());
            }
            let mut names = HashSet::new();
            for (idx, user) in cfg.users.iter().enumerate() {
                if user.username.is_empty() {
                    errors.push(format!("resolver.users[{}].username must not be empty", idx));
                }
                if user.password.is_empty() {
                    errors.push(format!("resolver.users[{}].password must not be empty", idx));
                }
                if !names.insert(user.username.as_str()) {
                    errors.push(format!(
                        "resolver.users[{}].username '{}' is duplicated",
                        idx, user.username
                    ));
                }
            }
        }
        ResolverConfig::DelegatedAuth(cfg) => {
            match Url::parse(&cfg.base_url) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
                _ => errors.push(format!(
                    "resolver.base_url '{}' must be an absolute http(s) URL",
                    cfg.base_url
                )),
            }
            if cfg.timeout_ms == 0 {
                errors.push("resolver.timeout_ms must be > 0".to_string());
            }
        }
        ResolverConfig::TrustedParams(cfg) => {
            if let Some(hosts) = &cfg.allowed_return_hosts {
                if hosts.iter().any(|h| h.trim().is_empty()) {
                    errors.push("resolver.allowed_return_hosts contains an empty host".to_string());
                }
            }
        }
    }
}

fn validate_issuer(issuer: &IssuerConfig, errors: &mut Vec<String>) {
    if let Err(e) = SigningSecret::from_config(&issuer.secret, issuer.secret_encoding) {
        errors.push(format!("issuer.secret: {}", e));
    }
    if !matches!(
        issuer.algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    ) {
        errors.push(format!(
            "issuer.algorithm {:?} is not supported; use HS256, HS384 or HS512",
            issuer.algorithm
        ));
    }
    if !issuer.non_expiring && issuer.ttl_seconds <= 0 {
        errors.push(format!(
            "issuer.ttl_seconds must be > 0, got {}",
            issuer.ttl_seconds
        ));
    }
}

fn validate_dispatcher(
    dispatcher: &DispatcherConfig,
    resolver: &ResolverConfig,
    errors: &mut Vec<String>,
) {
    if let Some(target) = &dispatcher.default_target {
        if let Err(e) = RedirectTarget::parse(target) {
            errors.push(format!("dispatcher.default_target: {}", e));
        }
    }
    let resolver_supplies_target = matches!(resolver, ResolverConfig::TrustedParams(_));
    if dispatcher.mode == DispatchMode::Redirect
        && dispatcher.default_target.is_none()
        && !resolver_supplies_target
    {
        errors.push(format!(
            "dispatcher.default_target is required in redirect mode with resolver '{}'",
            resolver.kind()
        ));
    }
    if let Some(sso_url) = &dispatcher.sso_url {
        if let Err(e) = RedirectTarget::parse(&sso_url.base_url) {
            errors.push(format!("dispatcher.sso_url.base_url: {}", e));
        }
        if !sso_url.path.starts_with('/') {
            errors.push(format!(
                "dispatcher.sso_url.path '{}' must start with '/'",
                sso_url.path
            ));
        }
    }
}
