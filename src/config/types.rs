use serde::Deserialize;

use crate::config::dispatcher::DispatcherConfig;
use crate::config::issuer::IssuerConfig;
use crate::config::resolver::ResolverConfig;
use crate::config::settings::SettingsConfig;
use crate::utils::constants::{DEFAULT_LOGIN_PATH, DEFAULT_SSO_PATH};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    pub resolver: ResolverConfig,
    pub issuer: IssuerConfig,
    pub dispatcher: DispatcherConfig,
}

/// ================================
/// HTTP routes
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EndpointsConfig {
    /// Defaults to `/sisense/jwt` for trusted params, `/api/login` otherwise.
    pub login_path: Option<String>,
    pub protected_path: Option<String>,
    pub logout_path: Option<String>,
}

impl ServiceConfig {
    pub fn login_path(&self) -> String {
        self.endpoints.login_path.clone().unwrap_or_else(|| {
            match self.resolver {
                ResolverConfig::TrustedParams(_) => DEFAULT_SSO_PATH,
                _ => DEFAULT_LOGIN_PATH,
            }
            .to_owned()
        })
    }
}
