use crate::config::resolver::TrustedParamsConfig;
use crate::dispatcher::RedirectTarget;
use crate::error::SsoError;
use crate::issuer::Identity;
use crate::resolver::params::RequestParams;
use crate::utils::constants::{PARAM_EMAIL, PARAM_RETURN_URL, PARAM_TENANT_ID, PARAM_TENANT_NAME};

/// Accepts caller-supplied identity parameters as already authenticated.
/// Authentication is the job of whatever sits in front of this service.
#[derive(Debug, Clone, Default)]
pub struct TrustedParamsResolver {
    allowed_return_hosts: Option<Vec<String>>,
}

impl TrustedParamsResolver {
    pub fn new(cfg: &TrustedParamsConfig) -> Self {
        Self {
            allowed_return_hosts: cfg
                .allowed_return_hosts
                .as_ref()
                .map(|hosts| hosts.iter().map(|h| h.trim().to_lowercase()).collect()),
        }
    }

    pub fn resolve(&self, params: &RequestParams) -> Result<(Identity, RedirectTarget), SsoError> {
        let [email, tenant_id, return_url] =
            params.require_all([PARAM_EMAIL, PARAM_TENANT_ID, PARAM_RETURN_URL])?;

        let target = RedirectTarget::parse(return_url)?;
        self.check_host(&target)?;

        let identity = Identity {
            subject: email.to_owned(),
            email: Some(email.to_owned()),
            tenant_id: Some(tenant_id.to_owned()),
            tenant_name: params.get(PARAM_TENANT_NAME).map(str::to_owned),
            ..Default::default()
        };
        Ok((identity, target))
    }

    fn check_host(&self, target: &RedirectTarget) -> Result<(), SsoError> {
        let Some(allowed) = &self.allowed_return_hosts else {
            return Ok(());
        };
        let host = target.host().unwrap_or_default().to_lowercase();
        if allowed.iter().any(|h| *h == host) {
            Ok(())
        } else {
            Err(SsoError::InvalidParameter(format!(
                "{} host '{}' is not allowed",
                PARAM_RETURN_URL, host
            )))
        }
    }
}
