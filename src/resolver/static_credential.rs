use crate::config::resolver::{StaticCredentialConfig, StaticUser};
use crate::error::SsoError;
use crate::helpers::compare::constant_time_eq;
use crate::issuer::Identity;
use crate::resolver::params::RequestParams;
use crate::utils::constants::{PARAM_PASSWORD, PARAM_USERNAME};

/// Checks a username/password pair against a fixed list.
/// Exact, case-sensitive comparison on both fields; passwords are compared
/// in constant time.
#[derive(Debug, Clone)]
pub struct StaticCredentialResolver {
    users: Vec<StaticUser>,
}

impl StaticCredentialResolver {
    pub fn new(cfg: &StaticCredentialConfig) -> Self {
        Self {
            users: cfg.users.clone(),
        }
    }

    pub fn resolve(&self, params: &RequestParams) -> Result<Identity, SsoError> {
        let [username, password] = params.require_all([PARAM_USERNAME, PARAM_PASSWORD])?;

        let user = self
            .users
            .iter()
            .find(|u| {
                u.username == username
                    && constant_time_eq(u.password.as_bytes(), password.as_bytes())
            })
            .ok_or(SsoError::InvalidCredentials)?;

        Ok(Identity {
            subject: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            tenant_id: user.tenant_id.clone(),
            tenant_name: user.tenant_name.clone(),
            groups: user.groups.clone(),
        })
    }
}
