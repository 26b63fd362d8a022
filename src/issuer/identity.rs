use crate::config::issuer::TenantField;

/// Authenticated caller as seen by the issuer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// Email, username or downstream user id. Never empty.
    pub subject: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub tenant_id: Option<String>,
    pub tenant_name: Option<String>,
    pub groups: Vec<String>,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn tenant(&self, field: TenantField) -> Option<&str> {
        match field {
            TenantField::TenantId => self.tenant_id.as_deref(),
            TenantField::TenantName => self.tenant_name.as_deref(),
        }
    }
}
