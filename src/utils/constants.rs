//! Shared constants and invariants

pub const DEFAULT_TTL_SECONDS: i64 = 3600;
pub const DEFAULT_DELEGATED_TIMEOUT_MS: u64 = 5000;

/// Query parameter carrying the issued token on redirects.
pub const TOKEN_QUERY_PARAM: &str = "jwt";
pub const RETURN_TO_PARAM: &str = "return_to";

// Inbound parameter names
pub const PARAM_USERNAME: &str = "username";
pub const PARAM_PASSWORD: &str = "password";
pub const PARAM_EMAIL: &str = "email";
pub const PARAM_TENANT_ID: &str = "tenantId";
pub const PARAM_TENANT_NAME: &str = "tenantName";
pub const PARAM_RETURN_URL: &str = "returnUrl";

// Default routes per resolver type
pub const DEFAULT_LOGIN_PATH: &str = "/api/login";
pub const DEFAULT_SSO_PATH: &str = "/sisense/jwt";

// Downstream authentication API
pub const DEFAULT_DELEGATED_LOGIN_PATH: &str = "/api/v1/authentication/login";
pub const DEFAULT_DELEGATED_USER_INFO_PATH: &str = "/api/v1/users/me";
