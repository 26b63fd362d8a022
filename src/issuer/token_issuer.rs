use jsonwebtoken::{encode, Algorithm, Header};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::issuer::{IssuerConfig, TenantField};
use crate::error::{SsoError, VerifyError};
use crate::helpers::time::now_i64;
use crate::issuer::claims::Claims;
use crate::issuer::identity::Identity;
use crate::issuer::secret::SigningSecret;
use crate::issuer::verify::verify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// `exp = iat + seconds`
    Ttl(i64),
    /// No `exp` claim at all.
    Never,
}

/// Knobs applied to every issuance.
#[derive(Debug, Clone)]
pub struct IssueOptions {
    pub algorithm: Algorithm,
    pub expiry: Expiry,
    pub with_jti: bool,
    pub tenant_claim: TenantField,
    pub return_to: Option<String>,
}

impl IssueOptions {
    pub fn from_config(cfg: &IssuerConfig) -> Self {
        let expiry = if cfg.non_expiring {
            Expiry::Never
        } else {
            Expiry::Ttl(cfg.ttl_seconds)
        };
        Self {
            algorithm: cfg.algorithm,
            expiry,
            with_jti: cfg.jti,
            tenant_claim: cfg.tenant.claim_field,
            return_to: cfg.return_to.clone(),
        }
    }

    pub fn with_ttl(ttl_seconds: i64) -> Self {
        Self {
            expiry: Expiry::Ttl(ttl_seconds),
            ..Self::default()
        }
    }
}

impl Default for IssueOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HS256,
            expiry: Expiry::Ttl(crate::utils::constants::DEFAULT_TTL_SECONDS),
            with_jti: true,
            tenant_claim: TenantField::TenantId,
            return_to: None,
        }
    }
}

/// Signed compact token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct Token {
    pub value: String,
    pub claims: Claims,
}

/// Assemble the claims for `identity` issued at `iat`.
pub fn build_claims(identity: &Identity, options: &IssueOptions, iat: i64) -> Result<Claims, SsoError> {
    if identity.subject.is_empty() {
        return Err(SsoError::SigningError("identity subject is empty".to_owned()));
    }

    let exp = match options.expiry {
        Expiry::Ttl(ttl) => Some(iat.checked_add(ttl).ok_or_else(|| {
            SsoError::SigningError(format!("ttl {} overflows expiry", ttl))
        })?),
        Expiry::Never => None,
    };

    Ok(Claims {
        sub: identity.subject.clone(),
        iat,
        exp,
        jti: options.with_jti.then(|| Uuid::new_v4().to_string()),
        tid: identity.tenant(options.tenant_claim).map(str::to_owned),
        email: identity.email.clone(),
        first_name: identity.first_name.clone(),
        last_name: identity.last_name.clone(),
        groups: identity.groups.clone(),
        return_to: options.return_to.clone(),
    })
}

/// Sign already-built claims.
pub fn sign(claims: Claims, secret: &SigningSecret, algorithm: Algorithm) -> Result<Token, SsoError> {
    let value = encode(&Header::new(algorithm), &claims, &secret.encoding_key())
        .map_err(|e| SsoError::SigningError(e.to_string()))?;
    Ok(Token { value, claims })
}

/// Issue a token for `identity` using the current time.
pub fn issue(identity: &Identity, secret: &SigningSecret, options: &IssueOptions) -> Result<Token, SsoError> {
    issue_at(identity, secret, options, now_i64())
}

pub fn issue_at(
    identity: &Identity,
    secret: &SigningSecret,
    options: &IssueOptions,
    iat: i64,
) -> Result<Token, SsoError> {
    let claims = build_claims(identity, options, iat)?;
    sign(claims, secret, options.algorithm)
}

/// Issuer bound to the process-wide secret and options.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: SigningSecret,
    options: IssueOptions,
}

impl TokenIssuer {
    pub fn new(secret: SigningSecret, options: IssueOptions) -> Self {
        Self { secret, options }
    }

    pub fn from_config(cfg: &IssuerConfig) -> Result<Self, SsoError> {
        let secret = SigningSecret::from_config(&cfg.secret, cfg.secret_encoding)?;
        let options = IssueOptions::from_config(cfg);
        if options.expiry == Expiry::Never {
            warn!("issuer configured for non-expiring tokens; issued tokens never expire");
        }
        Ok(Self::new(secret, options))
    }

    pub fn options(&self) -> &IssueOptions {
        &self.options
    }

    pub fn issue(&self, identity: &Identity) -> Result<Token, SsoError> {
        let token = issue(identity, &self.secret, &self.options)?;
        debug!(
            "issued token for sub '{}', exp: {:?}",
            token.claims.sub, token.claims.exp
        );
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        verify(
            token,
            &self.secret,
            self.options.algorithm,
            self.options.expiry != Expiry::Never,
        )
    }
}
