use std::collections::HashSet;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, Validation};

use crate::error::VerifyError;
use crate::issuer::claims::Claims;
use crate::issuer::secret::SigningSecret;

/// Check signature and expiry of `token` and return its claims.
///
/// No clock leeway is granted: a token whose `exp` lies in the past is
/// rejected as expired.
pub fn verify(
    token: &str,
    secret: &SigningSecret,
    algorithm: Algorithm,
    require_exp: bool,
) -> Result<Claims, VerifyError> {
    let mut validation = Validation::new(algorithm);
    validation.leeway = 0;
    validation.validate_exp = true;
    let mut required: HashSet<String> = HashSet::from(["sub".to_owned()]);
    if require_exp {
        required.insert("exp".to_owned());
    }
    validation.required_spec_claims = required;

    decode::<Claims>(token, &secret.decoding_key(), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            ErrorKind::InvalidSignature => VerifyError::InvalidSignature,
            _ => VerifyError::Malformed(e.to_string()),
        })
}
