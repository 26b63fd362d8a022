use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::config::issuer::SecretEncoding;
use crate::error::SsoError;

/// Shared HMAC secret. Never empty; never printed.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SsoError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SsoError::Configuration("signing secret is empty".to_owned()));
        }
        Ok(Self { bytes })
    }

    /// Build the secret from its configured textual form.
    ///
    /// Plain secrets are used byte for byte; surrounding whitespace is
    /// rejected rather than stripped, since stripping would change the key.
    pub fn from_config(raw: &str, encoding: SecretEncoding) -> Result<Self, SsoError> {
        match encoding {
            SecretEncoding::Plain => {
                if raw.trim().len() != raw.len() {
                    return Err(SsoError::Configuration(
                        "signing secret has leading or trailing whitespace".to_owned(),
                    ));
                }
                Self::new(raw.as_bytes())
            }
            SecretEncoding::Base64 => {
                let decoded = STANDARD.decode(raw.trim()).map_err(|e| {
                    SsoError::Configuration(format!("signing secret is not valid base64: {}", e))
                })?;
                Self::new(decoded)
            }
        }
    }

    pub fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.bytes)
    }

    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.bytes)
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}
