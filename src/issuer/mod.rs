//! Token issuance: claims construction, HMAC signing and verification.

pub mod claims;
pub mod identity;
pub mod secret;
pub mod token_issuer;
pub mod verify;

pub use claims::Claims;
pub use identity::Identity;
pub use secret::SigningSecret;
pub use token_issuer::{issue, issue_at, Expiry, IssueOptions, Token, TokenIssuer};
pub use verify::verify;
