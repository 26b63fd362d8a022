pub use axum::Router;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;

use reqwest::redirect::Policy;
use reqwest::Client;

use crate::config::proc_loader::parse_config;
use crate::config::types::ServiceConfig;
use crate::issuer::{Identity, SigningSecret};

pub const TEST_SECRET: &str = "test-shared-secret-0123456789abcdef";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Client that hands 302s back instead of following them.
pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .redirect(Policy::none())
        .build()
        .expect("reqwest client")
}

pub fn secret() -> SigningSecret {
    SigningSecret::new(TEST_SECRET).unwrap()
}

pub fn identity() -> Identity {
    Identity {
        subject: "jane@acme.test".to_owned(),
        email: Some("jane@acme.test".to_owned()),
        first_name: Some("Jane".to_owned()),
        last_name: Some("Doe".to_owned()),
        tenant_id: Some("t-42".to_owned()),
        tenant_name: Some("acme".to_owned()),
        groups: vec!["viewers".to_owned()],
    }
}

/// Full config with the given `resolver:` and `dispatcher:` blocks.
pub async fn config_with(resolver: &str, dispatcher: &str) -> ServiceConfig {
    let yaml = format!(
        r#"
settings:
  server:
    host: 127.0.0.1
    port: "0"
  logging:
    level: debug
    format: compact
  metrics:
    is_enabled: true
    path: /metrics
endpoints:
  protected_path: /api/protected
  logout_path: /api/logout
{resolver}
issuer:
  secret: "{TEST_SECRET}"
  ttl_seconds: 600
  tenant:
    claim_field: tenant_id
    url_field: tenant_name
{dispatcher}
"#
    );
    parse_config(yaml).await.expect("test config must be valid")
}
