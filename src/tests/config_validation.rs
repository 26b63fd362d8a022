#[cfg(test)]
mod test {
    use std::io::Write;

    use jsonwebtoken::Algorithm;
    use serial_test::serial;

    use crate::config::dispatcher::DispatchMode;
    use crate::config::issuer::{SecretEncoding, TenantField};
    use crate::config::proc_loader::{expand_env_vars, file_to_config, parse_config};
    use crate::config::resolver::ResolverConfig;
    use crate::service::SsoService;
    use crate::tests::common::config_with;

    const TRUSTED: &str = "resolver:\n  type: trusted_params\n";
    const REDIRECT: &str = "dispatcher:\n  mode: redirect\n";

    #[tokio::test]
    #[serial]
    async fn yaml_file_with_env_placeholders_loads() {
        std::env::set_var("SSO_TEST_SHARED_SECRET", "from-env-secret");
        std::env::remove_var("SSO_TEST_UNSET_PORT");

        let yaml = r#"
settings:
  server:
    port: "${SSO_TEST_UNSET_PORT:10000}"
  cors:
    allowed_origins: ["https://client-sso-frontend.onrender.com"]
resolver:
  type: delegated_auth
  base_url: https://company.sisense.com
issuer:
  secret: ${SSO_TEST_SHARED_SECRET}
  algorithm: HS384
dispatcher:
  mode: json
  sso_url:
    base_url: https://company.sisense.com
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let cfg = file_to_config(file.path()).await.unwrap();
        std::env::remove_var("SSO_TEST_SHARED_SECRET");

        assert_eq!(cfg.settings.server.port, "10000");
        assert_eq!(cfg.settings.server.host, "0.0.0.0");
        assert_eq!(cfg.issuer.secret, "from-env-secret");
        assert_eq!(cfg.issuer.algorithm, Algorithm::HS384);
        assert_eq!(cfg.issuer.ttl_seconds, 3600);
        assert!(!cfg.issuer.non_expiring);
        assert!(cfg.issuer.jti);
        assert_eq!(cfg.issuer.secret_encoding, SecretEncoding::Plain);
        assert_eq!(cfg.issuer.tenant.claim_field, TenantField::TenantId);
        assert_eq!(cfg.dispatcher.mode, DispatchMode::Json);
        assert_eq!(cfg.login_path(), "/api/login");
        assert!(cfg.settings.logging.is_some());

        match &cfg.resolver {
            ResolverConfig::DelegatedAuth(d) => {
                assert_eq!(d.login_path, "/api/v1/authentication/login");
                assert_eq!(d.user_info_path.as_deref(), Some("/api/v1/users/me"));
                assert_eq!(d.timeout_ms, 5000);
            }
            other => panic!("unexpected resolver {:?}", other),
        }

        assert!(SsoService::from_config(&cfg).is_ok());
    }

    #[test]
    #[serial]
    fn unset_variable_without_default_expands_to_empty() {
        std::env::remove_var("SSO_TEST_NEVER_SET");
        let out = expand_env_vars("secret: \"${SSO_TEST_NEVER_SET}\"").unwrap();
        assert_eq!(out, "secret: \"\"");
    }

    #[tokio::test]
    async fn trusted_params_defaults_to_sso_path() {
        let cfg = config_with(TRUSTED, REDIRECT).await;
        assert_eq!(cfg.login_path(), "/sisense/jwt");
    }

    #[tokio::test]
    async fn empty_secret_aborts_startup() {
        let yaml = r#"
settings:
  server:
    port: "10000"
resolver:
  type: trusted_params
issuer:
  secret: ""
dispatcher:
  mode: redirect
"#;
        let err = parse_config(yaml.to_owned()).await.unwrap_err().to_string();
        assert!(err.contains("config is not valid"), "{}", err);
        assert!(err.contains("issuer.secret"), "{}", err);
    }

    #[tokio::test]
    async fn all_problems_are_reported_together() {
        let yaml = r#"
settings:
  server:
    port: "not-a-port"
  logging:
    level: loud
    format: json
  metrics:
    is_enabled: true
    path: /api/login
endpoints:
  protected_path: api/protected
resolver:
  type: static_credential
  users: []
issuer:
  secret: "s"
  algorithm: RS256
  ttl_seconds: 0
dispatcher:
  mode: redirect
  default_target: "not a url"
"#;
        let err = parse_config(yaml.to_owned()).await.unwrap_err().to_string();
        for expected in [
            "settings.server.port",
            "settings.logging.level",
            "settings.metrics.path",
            "endpoints.protected_path",
            "resolver.users",
            "issuer.algorithm",
            "issuer.ttl_seconds",
            "dispatcher.default_target",
        ] {
            assert!(err.contains(expected), "missing '{}' in: {}", expected, err);
        }
    }

    #[tokio::test]
    async fn unroutable_paths_are_config_errors() {
        for (path, field) in [
            ("/api/{", "endpoints.login_path"),
            ("/api/:id", "endpoints.login_path"),
            ("/api/{*rest}", "endpoints.login_path"),
            ("/api/log in", "endpoints.login_path"),
        ] {
            let yaml = format!(
                r#"
settings:
  server:
    port: "10000"
endpoints:
  login_path: "{path}"
resolver:
  type: trusted_params
issuer:
  secret: "s"
dispatcher:
  mode: redirect
"#
            );
            let err = parse_config(yaml).await.unwrap_err().to_string();
            assert!(err.contains(field), "{}: {}", path, err);
            assert!(err.contains("literal path"), "{}: {}", path, err);
        }

        let cfg = config_with(TRUSTED, REDIRECT).await;
        assert_eq!(cfg.endpoints.protected_path.as_deref(), Some("/api/protected"));
    }

    #[tokio::test]
    async fn redirect_mode_needs_a_target_source() {
        let yaml = r#"
settings:
  server:
    port: "10000"
resolver:
  type: static_credential
  users:
    - username: admin
      password: password
issuer:
  secret: "s"
dispatcher:
  mode: redirect
"#;
        let err = parse_config(yaml.to_owned()).await.unwrap_err().to_string();
        assert!(err.contains("dispatcher.default_target is required"), "{}", err);
    }

    #[tokio::test]
    async fn non_expiring_tokens_require_explicit_opt_in() {
        let yaml = |non_expiring: bool| {
            format!(
                r#"
settings:
  server:
    port: "10000"
resolver:
  type: trusted_params
issuer:
  secret: "s"
  ttl_seconds: 0
  non_expiring: {non_expiring}
dispatcher:
  mode: redirect
"#
            )
        };
        assert!(parse_config(yaml(false)).await.is_err());
        assert!(parse_config(yaml(true)).await.is_ok());
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let cfg: crate::config::issuer::IssuerConfig =
            serde_yaml::from_str("secret: top-secret-value").unwrap();
        assert!(!format!("{:?}", cfg).contains("top-secret-value"));
    }
}
