#[cfg(test)]
mod test {
    use crate::config::dispatcher::DispatchMode;
    use crate::config::resolver::TrustedParamsConfig;
    use crate::dispatcher::{dispatch, Dispatch};
    use crate::error::SsoError;
    use crate::issuer::{issue, IssueOptions};
    use crate::resolver::trusted_params::TrustedParamsResolver;
    use crate::resolver::RequestParams;
    use crate::tests::common::secret;

    fn params(pairs: &[(&str, &str)]) -> RequestParams {
        pairs.iter().copied().collect()
    }

    fn full() -> Vec<(&'static str, &'static str)> {
        vec![
            ("email", "jane@acme.test"),
            ("tenantId", "t-42"),
            ("returnUrl", "https://x.test/cb"),
        ]
    }

    #[test]
    fn each_missing_parameter_is_reported() {
        let resolver = TrustedParamsResolver::default();
        for skip in ["email", "tenantId", "returnUrl"] {
            let p: Vec<_> = full().into_iter().filter(|(k, _)| *k != skip).collect();
            let err = resolver.resolve(&params(&p)).unwrap_err();
            match err {
                SsoError::MissingParameter(names) => assert_eq!(names, skip),
                other => panic!("unexpected {:?}", other),
            }
        }

        let err = resolver.resolve(&RequestParams::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required parameters: email, tenantId, returnUrl"
        );
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_return_url_is_invalid() {
        let resolver = TrustedParamsResolver::default();
        for bad in ["not a url", "/relative/cb", "mailto:jane@acme.test", "ftp://x.test/cb"] {
            let mut p = full();
            p[2] = ("returnUrl", bad);
            let err = resolver.resolve(&params(&p)).unwrap_err();
            assert!(matches!(err, SsoError::InvalidParameter(_)), "{} -> {:?}", bad, err);
        }
    }

    #[test]
    fn valid_request_redirects_with_token() {
        let resolver = TrustedParamsResolver::default();
        let (identity, target) = resolver
            .resolve(&params(&[
                ("email", "jane@acme.test"),
                ("tenantId", "t-42"),
                ("tenantName", "acme"),
                ("returnUrl", "https://x.test/cb"),
            ]))
            .unwrap();
        assert_eq!(identity.subject, "jane@acme.test");
        assert_eq!(identity.tenant_id.as_deref(), Some("t-42"));
        assert_eq!(identity.tenant_name.as_deref(), Some("acme"));

        let token = issue(&identity, &secret(), &IssueOptions::default()).unwrap();
        let response = dispatch(&token.value, DispatchMode::Redirect, Some(&target), None).unwrap();
        let Dispatch::Redirect(url) = response else {
            panic!("expected redirect");
        };
        assert!(url.as_str().starts_with("https://x.test/cb"));
        let jwt = url
            .query_pairs()
            .find(|(k, _)| k == "jwt")
            .map(|(_, v)| v.into_owned());
        assert_eq!(jwt.as_deref(), Some(token.value.as_str()));
    }

    #[test]
    fn allow_list_restricts_return_hosts() {
        let resolver = TrustedParamsResolver::new(&TrustedParamsConfig {
            allowed_return_hosts: Some(vec!["X.test".to_owned()]),
        });
        assert!(resolver.resolve(&params(&full())).is_ok());

        let mut p = full();
        p[2] = ("returnUrl", "https://evil.test/cb");
        let err = resolver.resolve(&params(&p)).unwrap_err();
        assert!(matches!(err, SsoError::InvalidParameter(_)));
    }
}
