#[cfg(test)]
mod test {
    use crate::config::resolver::{StaticCredentialConfig, StaticUser};
    use crate::error::SsoError;
    use crate::helpers::compare::constant_time_eq;
    use crate::resolver::static_credential::StaticCredentialResolver;
    use crate::resolver::RequestParams;

    fn resolver() -> StaticCredentialResolver {
        let user = |username: &str, password: &str| StaticUser {
            username: username.to_owned(),
            password: password.to_owned(),
            email: Some(format!("{}@acme.test", username)),
            first_name: None,
            last_name: None,
            tenant_id: Some("t-1".to_owned()),
            tenant_name: None,
            groups: vec!["admins".to_owned()],
        };
        StaticCredentialResolver::new(&StaticCredentialConfig {
            users: vec![user("admin", "password"), user("analyst", "S3cret!")],
        })
    }

    fn params(username: &str, password: &str) -> RequestParams {
        [("username", username), ("password", password)].into_iter().collect()
    }

    #[test]
    fn exact_pair_resolves() {
        let identity = resolver().resolve(&params("admin", "password")).unwrap();
        assert_eq!(identity.subject, "admin");
        assert_eq!(identity.email.as_deref(), Some("admin@acme.test"));
        assert_eq!(identity.tenant_id.as_deref(), Some("t-1"));
        assert_eq!(identity.groups, vec!["admins".to_owned()]);

        let identity = resolver().resolve(&params("analyst", "S3cret!")).unwrap();
        assert_eq!(identity.subject, "analyst");
    }

    #[test]
    fn any_single_character_deviation_is_rejected() {
        let r = resolver();
        let (username, password) = ("admin", "password");

        let deviations = |s: &str| -> Vec<String> {
            let chars: Vec<char> = s.chars().collect();
            let mut out = Vec::new();
            for i in 0..chars.len() {
                // substitution, case flip, deletion
                let mut sub = chars.clone();
                sub[i] = if sub[i] == 'x' { 'y' } else { 'x' };
                out.push(sub.into_iter().collect());

                let mut flip = chars.clone();
                flip[i] = flip[i].to_ascii_uppercase();
                out.push(flip.into_iter().collect());

                let mut del = chars.clone();
                del.remove(i);
                out.push(del.into_iter().collect());
            }
            out.push(format!("{}!", s));
            out
        };

        for bad in deviations(username).into_iter().filter(|u| !u.is_empty()) {
            let err = r.resolve(&params(&bad, password)).unwrap_err();
            assert!(matches!(err, SsoError::InvalidCredentials), "username {:?}", bad);
        }
        for bad in deviations(password).into_iter().filter(|p| !p.is_empty()) {
            let err = r.resolve(&params(username, &bad)).unwrap_err();
            assert!(matches!(err, SsoError::InvalidCredentials), "password {:?}", bad);
        }
    }

    #[test]
    fn password_of_another_user_is_rejected() {
        let err = resolver().resolve(&params("admin", "S3cret!")).unwrap_err();
        assert!(matches!(err, SsoError::InvalidCredentials));
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn missing_fields_are_reported() {
        let err = resolver().resolve(&RequestParams::default()).unwrap_err();
        match err {
            SsoError::MissingParameter(names) => assert_eq!(names, "username, password"),
            other => panic!("unexpected {:?}", other),
        }

        let err = resolver().resolve(&params("admin", "")).unwrap_err();
        assert!(matches!(err, SsoError::MissingParameter(ref n) if n == "password"));
    }

    #[test]
    fn password_comparison_is_exact_bytewise() {
        assert!(constant_time_eq(b"password", b"password"));
        assert!(!constant_time_eq(b"password", b"passworD"));
        assert!(!constant_time_eq(b"password", b"Password"));
        assert!(!constant_time_eq(b"password", b"passwor"));
        assert!(!constant_time_eq(b"password", b"password1"));
        assert!(constant_time_eq(b"", b""));

        // prefixes of the real password do not match
        let r = resolver();
        for len in 1.."password".len() {
            let err = r.resolve(&params("admin", &"password"[..len])).unwrap_err();
            assert!(matches!(err, SsoError::InvalidCredentials));
        }
    }
}
