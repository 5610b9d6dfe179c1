//! Mock authentication.
//!
//! Nothing here authenticates anyone: credentials are only checked for
//! presence and the returned token is a random string that is never stored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DEMO_USER_NAME, TOKEN_PREFIX};
use crate::random::RandomSource;

/// Message returned when either credential field is missing.
pub const CREDENTIALS_REQUIRED: &str = "Email and password required";

/// Credentials submitted to register or login.
///
/// Fields are kept as raw JSON values so any well-formed body parses;
/// [`Credentials::validate`] only checks presence, never type or format.
/// A JSON `null` reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

/// Credentials that passed the presence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCredentials {
    pub name: Option<Value>,
    pub email: Value,
}

/// User echoed back in auth responses.
///
/// Values are echoed as they arrived, so a numeric name stays numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    pub email: Value,
}

impl Credentials {
    /// Checks that `email` and `password` are present: not null and not an
    /// empty string.
    ///
    /// # Errors
    ///
    /// Returns [`CREDENTIALS_REQUIRED`] when either field is missing.
    pub fn validate(self) -> Result<ValidCredentials, &'static str> {
        let email = self.email.filter(is_present);
        let password_present = self.password.as_ref().is_some_and(is_present);

        match email {
            Some(email) if password_present => Ok(ValidCredentials {
                name: self.name,
                email,
            }),
            _ => Err(CREDENTIALS_REQUIRED),
        }
    }
}

impl ValidCredentials {
    /// User returned by register: the supplied name is echoed.
    pub fn registered_user(self) -> SessionUser {
        SessionUser {
            name: self.name,
            email: self.email,
        }
    }

    /// User returned by login: the display name is always the demo name.
    pub fn logged_in_user(self) -> SessionUser {
        SessionUser {
            name: Some(Value::from(DEMO_USER_NAME)),
            email: self.email,
        }
    }
}

fn is_present(value: &Value) -> bool {
    !matches!(value, Value::Null) && value.as_str() != Some("")
}

/// Fabricates a session token: the fixed prefix plus a random base-36 string.
pub fn fabricate_token(rng: &dyn RandomSource) -> String {
    format!("{TOKEN_PREFIX}{}", to_base36(rng.next_u64()))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(13);
    while n > 0 {
        digits.push(char::from(DIGITS[(n % 36) as usize]));
        n /= 36;
    }
    digits.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, ThreadRandom};

    use serde_json::json;

    fn creds(name: Option<&str>, email: Option<&str>, password: Option<&str>) -> Credentials {
        Credentials {
            name: name.map(Value::from),
            email: email.map(Value::from),
            password: password.map(Value::from),
        }
    }

    #[test]
    fn test_validate_requires_both_fields() {
        assert!(creds(None, Some("a@b.c"), Some("pw")).validate().is_ok());
        assert_eq!(
            creds(None, None, Some("pw")).validate(),
            Err(CREDENTIALS_REQUIRED)
        );
        assert_eq!(
            creds(None, Some("a@b.c"), None).validate(),
            Err(CREDENTIALS_REQUIRED)
        );
        assert_eq!(
            creds(None, Some(""), Some("pw")).validate(),
            Err(CREDENTIALS_REQUIRED)
        );
        assert_eq!(
            creds(None, Some("a@b.c"), Some("")).validate(),
            Err(CREDENTIALS_REQUIRED)
        );
    }

    #[test]
    fn test_no_format_checks() {
        // Anything non-empty is accepted.
        assert!(creds(None, Some("not-an-email"), Some("x")).validate().is_ok());
    }

    #[test]
    fn test_register_echoes_name() {
        let user = creds(Some("Ada"), Some("ada@example.com"), Some("pw"))
            .validate()
            .unwrap()
            .registered_user();
        assert_eq!(user.name, Some(json!("Ada")));
        assert_eq!(user.email, json!("ada@example.com"));
    }

    #[test]
    fn test_login_uses_demo_name() {
        let user = creds(Some("Ada"), Some("ada@example.com"), Some("pw"))
            .validate()
            .unwrap()
            .logged_in_user();
        assert_eq!(user.name, Some(json!("Demo User")));
    }

    #[test]
    fn test_non_string_values_count_as_present() {
        let credentials: Credentials =
            serde_json::from_value(json!({ "name": 42, "email": "a@b.c", "password": 1234 }))
                .unwrap();

        let user = credentials.validate().unwrap().registered_user();
        assert_eq!(user.name, Some(json!(42)));
        assert_eq!(user.email, json!("a@b.c"));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let credentials: Credentials =
            serde_json::from_value(json!({ "email": "a@b.c", "password": null })).unwrap();
        assert_eq!(credentials.validate(), Err(CREDENTIALS_REQUIRED));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn test_token_from_scripted_source() {
        let rng = ScriptedRandom::new(std::iter::empty()).with_ints([36 * 36]);
        assert_eq!(fabricate_token(&rng), "demo-token-100");
    }

    #[test]
    fn test_tokens_rarely_collide() {
        let rng = ThreadRandom;
        let a = fabricate_token(&rng);
        let b = fabricate_token(&rng);
        assert!(a.starts_with(TOKEN_PREFIX));
        assert_ne!(a, b);
    }
}
