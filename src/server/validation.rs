//! Request bodies and input validation
//!
//! Fields are optional at the type level so that a missing field is reported
//! through its rule message instead of a deserialization failure. All failing
//! rules are collected, in field order.

use std::sync::OnceLock;

use regex_lite::Regex;
use serde::Deserialize;

use super::response::FieldError;

/// Minimum name length, in characters
pub const MIN_NAME_LENGTH: usize = 3;

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 5;

const MSG_INVALID_EMAIL: &str = "Enter a valid email";
const MSG_INVALID_NAME: &str = "Enter a valid name";
const MSG_SHORT_PASSWORD: &str = "Password must be atleast 5 characters";
const MSG_BLANK_PASSWORD: &str = "Password cannot be blank";
const MSG_INVALID_LIMIT: &str = "Limit must be a non-negative integer";

/// Registration request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Validated registration input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl RegisterRequest {
    /// Check every rule and return the validated input
    pub fn validate(self) -> Result<NewUser, Vec<FieldError>> {
        let mut errors = Vec::new();

        if !self.email.as_deref().is_some_and(is_valid_email) {
            errors.push(FieldError::body("email", MSG_INVALID_EMAIL));
        }
        if !self
            .name
            .as_deref()
            .is_some_and(|n| n.chars().count() >= MIN_NAME_LENGTH)
        {
            errors.push(FieldError::body("name", MSG_INVALID_NAME));
        }
        if !self
            .password
            .as_deref()
            .is_some_and(|p| p.chars().count() >= MIN_PASSWORD_LENGTH)
        {
            errors.push(FieldError::body("password", MSG_SHORT_PASSWORD));
        }

        match (self.email, self.name, self.password) {
            (Some(email), Some(name), Some(password)) if errors.is_empty() => Ok(NewUser {
                email,
                name,
                password,
            }),
            _ => Err(errors),
        }
    }
}

/// Login request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated login input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Check every rule and return the validated input
    ///
    /// An empty password counts as present.
    pub fn validate(self) -> Result<Credentials, Vec<FieldError>> {
        let mut errors = Vec::new();

        if !self.email.as_deref().is_some_and(is_valid_email) {
            errors.push(FieldError::body("email", MSG_INVALID_EMAIL));
        }
        if self.password.is_none() {
            errors.push(FieldError::body("password", MSG_BLANK_PASSWORD));
        }

        match (self.email, self.password) {
            (Some(email), Some(password)) if errors.is_empty() => {
                Ok(Credentials { email, password })
            }
            _ => Err(errors),
        }
    }
}

/// Query parameters of the directory route
///
/// `limit` is kept as text so that a malformed value is a validation error
/// rather than a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataParams {
    pub limit: Option<String>,
    pub category: Option<String>,
}

impl DataParams {
    /// Parse the limit, if any
    pub fn parse_limit(&self) -> Result<Option<usize>, Vec<FieldError>> {
        match self.limit.as_deref() {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map(Some)
                .map_err(|_| vec![FieldError::query("limit", MSG_INVALID_LIMIT)]),
        }
    }
}

/// Syntactic email check
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

    EMAIL_RE
        .get_or_init(|| {
            Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$")
                .expect("Invalid regex pattern for email validation")
        })
        .is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, name: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: Some(email.to_string()),
            name: Some(name.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn paths(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("ada.lovelace+test@mail.example.co.uk"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada @example.com"));
        assert!(!is_valid_email("ada@@example.com"));
    }

    #[test]
    fn test_register_valid() {
        let user = register("ada@example.com", "Ada", "hunter").validate().unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name, "Ada");
        assert_eq!(user.password, "hunter");
    }

    #[test]
    fn test_register_boundary_lengths() {
        // 3-char name and 5-char password are accepted
        assert!(register("a@b.co", "Abc", "12345").validate().is_ok());

        let errors = register("a@b.co", "Ab", "1234").validate().unwrap_err();
        assert_eq!(paths(&errors), vec!["name", "password"]);
    }

    #[test]
    fn test_register_lengths_count_characters() {
        assert!(register("a@b.co", "Zoë", "pässw").validate().is_ok());
    }

    #[test]
    fn test_register_missing_fields_report_every_rule() {
        let errors = RegisterRequest::default().validate().unwrap_err();

        assert_eq!(
            errors,
            vec![
                FieldError::body("email", "Enter a valid email"),
                FieldError::body("name", "Enter a valid name"),
                FieldError::body("password", "Password must be atleast 5 characters"),
            ]
        );
    }

    #[test]
    fn test_login_valid() {
        let request = LoginRequest {
            email: Some("ada@example.com".to_string()),
            password: Some("x".to_string()),
        };
        let creds = request.validate().unwrap();
        assert_eq!(creds.email, "ada@example.com");
        assert_eq!(creds.password, "x");
    }

    #[test]
    fn test_login_empty_password_counts_as_present() {
        let request = LoginRequest {
            email: Some("ada@example.com".to_string()),
            password: Some(String::new()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_missing_fields() {
        let errors = LoginRequest::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::body("email", "Enter a valid email"),
                FieldError::body("password", "Password cannot be blank"),
            ]
        );
    }

    #[test]
    fn test_parse_limit() {
        let params = |limit: Option<&str>| DataParams {
            limit: limit.map(String::from),
            category: None,
        };

        assert_eq!(params(None).parse_limit().unwrap(), None);
        assert_eq!(params(Some("3")).parse_limit().unwrap(), Some(3));
        assert_eq!(params(Some("0")).parse_limit().unwrap(), Some(0));

        for bad in ["-1", "abc", "", "2.5"] {
            let errors = params(Some(bad)).parse_limit().unwrap_err();
            assert_eq!(errors[0].path, "limit");
            assert_eq!(errors[0].location, "query");
        }
    }
}
