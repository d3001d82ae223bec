//! Authentication primitives: registration forms, login credentials, tokens
//! and verified identities.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Constructors return a ready-to-render [`Error`] so every adapter reports
//! the same field rules.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::{EmailAddress, Error, FieldError, UserId, UserName};

/// Minimum password length, counted in characters.
pub const PASSWORD_MIN_CHARS: usize = 5;

/// Field rules checked when registering a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationValidationError {
    InvalidName,
    InvalidEmail,
    PasswordTooShort,
}

impl RegistrationValidationError {
    /// Request field the rule applies to.
    pub fn field(self) -> &'static str {
        match self {
            Self::InvalidName => "name",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort => "password",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName => write!(f, "Please enter a valid name"),
            Self::InvalidEmail => write!(f, "Please enter a valid Email Id!"),
            Self::PasswordTooShort => write!(
                f,
                "Please enter a valid password with atleast {PASSWORD_MIN_CHARS} or more characters!"
            ),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Field rules checked when logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    InvalidEmail,
    MissingPassword,
}

impl LoginValidationError {
    /// Request field the rule applies to.
    pub fn field(self) -> &'static str {
        match self {
            Self::InvalidEmail => "email",
            Self::MissingPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "Please include a valid Email id!"),
            Self::MissingPassword => write!(f, "Password is Required!"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated registration request.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `email` is well-formed.
/// - `password` holds at least [`PASSWORD_MIN_CHARS`] characters and is
///   wiped from memory on drop.
///
/// # Examples
/// ```
/// use contacts_backend::domain::RegistrationForm;
///
/// let form = RegistrationForm::try_from_parts("Ann", "a@x.com", "secret1").unwrap();
/// assert_eq!(form.email().as_ref(), "a@x.com");
/// assert!(RegistrationForm::try_from_parts("Ann", "a@x.com", "abc").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl RegistrationForm {
    /// Validate raw inputs, reporting only the first failing rule.
    pub fn try_from_parts(name: &str, email: &str, password: &str) -> Result<Self, Error> {
        let name = UserName::new(name).map_err(|_| {
            registration_error(RegistrationValidationError::InvalidName, None)
        })?;
        let email = EmailAddress::new(email).map_err(|_| {
            registration_error(RegistrationValidationError::InvalidEmail, Some(email))
        })?;
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(registration_error(
                RegistrationValidationError::PasswordTooShort,
                None,
            ));
        }

        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

fn registration_error(rule: RegistrationValidationError, value: Option<&str>) -> Error {
    let field_error = FieldError::new(rule.field(), rule.to_string());
    let field_error = match value {
        Some(value) => field_error.with_value(value),
        None => field_error,
    };
    Error::validation(vec![field_error])
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is well-formed.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw inputs, reporting every failing rule.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, Error> {
        let parsed_email = EmailAddress::new(email);
        let mut failures = Vec::new();
        if parsed_email.is_err() {
            failures.push(
                FieldError::new("email", LoginValidationError::InvalidEmail.to_string())
                    .with_value(email),
            );
        }
        if password.is_empty() {
            failures.push(FieldError::new(
                "password",
                LoginValidationError::MissingPassword.to_string(),
            ));
        }

        match parsed_email {
            Ok(email) if failures.is_empty() => Ok(Self {
                email,
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(Error::validation(failures)),
        }
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signed, opaque identity token handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Caller identity recovered from a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(user_id: UserId, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            issued_at,
            expires_at,
        }
    }

    /// Subject of the token.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
