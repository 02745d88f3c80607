//! Account credential types.

use std::fmt;

/// Sign-in credentials.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental
/// logging.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    ///
    /// Use this only when constructing authentication requests; never
    /// log or display this value.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Details for creating a new account.
///
/// Carries the display metadata stored on the account's profile at
/// sign-up time.
#[derive(Clone)]
pub struct SignUp {
    email: String,
    password: String,
    full_name: String,
}

impl SignUp {
    /// Create a new sign-up request.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            full_name: full_name.into(),
        }
    }

    /// Returns the account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the display name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the generated placeholder avatar URL for this account.
    pub fn avatar_url(&self) -> String {
        format!("https://ui-avatars.com/api/?name={}", self.full_name)
    }
}

impl fmt::Debug for SignUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUp")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
