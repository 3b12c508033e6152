//! Login screen state and validation.
//!
//! [`AuthForm`] holds the raw text of the login inputs. Every action trims
//! its inputs before use and clears fields the way the login screen expects:
//! a failed login clears only the password, a successful registration
//! clears the whole form.

use thiserror::Error;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::users::{UserStore, SECURITY_QUESTIONS};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Username already exists.")]
    UsernameTaken,

    #[error("No account found for this username.")]
    UnknownUser,

    #[error("Incorrect answer or empty password.")]
    IncorrectAnswer,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Text inputs of the login screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthForm {
    pub username: String,
    pub password: String,
    pub security_question: String,
    pub security_answer: String,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            security_question: SECURITY_QUESTIONS[0].to_string(),
            security_answer: String::new(),
        }
    }
}

impl AuthForm {
    /// Blank form with the first security question selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the entered credentials and return the logged-in username.
    ///
    /// On failure the password field is cleared and the username kept.
    pub fn login(&mut self, store: &UserStore) -> Result<String, AuthError> {
        let username = self.username.trim().to_string();
        let password = self.password.trim();

        if store.authenticate(&username, password)? {
            info!(username = %username, "Login succeeded");
            Ok(username)
        } else {
            warn!(username = %username, "Login failed");
            self.password.clear();
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Create an account from the form. Clears the form on success.
    pub fn register(&mut self, store: &UserStore) -> Result<(), AuthError> {
        let username = self.username.trim();
        let password = self.password.trim();
        let answer = self.security_answer.trim();
        if username.is_empty() || password.is_empty() || answer.is_empty() {
            return Err(AuthError::MissingFields);
        }

        if !store.register(username, password, &self.security_question, answer)? {
            return Err(AuthError::UsernameTaken);
        }

        self.username.clear();
        self.password.clear();
        self.security_answer.clear();
        Ok(())
    }

    /// Look up the security question for the entered username, the first
    /// step of a password reset.
    pub fn forgot_password(&self, store: &UserStore) -> Result<String, AuthError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(AuthError::MissingFields);
        }
        store
            .security_question(username)?
            .ok_or(AuthError::UnknownUser)
    }

    /// Set a new password for the entered username after checking the
    /// security answer.
    pub fn reset_password(
        &self,
        store: &UserStore,
        answer: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.forgot_password(store)?;

        let username = self.username.trim();
        let answer = answer.trim();
        let new_password = new_password.trim();
        if new_password.is_empty() || !store.reset_password(username, answer, new_password)? {
            return Err(AuthError::IncorrectAnswer);
        }
        Ok(())
    }
}
