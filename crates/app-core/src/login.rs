//! Sign-in flow
//!
//! Validates the sign-in form, exchanges credentials for session tokens and
//! stores them for the REST client to use.

use std::sync::Arc;

use api_client::{AuthService, Credentials, TokenStore};

use crate::outcome::DEFAULT_FAILURE_MESSAGE;
use crate::validation::{is_non_empty, is_valid_email};

/// Sign-in form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email address as typed
    pub email: String,
    /// Password as typed
    pub password: String,
}

/// Per-field validity of a sign-in form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginValidation {
    /// Whether the email is well formed
    pub email_valid: bool,
    /// Whether a password was entered
    pub password_valid: bool,
}

impl LoginValidation {
    /// Whether every field is valid
    pub fn is_valid(&self) -> bool {
        self.email_valid && self.password_valid
    }
}

impl LoginForm {
    /// Create a form
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check every field
    pub fn validate(&self) -> LoginValidation {
        LoginValidation {
            email_valid: is_valid_email(&self.email),
            password_valid: is_non_empty(&self.password),
        }
    }
}

/// Result of a sign-in attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Tokens were issued and stored
    Success,
    /// The form failed validation; nothing was sent
    Invalid(LoginValidation),
    /// The service refused or could not be reached
    Failure {
        /// Message to show the user
        message: String,
    },
}

/// Sign-in flow
pub struct LoginFlow {
    service: Arc<dyn AuthService>,
    tokens: Arc<TokenStore>,
}

impl LoginFlow {
    /// Create a flow storing tokens into `tokens`
    pub fn new(service: Arc<dyn AuthService>, tokens: Arc<TokenStore>) -> Self {
        Self { service, tokens }
    }

    /// Attempt to sign in
    pub async fn login(&self, form: &LoginForm) -> LoginOutcome {
        let validation = form.validate();
        if !validation.is_valid() {
            return LoginOutcome::Invalid(validation);
        }

        let credentials = Credentials {
            email: form.email.clone(),
            password: form.password.clone(),
        };

        match self.service.login(credentials).await {
            Ok(response) if response.envelope.is_success() => match response.tokens {
                Some(tokens) => {
                    self.tokens.set(tokens);
                    tracing::info!("Signed in");
                    LoginOutcome::Success
                }
                None => {
                    tracing::warn!("Sign-in response carried no session tokens");
                    failure(Some("Sign-in response carried no session tokens".to_string()))
                }
            },
            Ok(response) => {
                tracing::warn!("Sign-in rejected with status {}", response.envelope.status);
                failure(response.envelope.message)
            }
            Err(e) => {
                tracing::warn!("Sign-in failed: {}", e);
                failure(e.status().and(e.reported_message()))
            }
        }
    }

    /// Forget the session
    pub fn logout(&self) {
        self.tokens.clear();
    }

    /// Whether a session is active
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }
}

fn failure(message: Option<String>) -> LoginOutcome {
    LoginOutcome::Failure {
        message: message
            .filter(|m| is_non_empty(m))
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
    }
}
