//! Authentication capability.
//!
//! The storefront only needs to know who is signed in and to sign users in
//! and out. [`AuthProvider`] is that capability; [`InMemoryAuth`] backs it with
//! a fixed account list, which is all a demo storefront without a backend has.

pub mod error;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

pub use error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub name: String,
    pub session_id: Uuid,
    pub signed_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Account {
    pub fn demo() -> Self {
        Self {
            email: "demo@sbfoods.com".to_string(),
            password: "password123".to_string(),
            name: Some("Demo User".to_string()),
        }
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string()
        })
    }
}

pub trait AuthProvider {
    fn current_user(&self) -> Option<&User>;
    fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError>;
    /// Signs out and returns the user that was signed in, if any.
    fn logout(&mut self) -> Option<User>;
}

#[derive(Debug, Default)]
pub struct InMemoryAuth {
    accounts: Vec<Account>,
    current: Option<User>,
}

impl InMemoryAuth {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            current: None,
        }
    }
}

impl AuthProvider for InMemoryAuth {
    fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        let account = self
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == password)
            .ok_or_else(|| {
                warn!(%email, "login rejected");
                AuthError::InvalidCredentials
            })?;

        let user = User {
            email: account.email.clone(),
            name: account.display_name(),
            session_id: Uuid::new_v4(),
            signed_in_at: Utc::now(),
        };
        info!(email = %user.email, session = %user.session_id, "signed in");
        Ok(self.current.insert(user))
    }

    fn logout(&mut self) -> Option<User> {
        let user = self.current.take();
        if let Some(u) = &user {
            info!(email = %u.email, "signed out");
        }
        user
    }
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> InMemoryAuth {
        InMemoryAuth::new(vec![
            Account::demo(),
            Account {
                email: "sam@example.com".to_string(),
                password: "hunter22".to_string(),
                name: None,
            },
        ])
    }

    #[test]
    fn test_login_and_logout() {
        let mut auth = auth();
        assert!(auth.current_user().is_none());

        let user = auth.login("demo@sbfoods.com", "password123").unwrap();
        assert_eq!(user.name, "Demo User");
        assert_eq!(
            auth.current_user().map(|u| u.email.as_str()),
            Some("demo@sbfoods.com")
        );

        let out = auth.logout().unwrap();
        assert_eq!(out.email, "demo@sbfoods.com");
        assert!(auth.current_user().is_none());
        assert!(auth.logout().is_none());
    }

    #[test]
    fn test_email_is_trimmed_and_case_insensitive() {
        let mut auth = auth();
        let user = auth.login("  SAM@Example.com ", "hunter22").unwrap();
        assert_eq!(user.email, "sam@example.com");
        assert_eq!(user.name, "sam");
    }

    #[test]
    fn test_rejects_bad_credentials() {
        let mut auth = auth();
        assert_eq!(
            auth.login("sam@example.com", "wrong").unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            auth.login("nobody@example.com", "hunter22").unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn test_rejects_malformed_email() {
        let mut auth = auth();
        for bad in ["", "sam", "@example.com", "sam@", "a@b@c"] {
            assert!(matches!(
                auth.login(bad, "x"),
                Err(AuthError::InvalidEmail(_))
            ));
        }
    }

    #[test]
    fn test_relogin_issues_new_session() {
        let mut auth = auth();
        let first = auth.login("demo@sbfoods.com", "password123").unwrap().session_id;
        let second = auth.login("sam@example.com", "hunter22").unwrap().session_id;
        assert_ne!(first, second);
        assert_eq!(auth.current_user().unwrap().email, "sam@example.com");
    }
}
