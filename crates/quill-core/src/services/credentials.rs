//! Credential store - account registration and password verification.

use std::sync::Arc;

use crate::domain::{User, mask_email, normalize_email, normalize_username};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, UserRepository};

const DUPLICATE_IDENTITY: &str = "User already exists";

/// Owns user records and the password hashing around them.
pub struct CredentialStore {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl CredentialStore {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Register a new account.
    ///
    /// Fails with [`DomainError::Duplicate`] when the email (case-insensitive)
    /// or the username is already taken.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let username = normalize_username(username);
        let email = normalize_email(email);

        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation("All fields are required".to_string()));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            tracing::debug!(email = %mask_email(&email), "Signup rejected: email taken");
            return Err(DomainError::Duplicate(DUPLICATE_IDENTITY.to_string()));
        }
        if self.users.find_by_username(&username).await?.is_some() {
            tracing::debug!(username = %username, "Signup rejected: username taken");
            return Err(DomainError::Duplicate(DUPLICATE_IDENTITY.to_string()));
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        // The unique indexes still decide a race between two concurrent signups.
        let user = match self
            .users
            .insert(User::new(&username, &email, password_hash))
            .await
        {
            Ok(user) => user,
            Err(RepoError::Constraint(_)) => {
                return Err(DomainError::Duplicate(DUPLICATE_IDENTITY.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = %user.id, email = %mask_email(&user.email), "User registered");
        Ok(user)
    }

    /// Check an email/password pair and return the matching account.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation("All fields are required".to_string()));
        }

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::UnknownAccount)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }
}
