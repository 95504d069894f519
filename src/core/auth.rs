//! Built-in dashboard accounts.
//!
//! There is no account lifecycle: the directory is a fixed table of
//! SHA-256 password digests.

use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,
    Analyst,
    Viewer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
}

/// Lowercase hex SHA-256 of `password`.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

const BUILTIN_ACCOUNTS: &[(&str, &str, Role)] = &[
    ("admin", "skywatch2024", Role::Admin),
    ("analyst", "maritime123", Role::Analyst),
    ("demo", "demo", Role::Viewer),
];

#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn builtin() -> Self {
        let users = BUILTIN_ACCOUNTS
            .iter()
            .map(|(username, password, role)| User {
                username: username.to_string(),
                password_hash: hash_password(password),
                role: *role,
            })
            .collect();
        Self { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        let user = self.users.iter().find(|u| u.username == username)?;
        if user.password_hash == hash_password(password) {
            Some(user)
        } else {
            tracing::debug!(username, "Password mismatch");
            None
        }
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}
