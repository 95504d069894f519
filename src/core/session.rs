//! Per-request dashboard state: who is logged in and which port is on screen.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::auth::{User, UserDirectory};
use crate::core::ports::{self, Port};

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    user: Option<User>,
    selected_port: &'static Port,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            user: None,
            selected_port: ports::default_port(),
            started_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn login(
        &mut self,
        directory: &UserDirectory,
        username: &str,
        password: &str,
    ) -> anyhow::Result<&User> {
        let user = directory
            .authenticate(username, password)
            .ok_or_else(|| anyhow::anyhow!("Invalid username or password"))?;

        tracing::info!(session = %self.id, username, role = ?user.role, "Logged in");
        Ok(&*self.user.insert(user.clone()))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(session = %self.id, username = %user.username, "Logged out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> anyhow::Result<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Session {} is not logged in", self.id))
    }

    pub fn selected_port(&self) -> &'static Port {
        self.selected_port
    }

    pub fn select_port(&mut self, name: &str) -> anyhow::Result<&'static Port> {
        let port = ports::find_port(name).ok_or_else(|| anyhow::anyhow!("Unknown port: {}", name))?;
        self.selected_port = port;
        Ok(port)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
