//! Current-user context shared by the controllers of one signed-in session.

use shared::domain::UserType;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_type: UserType,
    pub email: String,
    pub jwt: Option<String>,
}

/// Created at login and cleared at logout; injected into each controller.
#[derive(Debug, Default)]
pub struct SessionContext {
    user: RwLock<Option<CurrentUser>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: CurrentUser) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    pub async fn login(&self, user: CurrentUser) {
        info!(email = %user.email, user_type = ?user.user_type, "session opened");
        *self.user.write().await = Some(user);
    }

    pub async fn logout(&self) {
        if let Some(user) = self.user.write().await.take() {
            info!(email = %user.email, "session closed");
        }
    }

    pub async fn current_user(&self) -> Option<CurrentUser> {
        self.user.read().await.clone()
    }
}
