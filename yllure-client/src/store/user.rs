//! UserStore - 用户会话
//!
//! Current identity plus the login/logout/restore lifecycle. The session
//! is persisted under [`USER_STORAGE_KEY`]; `is_authenticated` is derived
//! from the presence of a user, so the two can never disagree.

use parking_lot::RwLock;
use shared::{User, UserUpdate};
use std::sync::Arc;

use crate::ApiService;
use crate::config::AuthMode;
use crate::storage::{AUTH_TOKEN_KEY, KeyValueStore, USER_STORAGE_KEY};

const MSG_MISSING_CREDENTIALS: &str = "Please enter both email and password";
const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";
const MSG_LOGIN_FAILED: &str = "Login failed. Please try again.";
const MSG_LOAD_FAILED: &str = "Failed to load user data";

/// Session lifecycle
///
/// ```text
/// anonymous --login--> loading --ok--> authenticated --logout--> anonymous
///                         |
///                         +--fail--> errored --login--> loading
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Loading,
    Authenticated,
    Errored,
}

#[derive(Debug, Clone, Default)]
pub struct UserState {
    pub user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl UserState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn session_state(&self) -> SessionState {
        if self.is_loading {
            SessionState::Loading
        } else if self.user.is_some() {
            SessionState::Authenticated
        } else if self.error.is_some() {
            SessionState::Errored
        } else {
            SessionState::Anonymous
        }
    }
}

pub struct UserStore {
    api: Arc<ApiService>,
    storage: Arc<dyn KeyValueStore>,
    mode: AuthMode,
    state: RwLock<UserState>,
}

impl UserStore {
    pub fn new(api: Arc<ApiService>, storage: Arc<dyn KeyValueStore>, mode: AuthMode) -> Self {
        Self {
            api,
            storage,
            mode,
            state: RwLock::new(UserState::default()),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn state(&self) -> SessionState {
        self.state.read().session_state()
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Returns `true` on success. Failures land in `error()`.
    ///
    /// Blank credentials are rejected before any network call.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let email = email.trim();
        if email.is_empty() || password.trim().is_empty() {
            self.fail(MSG_MISSING_CREDENTIALS.to_string()).await;
            return false;
        }

        {
            let mut state = self.state.write();
            state.is_loading = true;
            state.error = None;
        }
        tracing::info!(email = %email, "Attempting login");

        let result = match self.mode {
            AuthMode::Demo => Ok(demo_user(email)),
            AuthMode::Remote => self.remote_login(email, password).await,
        };

        match result {
            Ok(user) => {
                self.save_session(&user).await;
                let mut state = self.state.write();
                state.user = Some(user);
                state.error = None;
                state.is_loading = false;
                tracing::info!("Login successful");
                true
            }
            Err(message) => {
                tracing::warn!(error = %message, "Login failed");
                self.fail(message).await;
                false
            }
        }
    }

    async fn remote_login(&self, email: &str, password: &str) -> Result<User, String> {
        match self.api.login(email, password).await {
            Ok(response) => {
                let error = response.error.clone();
                response
                    .into_data()
                    .ok_or_else(|| error.unwrap_or_else(|| MSG_INVALID_CREDENTIALS.to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, "Login request failed");
                Err(MSG_LOGIN_FAILED.to_string())
            }
        }
    }

    /// Failed login: no session survives, in memory or on disk
    async fn fail(&self, message: String) {
        self.clear_stored_session().await;
        let mut state = self.state.write();
        state.user = None;
        state.is_loading = false;
        state.error = Some(message);
    }

    async fn clear_stored_session(&self) {
        if let Err(e) = self
            .storage
            .multi_remove(&[USER_STORAGE_KEY, AUTH_TOKEN_KEY])
            .await
        {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
    }

    /// Always ends anonymous; remote and storage failures are logged only
    pub async fn logout(&self) {
        tracing::info!("Logging out");

        if self.mode == AuthMode::Remote {
            match self.api.logout().await {
                Ok(response) if response.success => {}
                Ok(response) => {
                    tracing::warn!(error = ?response.error, "Remote logout rejected")
                }
                Err(e) => tracing::warn!(error = %e, "Remote logout failed"),
            }
        }

        self.clear_stored_session().await;

        let mut state = self.state.write();
        state.user = None;
        state.error = None;
        state.is_loading = false;
    }

    /// Hydrate from durable storage at start-up.
    ///
    /// In remote mode the stored session is re-validated; the server's copy
    /// wins when available, otherwise the stored copy is kept.
    pub async fn load_session(&self) {
        {
            let mut state = self.state.write();
            state.is_loading = true;
            state.error = None;
        }

        let stored = match self.storage.get_item(USER_STORAGE_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load user");
                let mut state = self.state.write();
                state.is_loading = false;
                state.error = Some(MSG_LOAD_FAILED.to_string());
                return;
            }
        };

        let Some(raw) = stored else {
            tracing::debug!("No stored user found");
            self.state.write().is_loading = false;
            return;
        };

        let user = match serde_json::from_str::<User>(&raw) {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "Stored user is corrupt");
                let mut state = self.state.write();
                state.is_loading = false;
                state.error = Some(MSG_LOAD_FAILED.to_string());
                return;
            }
        };
        tracing::info!(email = %user.email, "User loaded from storage");

        let user = match self.mode {
            AuthMode::Remote => self.validate(user).await,
            AuthMode::Demo => user,
        };

        let mut state = self.state.write();
        state.user = Some(user);
        state.is_loading = false;
        state.error = None;
    }

    async fn validate(&self, stored: User) -> User {
        match self.api.current_user().await {
            Ok(response) => match response.into_data() {
                Some(server_user) => {
                    tracing::info!("User validated with server");
                    self.save_session(&server_user).await;
                    server_user
                }
                None => stored,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Server validation failed, using stored user");
                stored
            }
        }
    }

    /// Merge a partial update into the current user and persist it.
    ///
    /// No-op when nobody is logged in.
    pub async fn update_user(&self, update: UserUpdate) {
        let updated = {
            let mut state = self.state.write();
            let Some(user) = state.user.as_mut() else {
                return;
            };
            user.apply(update);
            user.clone()
        };
        self.save_session(&updated).await;
        tracing::info!("User updated locally");
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    async fn save_session(&self, user: &User) {
        let json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize user");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(USER_STORAGE_KEY, &json).await {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }
}

fn demo_user(email: &str) -> User {
    let now = chrono::Utc::now();
    User {
        id: "1".to_string(),
        name: "User".to_string(),
        email: email.to_string(),
        created_at: now,
        updated_at: now,
    }
}
