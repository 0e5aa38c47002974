//! Single-writer session container
//!
//! All mutations go through [`SessionManager`] and hold its state lock for
//! their whole duration, so a restore, login, register or logout always runs
//! to completion before the next one starts. Every transition is published
//! on a watch channel.

use crate::state::{Session, SessionState};
use advertboard_api_client::endpoints::AuthApi;
use advertboard_api_client::{AdvertboardClient, ApiError, ApiResult, TokenStore, Tokens, User};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, instrument, warn};

/// Owns the session state and the persisted tokens
pub struct SessionManager {
    auth: AuthApi,
    tokens: Arc<dyn TokenStore>,
    state: Mutex<SessionState>,
    updates: watch::Sender<Session>,
}

impl SessionManager {
    /// Create a manager sharing the client's token store
    #[must_use]
    pub fn new(client: &AdvertboardClient) -> Self {
        let (updates, _) = watch::channel(Session::default());
        Self {
            auth: client.auth(),
            tokens: client.tokens(),
            state: Mutex::new(SessionState::Uninitialized),
            updates,
        }
    }

    /// Current state
    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Latest published snapshot, without waiting for a running operation
    #[must_use]
    pub fn current(&self) -> Session {
        self.updates.borrow().clone()
    }

    /// Receive every new snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.updates.subscribe()
    }

    /// Rebuild the session from a persisted access token
    ///
    /// Without a token the session settles as anonymous and no request is
    /// made. A token the backend rejects, or a token file that cannot be
    /// read, is cleared.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Session {
        let mut state = self.state.lock().await;
        self.transition(&mut state, SessionState::Restoring);

        let token = match self.tokens.access_token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read persisted tokens, clearing them");
                if let Err(e) = self.tokens.clear() {
                    warn!(error = %e, "Could not clear persisted tokens");
                }
                None
            }
        };

        if token.is_none() {
            debug!("No persisted access token");
            self.transition(&mut state, SessionState::Anonymous);
            return state.session();
        }

        match self.auth.me().await {
            Ok(user) => {
                info!(user_id = %user.id, "Session restored");
                self.transition(&mut state, SessionState::Authenticated(user));
            }
            Err(e) => {
                warn!(error = %e, "Session restore failed, clearing tokens");
                if let Err(e) = self.tokens.clear() {
                    warn!(error = %e, "Could not clear persisted tokens");
                }
                self.transition(&mut state, SessionState::Anonymous);
            }
        }

        state.session()
    }

    /// Sign in and persist both tokens
    ///
    /// On failure the error is returned unchanged and no user is signed in
    /// unless one already was.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let mut state = self.state.lock().await;

        let result = async {
            let response = self.auth.login(email, password).await?;
            self.tokens.save(&Tokens {
                access_token: Some(response.access_token),
                refresh_token: Some(response.refresh_token),
            })?;
            Ok::<_, ApiError>(response.user)
        }
        .await;

        self.settle(&mut state, result, "Logged in")
    }

    /// Create an account and persist its access token
    ///
    /// Registration issues no refresh token, so only the access token is
    /// stored.
    #[instrument(skip(self, password))]
    pub async fn register(&self, name: &str, email: &str, password: &str) -> ApiResult<User> {
        let mut state = self.state.lock().await;

        let result = async {
            let response = self.auth.register(name, email, password).await?;
            self.tokens.save(&Tokens {
                access_token: Some(response.access_token),
                refresh_token: None,
            })?;
            Ok::<_, ApiError>(response.user)
        }
        .await;

        self.settle(&mut state, result, "Registered")
    }

    /// Sign out
    ///
    /// The backend is told about the refresh token when there is one, but a
    /// failure there is only logged. Tokens are cleared and the session is
    /// anonymous afterwards in every case; the only error returned is a
    /// failure to clear local storage.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ApiResult<()> {
        let mut state = self.state.lock().await;

        let refresh_token = match self.tokens.refresh_token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read refresh token");
                None
            }
        };

        if let Some(refresh_token) = refresh_token {
            match self.auth.logout(&refresh_token).await {
                Ok(_) => debug!("Remote logout succeeded"),
                Err(e) => warn!(error = %e, "Remote logout failed"),
            }
        }

        let cleared = self.tokens.clear();
        self.transition(&mut state, SessionState::Anonymous);
        info!("Logged out");
        cleared
    }

    /// Swap in a refreshed copy of the signed-in user
    ///
    /// Used after operations that return the user, such as a subscription
    /// purchase granting premium access. Returns `false` and changes nothing
    /// when nobody is signed in.
    pub async fn replace_user(&self, user: User) -> bool {
        let mut state = self.state.lock().await;
        if !state.is_authenticated() {
            debug!("Ignoring user update for a signed-out session");
            return false;
        }
        self.transition(&mut state, SessionState::Authenticated(user));
        true
    }

    fn settle(&self, state: &mut SessionState, result: ApiResult<User>, what: &str) -> ApiResult<User> {
        match result {
            Ok(user) => {
                info!(user_id = %user.id, "{what}");
                self.transition(state, SessionState::Authenticated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                if !state.is_authenticated() {
                    self.transition(state, SessionState::Anonymous);
                }
                Err(e)
            }
        }
    }

    fn transition(&self, state: &mut SessionState, next: SessionState) {
        debug!(from = %state, to = %next, "Session transition");
        *state = next;
        self.updates.send_replace(state.session());
    }
}
