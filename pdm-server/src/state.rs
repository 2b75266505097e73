use crate::{
    config::DashboardConfig,
    credentials::Credentials,
    session::{SessionCodec, SESSION_COOKIE},
};
use axum_extra::extract::CookieJar;
use pdm_gnss::upstream::Upstream;

/// Read-only state shared by every handler.
pub struct AppState<U> {
    pub upstream: U,
    pub config: DashboardConfig,
    pub credentials: Credentials,
    pub sessions: Box<dyn SessionCodec>,
}

impl<U: Upstream> AppState<U> {
    pub fn new(
        upstream: U,
        config: DashboardConfig,
        credentials: Credentials,
        sessions: Box<dyn SessionCodec>,
    ) -> Self {
        AppState {
            upstream,
            config,
            credentials,
            sessions,
        }
    }

    /// The logged-in user, if the session cookie carries a valid token for
    /// a user still in the credential table.
    pub fn session_user(&self, jar: &CookieJar) -> Option<String> {
        let token = jar.get(SESSION_COOKIE)?;
        self.sessions
            .verify(token.value())
            .filter(|user| self.credentials.contains(user))
    }
}
