//! Session issuing.
//!
//! tower-sessions only sends a cookie for sessions that were modified. To hand every
//! new client an identifier on its first request, [`issue_session`] stamps fresh
//! sessions with the time they were issued. The session store treats that stamp as
//! bookkeeping and does not persist a session until it holds real data.
//!
//! The session layer neither saves nor sends a cookie for 5xx responses. For a session
//! stamped during such a request the cookie is added here instead.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tower_cookies::{Cookie, Cookies};
use tower_sessions::Session;

use crate::server::{
    config::SessionConfig,
    error::AppError,
    startup::{session_key, SESSION_COOKIE_NAME},
    state::AppState,
};

/// Session key holding the unix timestamp the session was issued at.
pub const SESSION_ISSUED_AT: &str = "session:issued_at";

/// Issuing metadata of a session.
pub struct IssuedSession<'a> {
    /// The underlying tower-sessions Session instance.
    session: &'a Session,
}

impl<'a> IssuedSession<'a> {
    /// Creates a new IssuedSession wrapper.
    ///
    /// # Arguments
    /// - `session` - Reference to the tower-sessions Session to wrap
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stamps the session with the current time unless it already carries a stamp.
    ///
    /// Loading happens here: an absent, expired or unknown session id leaves an empty
    /// session, which then gets stamped and receives a fresh id when saved.
    ///
    /// # Returns
    /// - `Ok(true)` - The session was new and has been stamped
    /// - `Ok(false)` - The session was already issued
    /// - `Err(AppError::SessionErr(_))` - Failed to load or update the session
    pub async fn ensure_issued(&self) -> Result<bool, AppError> {
        if self.session.get::<i64>(SESSION_ISSUED_AT).await?.is_some() {
            return Ok(false);
        }

        self.session
            .insert(SESSION_ISSUED_AT, Utc::now().timestamp())
            .await?;

        Ok(true)
    }

    /// Saves the session and adds its signed cookie to the response jar.
    ///
    /// Uses the same name, attributes and signing key as the session layer.
    ///
    /// # Arguments
    /// - `cookies` - Cookie jar of the current request
    /// - `config` - Session cookie settings
    ///
    /// # Returns
    /// - `Ok(())` - The cookie was added
    /// - `Err(AppError::SessionErr(_))` - Failed to save the session
    pub async fn issue_cookie(&self, cookies: &Cookies, config: &SessionConfig) -> Result<(), AppError> {
        self.session.save().await?;

        let Some(id) = self.session.id() else {
            return Ok(());
        };

        let cookie = Cookie::build((SESSION_COOKIE_NAME, id.to_string()))
            .path("/")
            .http_only(true)
            .secure(config.cookie_secure)
            .same_site(config.cookie_same_site)
            .max_age(config.max_age)
            .build();

        cookies.signed(&session_key(&config.secret)).add(cookie);

        Ok(())
    }
}

/// Makes sure every request runs with an issued session.
///
/// A store failure is logged and the request continues without a session cookie, so
/// endpoints that do not use the session keep answering while the database is down.
pub async fn issue_session(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let cookies = request.extensions().get::<Cookies>().cloned();

    let issued = IssuedSession::new(&session);
    let fresh = match issued.ensure_issued().await {
        Ok(fresh) => fresh,
        Err(err) => {
            tracing::warn!("Failed to issue session: {}", err);
            false
        }
    };

    let response = next.run(request).await;

    if fresh && response.status().is_server_error() {
        if let Some(cookies) = cookies {
            if let Err(err) = issued.issue_cookie(&cookies, &state.config.session).await {
                tracing::warn!("Failed to issue session cookie: {}", err);
            }
        }
    }

    response
}
