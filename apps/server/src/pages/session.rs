//! Admin cookie session.
//!
//! The session is the explicit holder of the bearer token and display
//! username: written on login, cleared on logout, read on every admin page.
//! Clearing it does not revoke the token server-side.

use actix_session::Session;
use uuid::Uuid;

use gazette_core::ports::TokenService;

const TOKEN_KEY: &str = "token";
const USERNAME_KEY: &str = "username";

/// The authenticated admin behind a page request.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub user_id: Uuid,
    pub username: String,
}

/// Resolve the current admin, if the session holds a valid token.
pub fn current(session: &Session, tokens: &dyn TokenService) -> Option<AdminSession> {
    let token = session.get::<String>(TOKEN_KEY).ok().flatten()?;
    let claims = tokens.validate_token(&token).ok()?;

    let username = session
        .get::<String>(USERNAME_KEY)
        .ok()
        .flatten()
        .unwrap_or_else(|| claims.username.clone());

    Some(AdminSession {
        user_id: claims.user_id,
        username,
    })
}

/// Store a freshly issued token and the display username.
pub fn login(session: &Session, token: &str, username: &str) {
    if session.insert(TOKEN_KEY, token).is_err() || session.insert(USERNAME_KEY, username).is_err()
    {
        tracing::error!("Failed to write admin session");
    }
}

/// Drop the cached token and username.
pub fn logout(session: &Session) {
    session.purge();
}
