//! Access checks run before a command touches the network.

use tracing::warn;

use filehub_client::Session;
use filehub_core::error::AppError;

/// Fail unless the session holds an unexpired token.
pub fn require_auth(session: &Session) -> Result<(), AppError> {
    if session.is_authenticated() {
        Ok(())
    } else {
        warn!("Command requires a session");
        Err(AppError::auth_missing(
            "Not signed in or session expired; run `filehub login`",
        ))
    }
}

/// Fail unless the session is authenticated and carries the admin role.
pub fn require_admin(session: &Session) -> Result<(), AppError> {
    require_auth(session)?;
    if session.is_admin() {
        Ok(())
    } else {
        warn!("Command requires the admin role");
        Err(AppError::authorization("Admin role required"))
    }
}
