pub mod protected;
pub mod public;

use sqlx::SqliteConnection;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::UserRecord;
use crate::services;

/// Resolve the token subject to a stored user. A token whose subject no
/// longer exists is treated the same as no token at all.
pub(crate) async fn require_user(
    conn: &mut SqliteConnection,
    auth: &AuthUser,
) -> Result<UserRecord, ApiError> {
    services::users::find_by_email(conn, &auth.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User not found."))
}
