use sqlx::SqliteConnection;

use crate::models::{AuthGroup, User, UserInput, UserRecord};

use super::{conflict_message, ServiceError};

/// Insert a user with the default `common` auth group. The password must
/// already be hashed; this layer never sees plaintext credentials.
pub async fn create(
    conn: &mut SqliteConnection,
    input: &UserInput,
    password_hash: &str,
) -> Result<User, ServiceError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO user (email, first_name, last_name, password, auth_group) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&input.email)
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(password_hash)
    .bind(AuthGroup::Common)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| conflict_message(e, "A user with that email already exists."))?;

    Ok(User {
        id,
        email: input.email.clone(),
        first_name: input.first_name.clone(),
        last_name: input.last_name.clone(),
        auth_group: AuthGroup::Common,
    })
}

pub async fn find_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserRecord>, ServiceError> {
    let user = sqlx::query_as::<_, UserRecord>(
        "SELECT id, email, first_name, last_name, auth_group, password \
         FROM user WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(user)
}

/// Grant the admin auth group to an existing user. Operational tool; there
/// is no HTTP route for this.
pub async fn promote_to_admin(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<(), ServiceError> {
    let affected = sqlx::query("UPDATE user SET auth_group = ? WHERE email = ?")
        .bind(AuthGroup::Admin)
        .bind(email)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    if affected == 0 {
        return Err(ServiceError::NotFound(format!("No user '{email}'")));
    }
    Ok(())
}
