use sqlx::SqliteConnection;

use crate::models::{Lift, LiftInput};

use super::{conflict_message, ServiceError};

pub async fn create(conn: &mut SqliteConnection, input: &LiftInput) -> Result<Lift, ServiceError> {
    let id: i64 = sqlx::query_scalar("INSERT INTO lift (name, slug) VALUES (?, ?) RETURNING id")
        .bind(&input.name)
        .bind(&input.slug)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| conflict_message(e, format!("Lift '{}' already exists.", input.slug)))?;
    Ok(Lift {
        id,
        name: input.name.clone(),
        slug: input.slug.clone(),
    })
}

pub async fn get_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
) -> Result<Option<Lift>, ServiceError> {
    let lift = sqlx::query_as::<_, Lift>("SELECT id, name, slug FROM lift WHERE slug = ?")
        .bind(slug)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(lift)
}

pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Lift>, ServiceError> {
    let lifts = sqlx::query_as::<_, Lift>("SELECT id, name, slug FROM lift ORDER BY name ASC")
        .fetch_all(&mut *conn)
        .await?;
    Ok(lifts)
}

/// Rewrite a lift's name and slug. Returns `None` when the original slug
/// does not exist; renaming onto a taken slug is a conflict.
pub async fn update_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
    input: &LiftInput,
) -> Result<Option<Lift>, ServiceError> {
    let id: Option<i64> =
        sqlx::query_scalar("UPDATE lift SET name = ?, slug = ? WHERE slug = ? RETURNING id")
            .bind(&input.name)
            .bind(&input.slug)
            .bind(slug)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| conflict_message(e, format!("Lift '{}' already exists.", input.slug)))?;
    Ok(id.map(|id| Lift {
        id,
        name: input.name.clone(),
        slug: input.slug.clone(),
    }))
}

pub async fn delete_by_slug(conn: &mut SqliteConnection, slug: &str) -> Result<(), ServiceError> {
    let affected = sqlx::query("DELETE FROM lift WHERE slug = ?")
        .bind(slug)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    if affected == 0 {
        return Err(ServiceError::NotFound(format!("No lift '{slug}'")));
    }
    Ok(())
}
