use std::collections::HashSet;

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::models::{Lift, Split, SplitInput};

use super::{conflict_message, ServiceError};

/// Resolve a list of lift slugs to full lifts. Fails with `NotFound` naming
/// every unresolved slug, so the caller persists nothing on a partial match.
async fn resolve_lifts(
    conn: &mut SqliteConnection,
    slugs: &[String],
) -> Result<Vec<Lift>, ServiceError> {
    if slugs.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new("SELECT id, name, slug FROM lift WHERE slug IN (");
    let mut separated = query.separated(", ");
    for slug in slugs {
        separated.push_bind(slug);
    }
    query.push(")");
    let lifts: Vec<Lift> = query.build_query_as().fetch_all(&mut *conn).await?;

    let found: HashSet<&str> = lifts.iter().map(|lift| lift.slug.as_str()).collect();
    let missing: Vec<&str> = slugs
        .iter()
        .map(String::as_str)
        .filter(|slug| !found.contains(slug))
        .collect();
    if !missing.is_empty() {
        return Err(ServiceError::NotFound(format!(
            "Could not find the following lifts: {}",
            missing.join(", ")
        )));
    }

    Ok(lifts)
}

pub async fn create(conn: &mut SqliteConnection, input: &SplitInput) -> Result<Split, ServiceError> {
    let lifts = resolve_lifts(conn, &input.lifts).await?;

    let split_id: i64 =
        sqlx::query_scalar("INSERT INTO split (name, slug) VALUES (?, ?) RETURNING id")
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| conflict_message(e, format!("Split '{}' already exists.", input.slug)))?;

    for lift in &lifts {
        sqlx::query("INSERT INTO split_lift (split_id, lift_id) VALUES (?, ?)")
            .bind(split_id)
            .bind(lift.id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(Split {
        id: split_id,
        name: input.name.clone(),
        slug: input.slug.clone(),
        lifts,
    })
}

async fn lifts_for_split(
    conn: &mut SqliteConnection,
    split_id: i64,
) -> Result<Vec<Lift>, ServiceError> {
    let lifts = sqlx::query_as::<_, Lift>(
        "SELECT lift.id, lift.name, lift.slug FROM lift \
         INNER JOIN split_lift ON lift.id = split_lift.lift_id \
         WHERE split_lift.split_id = ? \
         ORDER BY lift.id ASC",
    )
    .bind(split_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(lifts)
}

pub async fn get_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
) -> Result<Option<Split>, ServiceError> {
    let row: Option<(i64, String, String)> =
        sqlx::query_as("SELECT id, name, slug FROM split WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&mut *conn)
            .await?;
    let Some((id, name, slug)) = row else {
        return Ok(None);
    };
    let lifts = lifts_for_split(conn, id).await?;
    Ok(Some(Split { id, name, slug, lifts }))
}

pub async fn get_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Split>, ServiceError> {
    let row: Option<(i64, String, String)> =
        sqlx::query_as("SELECT id, name, slug FROM split WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
    let Some((id, name, slug)) = row else {
        return Ok(None);
    };
    let lifts = lifts_for_split(conn, id).await?;
    Ok(Some(Split { id, name, slug, lifts }))
}

/// List every split, including those with no lifts. The left joins mean a
/// zero-lift split still produces a row; its lift columns come back NULL.
pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Split>, ServiceError> {
    let rows: Vec<(i64, String, String, Option<i64>, Option<String>, Option<String>)> =
        sqlx::query_as(
            "SELECT split.id, split.name, split.slug, lift.id, lift.name, lift.slug FROM split \
             LEFT JOIN split_lift ON split.id = split_lift.split_id \
             LEFT JOIN lift ON split_lift.lift_id = lift.id \
             ORDER BY split.id ASC, lift.id ASC",
        )
        .fetch_all(&mut *conn)
        .await?;

    let mut splits: Vec<Split> = Vec::new();
    for (split_id, name, slug, lift_id, lift_name, lift_slug) in rows {
        if splits.last().map(|split| split.id) != Some(split_id) {
            splits.push(Split {
                id: split_id,
                name,
                slug,
                lifts: Vec::new(),
            });
        }
        if let (Some(current), Some(id), Some(name), Some(slug)) =
            (splits.last_mut(), lift_id, lift_name, lift_slug)
        {
            current.lifts.push(Lift { id, name, slug });
        }
    }
    Ok(splits)
}

/// Rename a split and fully replace its lift set: associations not in the
/// new list are deleted, new ones inserted. Returns `None` when the original
/// slug does not exist.
pub async fn update_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
    input: &SplitInput,
) -> Result<Option<Split>, ServiceError> {
    let split_id: Option<i64> =
        sqlx::query_scalar("UPDATE split SET name = ?, slug = ? WHERE slug = ? RETURNING id")
            .bind(&input.name)
            .bind(&input.slug)
            .bind(slug)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| conflict_message(e, format!("Split '{}' already exists.", input.slug)))?;
    let Some(split_id) = split_id else {
        return Ok(None);
    };

    let lifts = resolve_lifts(conn, &input.lifts).await?;

    let mut delete = QueryBuilder::<Sqlite>::new("DELETE FROM split_lift WHERE split_id = ");
    delete.push_bind(split_id);
    if !lifts.is_empty() {
        delete.push(" AND lift_id NOT IN (");
        let mut separated = delete.separated(", ");
        for lift in &lifts {
            separated.push_bind(lift.id);
        }
        delete.push(")");
    }
    delete.build().execute(&mut *conn).await?;

    if !lifts.is_empty() {
        let mut insert =
            QueryBuilder::<Sqlite>::new("INSERT OR IGNORE INTO split_lift (split_id, lift_id) ");
        insert.push_values(&lifts, |mut row, lift| {
            row.push_bind(split_id);
            row.push_bind(lift.id);
        });
        insert.build().execute(&mut *conn).await?;
    }

    Ok(Some(Split {
        id: split_id,
        name: input.name.clone(),
        slug: input.slug.clone(),
        lifts,
    }))
}

pub async fn delete_by_slug(conn: &mut SqliteConnection, slug: &str) -> Result<(), ServiceError> {
    let affected = sqlx::query("DELETE FROM split WHERE slug = ?")
        .bind(slug)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    if affected == 0 {
        return Err(ServiceError::NotFound(format!("Split '{slug}' not found")));
    }
    Ok(())
}
