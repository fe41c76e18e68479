use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::models::{Lift, Split, Workout, WorkoutInput};

use super::{conflict_message, splits, ServiceError};

/// Create a workout for the named split. The slug is derived from the
/// workout timestamp and owning user; a same-microsecond double submission
/// by the same user is reported as a conflict.
pub async fn create(
    conn: &mut SqliteConnection,
    input: &WorkoutInput,
    user_id: i64,
) -> Result<Workout, ServiceError> {
    let split = splits::get_by_slug(conn, &input.split)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("No split '{}'", input.split)))?;

    let slug = Workout::derive_slug(input.at, user_id);
    sqlx::query("INSERT INTO workout (at, slug, split_id, user_id) VALUES (?, ?, ?, ?)")
        .bind(input.at)
        .bind(&slug)
        .bind(split.id)
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            conflict_message(e, format!("Workout with date '{}' already exists", input.at))
        })?;

    Ok(Workout {
        at: input.at,
        slug,
        user_id,
        split,
    })
}

/// List the requesting user's workouts with their nested split and lifts.
/// The optional `at` filter is exact equality, not a range.
pub async fn list(
    conn: &mut SqliteConnection,
    user_id: i64,
    at: Option<DateTime<Utc>>,
) -> Result<Vec<Workout>, ServiceError> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT workout.at, workout.slug, workout.split_id, split.slug, split.name, \
         lift.slug, lift.name, lift.id \
         FROM workout \
         INNER JOIN split ON workout.split_id = split.id \
         LEFT JOIN split_lift ON split.id = split_lift.split_id \
         LEFT JOIN lift ON split_lift.lift_id = lift.id \
         WHERE workout.user_id = ",
    );
    query.push_bind(user_id);
    if let Some(at) = at {
        query.push(" AND workout.at = ");
        query.push_bind(at);
    }
    query.push(" ORDER BY workout.slug ASC, lift.id ASC");

    type Row = (
        DateTime<Utc>,
        String,
        i64,
        String,
        String,
        Option<String>,
        Option<String>,
        Option<i64>,
    );
    let rows: Vec<Row> = query.build_query_as().fetch_all(&mut *conn).await?;

    let mut workouts: Vec<Workout> = Vec::new();
    for (at, slug, split_id, split_slug, split_name, lift_slug, lift_name, lift_id) in rows {
        if workouts.last().map(|workout| workout.slug.as_str()) != Some(slug.as_str()) {
            workouts.push(Workout {
                at,
                slug,
                user_id,
                split: Split {
                    id: split_id,
                    name: split_name,
                    slug: split_slug,
                    lifts: Vec::new(),
                },
            });
        }
        if let (Some(current), Some(id), Some(name), Some(slug)) =
            (workouts.last_mut(), lift_id, lift_name, lift_slug)
        {
            current.split.lifts.push(Lift { id, name, slug });
        }
    }
    Ok(workouts)
}

/// Fetch a workout by slug. When `user_id` is supplied the lookup is scoped
/// to that owner; internal callers pass `None` to bypass ownership.
pub async fn get_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
    user_id: Option<i64>,
) -> Result<Option<Workout>, ServiceError> {
    let mut query =
        QueryBuilder::<Sqlite>::new("SELECT at, slug, split_id, user_id FROM workout WHERE slug = ");
    query.push_bind(slug);
    if let Some(user_id) = user_id {
        query.push(" AND user_id = ");
        query.push_bind(user_id);
    }

    let row: Option<(DateTime<Utc>, String, i64, i64)> =
        query.build_query_as().fetch_optional(&mut *conn).await?;
    let Some((at, slug, split_id, owner_id)) = row else {
        return Ok(None);
    };

    let split = splits::get_by_id(conn, split_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("No split with id '{split_id}'")))?;

    Ok(Some(Workout {
        at,
        slug,
        user_id: owner_id,
        split,
    }))
}

/// Delete a workout by slug, scoped to the owning user unless called
/// internally unscoped. The workout's sets go with it via cascade.
pub async fn delete_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
    user_id: Option<i64>,
) -> Result<(), ServiceError> {
    let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM workout WHERE slug = ");
    query.push_bind(slug);
    if let Some(user_id) = user_id {
        query.push(" AND user_id = ");
        query.push_bind(user_id);
    }

    let affected = query.build().execute(&mut *conn).await?.rows_affected();
    if affected == 0 {
        return Err(ServiceError::NotFound(format!("Workout '{slug}' not found")));
    }
    Ok(())
}
