use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::models::{Lift, Set, SetInput, SetUpdateInput, WeightUnit};

use super::{lifts, workouts, ServiceError};

/// Create a set against a workout. With a user id the insert joins the
/// workout on its owner, so a missing workout and a workout owned by someone
/// else both come back as the same `NotFound`. A bad lift slug trips the
/// foreign key instead and surfaces as an integrity violation.
pub async fn create(
    conn: &mut SqliteConnection,
    input: &SetInput,
    user_id: Option<i64>,
) -> Result<Set, ServiceError> {
    let id: Option<i64> = match user_id {
        Some(user_id) => {
            sqlx::query_scalar(
                "INSERT INTO lift_set (lift_slug, workout_slug, reps, weight, weight_unit) \
                 SELECT ?, ?, ?, ?, ? FROM workout \
                 WHERE workout.slug = ? AND workout.user_id = ? \
                 RETURNING id",
            )
            .bind(&input.lift)
            .bind(&input.workout)
            .bind(input.reps)
            .bind(input.weight)
            .bind(input.weight_unit)
            .bind(&input.workout)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?
        }
        None => {
            sqlx::query_scalar(
                "INSERT INTO lift_set (lift_slug, workout_slug, reps, weight, weight_unit) \
                 VALUES (?, ?, ?, ?, ?) RETURNING id",
            )
            .bind(&input.lift)
            .bind(&input.workout)
            .bind(input.reps)
            .bind(input.weight)
            .bind(input.weight_unit)
            .fetch_optional(&mut *conn)
            .await?
        }
    };
    let id = id.ok_or_else(|| ServiceError::NotFound(format!("No workout '{}'", input.workout)))?;

    let lift = resolve_lift(conn, &input.lift).await?;
    Ok(Set {
        id,
        lift,
        reps: input.reps,
        weight: input.weight,
        weight_unit: input.weight_unit,
    })
}

/// Update a set in place, re-validating ownership with the same workout
/// join used at insert time.
pub async fn update_by_id(
    conn: &mut SqliteConnection,
    set_id: i64,
    input: &SetUpdateInput,
    user_id: Option<i64>,
) -> Result<Set, ServiceError> {
    let mut query = QueryBuilder::<Sqlite>::new("UPDATE lift_set SET lift_slug = ");
    query.push_bind(&input.lift);
    query.push(", reps = ");
    query.push_bind(input.reps);
    query.push(", weight = ");
    query.push_bind(input.weight);
    query.push(", weight_unit = ");
    query.push_bind(input.weight_unit);
    match user_id {
        Some(user_id) => {
            query.push(
                " WHERE id IN (\
                 SELECT lift_set.id FROM lift_set \
                 INNER JOIN workout ON lift_set.workout_slug = workout.slug \
                 WHERE lift_set.id = ",
            );
            query.push_bind(set_id);
            query.push(" AND workout.user_id = ");
            query.push_bind(user_id);
            query.push(")");
        }
        None => {
            query.push(" WHERE id = ");
            query.push_bind(set_id);
        }
    }

    let affected = query.build().execute(&mut *conn).await?.rows_affected();
    if affected == 0 {
        return Err(ServiceError::NotFound(format!("No set '{set_id}'")));
    }

    let lift = resolve_lift(conn, &input.lift).await?;
    Ok(Set {
        id: set_id,
        lift,
        reps: input.reps,
        weight: input.weight,
        weight_unit: input.weight_unit,
    })
}

pub async fn get_by_id(
    conn: &mut SqliteConnection,
    set_id: i64,
    user_id: Option<i64>,
) -> Result<Option<Set>, ServiceError> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT lift_set.reps, lift_set.weight, lift_set.weight_unit, \
         lift.id, lift.name, lift.slug \
         FROM lift_set \
         INNER JOIN lift ON lift_set.lift_slug = lift.slug ",
    );
    match user_id {
        Some(user_id) => {
            query.push(
                "INNER JOIN workout ON lift_set.workout_slug = workout.slug \
                 WHERE lift_set.id = ",
            );
            query.push_bind(set_id);
            query.push(" AND workout.user_id = ");
            query.push_bind(user_id);
        }
        None => {
            query.push("WHERE lift_set.id = ");
            query.push_bind(set_id);
        }
    }

    let row: Option<(i64, f64, WeightUnit, i64, String, String)> =
        query.build_query_as().fetch_optional(&mut *conn).await?;
    Ok(row.map(|(reps, weight, weight_unit, lift_id, lift_name, lift_slug)| Set {
        id: set_id,
        lift: Lift {
            id: lift_id,
            name: lift_name,
            slug: lift_slug,
        },
        reps,
        weight,
        weight_unit,
    }))
}

/// List every set of a workout with its resolved lift. The workout must
/// exist and, when scoped, be owned by the caller.
pub async fn list_by_workout(
    conn: &mut SqliteConnection,
    workout_slug: &str,
    user_id: Option<i64>,
) -> Result<Vec<Set>, ServiceError> {
    let workout = workouts::get_by_slug(conn, workout_slug, None).await?;
    let owned = match (&workout, user_id) {
        (None, _) => false,
        (Some(workout), Some(user_id)) => workout.user_id == user_id,
        (Some(_), None) => true,
    };
    if !owned {
        return Err(ServiceError::NotFound(format!("No workout '{workout_slug}'")));
    }

    let rows: Vec<(i64, i64, f64, WeightUnit, i64, String, String)> = sqlx::query_as(
        "SELECT lift_set.id, lift_set.reps, lift_set.weight, lift_set.weight_unit, \
         lift.id, lift.name, lift.slug \
         FROM lift_set \
         INNER JOIN lift ON lift_set.lift_slug = lift.slug \
         WHERE lift_set.workout_slug = ?",
    )
    .bind(workout_slug)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, reps, weight, weight_unit, lift_id, lift_name, lift_slug)| Set {
            id,
            lift: Lift {
                id: lift_id,
                name: lift_name,
                slug: lift_slug,
            },
            reps,
            weight,
            weight_unit,
        })
        .collect())
}

pub async fn delete_by_id(
    conn: &mut SqliteConnection,
    set_id: i64,
    user_id: Option<i64>,
) -> Result<(), ServiceError> {
    let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM lift_set WHERE id ");
    match user_id {
        Some(user_id) => {
            query.push(
                "IN (\
                 SELECT lift_set.id FROM lift_set \
                 INNER JOIN workout ON lift_set.workout_slug = workout.slug \
                 WHERE workout.user_id = ",
            );
            query.push_bind(user_id);
            query.push(" AND lift_set.id = ");
            query.push_bind(set_id);
            query.push(")");
        }
        None => {
            query.push("= ");
            query.push_bind(set_id);
        }
    }

    let affected = query.build().execute(&mut *conn).await?.rows_affected();
    if affected == 0 {
        return Err(ServiceError::NotFound(format!("No set '{set_id}'")));
    }
    Ok(())
}

/// A set row's lift slug is FK-backed, so a missing lift here means the
/// store broke an invariant, not that the caller named a bad resource.
async fn resolve_lift(conn: &mut SqliteConnection, slug: &str) -> Result<Lift, ServiceError> {
    lifts::get_by_slug(conn, slug)
        .await?
        .ok_or_else(|| ServiceError::IntegrityViolation(format!("No lift '{slug}'")))
}
