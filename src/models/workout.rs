use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Split;

/// A dated, user-owned performance of a split. The slug is server-derived
/// and doubles as the primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub at: DateTime<Utc>,
    pub slug: String,
    #[serde(skip_serializing, default)]
    pub user_id: i64,
    pub split: Split,
}

impl Workout {
    /// Derive the workout slug from its timestamp and owning user.
    ///
    /// The timestamp is rendered in UTC at microsecond precision, so two
    /// workouts by the same user collide only within the same microsecond.
    pub fn derive_slug(at: DateTime<Utc>, user_id: i64) -> String {
        format!("{}-{}", at.format("%Y%m%d-%H%M%S-%6f"), user_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutInput {
    pub at: DateTime<Utc>,
    /// Slug of the split this workout is an instance of.
    pub split: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn slug_encodes_timestamp_and_user() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 17, 30, 9).unwrap()
            + chrono::Duration::microseconds(123456);
        assert_eq!(Workout::derive_slug(at, 42), "20240305-173009-123456-42");
    }

    #[test]
    fn slug_differs_across_users_and_timestamps() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 17, 30, 9).unwrap();
        assert_ne!(Workout::derive_slug(at, 1), Workout::derive_slug(at, 2));
        let later = at + chrono::Duration::microseconds(1);
        assert_ne!(Workout::derive_slug(at, 1), Workout::derive_slug(later, 1));
    }
}
