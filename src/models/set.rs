use serde::{Deserialize, Serialize};

use super::Lift;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
}

/// One recorded performance of a lift within a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub id: i64,
    pub lift: Lift,
    pub reps: i64,
    pub weight: f64,
    pub weight_unit: WeightUnit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetInput {
    /// Lift slug.
    pub lift: String,
    /// Workout slug.
    pub workout: String,
    pub reps: i64,
    pub weight: f64,
    pub weight_unit: WeightUnit,
}

/// Update payload; the owning workout of a set never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetUpdateInput {
    pub lift: String,
    pub reps: i64,
    pub weight: f64,
    pub weight_unit: WeightUnit,
}
