use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named exercise, referenced everywhere else by its unique slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Lift {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiftInput {
    pub name: String,
    pub slug: String,
}
