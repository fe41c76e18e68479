use serde::{Deserialize, Serialize};

use super::Lift;

/// A named collection of lifts used as a workout template. Lifts are
/// ordered by lift id ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub lifts: Vec<Lift>,
}

/// Split creation/update payload; lifts are identified by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitInput {
    pub name: String,
    pub slug: String,
    pub lifts: Vec<String>,
}
