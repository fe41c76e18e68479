pub mod lift;
pub mod set;
pub mod split;
pub mod user;
pub mod workout;

pub use lift::{Lift, LiftInput};
pub use set::{Set, SetInput, SetUpdateInput, WeightUnit};
pub use split::{Split, SplitInput};
pub use user::{AuthGroup, Credentials, RefreshRequest, User, UserInput, UserRecord};
pub use workout::{Workout, WorkoutInput};
