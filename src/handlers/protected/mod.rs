pub mod lifts;
pub mod sets;
pub mod splits;
pub mod workouts;
