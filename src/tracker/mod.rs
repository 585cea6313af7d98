pub mod nutrition;
pub mod workout;

pub use nutrition::NutritionLog;
pub use workout::WorkoutLog;
