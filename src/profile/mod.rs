pub mod dto;
pub mod services;
pub mod validation;

pub use dto::{ActivityLevel, Profile, ProfileForm, UnitSystem, UserId, UserRecord};
pub use services::submit_profile;
