pub mod dto;
pub mod services;
pub mod source;

pub use dto::{PhotoAngle, PhotoRef, PhotoSet};
pub use services::{CaptureOutcome, PhotoIntake};
pub use source::{CaptureMode, ImageSource, Permissions};
