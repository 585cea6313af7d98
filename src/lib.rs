pub mod analysis;
pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod navigation;
pub mod photos;
pub mod profile;
pub mod prompt;
pub mod results;
pub mod session;
pub mod state;
pub mod tracker;
pub mod wizard;

pub use error::{FlowError, Result};
pub use navigation::{Navigation, Stage};
pub use session::Session;
pub use state::AppState;
