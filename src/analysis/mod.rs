pub mod dto;
pub mod services;

pub use dto::{AnalysisRequest, AnalysisResult};
pub use services::trigger_analysis;
