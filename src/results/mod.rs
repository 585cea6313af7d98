mod view;

pub use view::{present, Metric, Presentation, ResultsView};
