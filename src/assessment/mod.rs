mod session;
mod types;

pub use session::{AssessmentInput, AssessmentState, MetricSelection, WeightEdit};
pub use types::{Category, MetricWeight, Subcategory};
