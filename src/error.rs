use thiserror::Error;

/// Errors surfaced by the scoring core.
///
/// Every variant carries enough context (which category/subcategory, what
/// value was attempted) for the caller to report it without re-deriving
/// anything. Rejected edits leave state unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EffcalcError {
    #[error("weight {value} for '{category}/{subcategory}' is outside 0..=100")]
    WeightOutOfRange {
        category: String,
        subcategory: String,
        value: f64,
    },

    #[error("rating {value} at position {index} is outside 1..=5")]
    RatingOutOfRange { index: usize, value: u8 },

    #[error("expected {expected} ratings, got {actual}")]
    RatingCountMismatch { expected: usize, actual: usize },

    #[error("no categories to aggregate")]
    EmptyAssessment,

    #[error("category '{category}' has no subcategories")]
    EmptyCategory { category: String },

    #[error("subcategory '{subcategory}' has no metrics")]
    NoMetrics { subcategory: String },

    #[error("unknown category '{category}'")]
    UnknownCategory { category: String },

    #[error("unknown subcategory '{subcategory}' in category '{category}'")]
    UnknownSubcategory {
        category: String,
        subcategory: String,
    },

    #[error("unknown metric '{metric}' in '{category}/{subcategory}'")]
    UnknownMetric {
        category: String,
        subcategory: String,
        metric: String,
    },
}

pub type Result<T> = std::result::Result<T, EffcalcError>;
