pub mod aggregate;
pub mod rebalance;
pub mod score;

pub use aggregate::{category_score, overall_score, Verdict};
pub use rebalance::{set_weight, TOTAL_WEIGHT};
pub use score::{
    effectiveness_score, metric_score, RATING_COUNT, RATING_LABELS, RATING_MAX, RATING_MIN,
    RATING_NAMES,
};
