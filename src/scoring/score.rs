use crate::assessment::Subcategory;
use crate::error::{EffcalcError, Result};

/// Number of qualitative ratings in an effectiveness assessment.
pub const RATING_COUNT: usize = 5;

/// Valid range for a single qualitative rating.
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// The five qualitative dimensions, in rating order.
pub const RATING_NAMES: [&str; RATING_COUNT] = [
    "Communication",
    "Transparency",
    "Responsiveness",
    "Policy Impact",
    "Citizen Satisfaction",
];

/// Display labels for ratings 1 through 5.
pub const RATING_LABELS: [&str; 5] = ["Very Poor", "Poor", "Average", "Good", "Excellent"];

/// Percentage of a subcategory's metric weight that is implemented.
///
/// An empty implemented set scores 0, which falls straight out of the
/// formula. A subcategory with no metrics (or zero total weight) has no
/// defined score; config validation rejects that shape at load time, so
/// hitting the error here means the hierarchy bypassed validation.
pub fn metric_score(subcategory: &Subcategory) -> Result<f64> {
    let total = subcategory.total_metric_weight();
    if subcategory.metrics.is_empty() || total <= 0.0 {
        return Err(EffcalcError::NoMetrics {
            subcategory: subcategory.name.clone(),
        });
    }
    Ok(100.0 * subcategory.implemented_weight() / total)
}

/// Effectiveness score from the five qualitative ratings: the average
/// rating as a percentage of the 5-point scale.
pub fn effectiveness_score(ratings: &[u8]) -> Result<f64> {
    if ratings.len() != RATING_COUNT {
        return Err(EffcalcError::RatingCountMismatch {
            expected: RATING_COUNT,
            actual: ratings.len(),
        });
    }
    for (index, &value) in ratings.iter().enumerate() {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(EffcalcError::RatingOutOfRange { index, value });
        }
    }

    let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    let average = f64::from(sum) / RATING_COUNT as f64;
    Ok(average / f64::from(RATING_MAX) * 100.0)
}
