use serde::Serialize;

use super::rebalance::TOTAL_WEIGHT;
use super::score::metric_score;
use crate::assessment::Category;
use crate::error::{EffcalcError, Result};

/// Weighted average of a category's subcategory scores.
///
/// Subcategory weights sum to [`TOTAL_WEIGHT`] (the rebalance engine keeps
/// them there), so the result stays in 0..=100.
pub fn category_score(category: &Category) -> Result<f64> {
    if category.subcategories.is_empty() {
        return Err(EffcalcError::EmptyCategory {
            category: category.name.clone(),
        });
    }

    let mut weighted_sum = 0.0;
    for sub in &category.subcategories {
        weighted_sum += metric_score(sub)? * sub.weight;
    }
    Ok(weighted_sum / TOTAL_WEIGHT)
}

/// Unweighted mean of the category scores: every category counts equally,
/// whatever its internal subcategory weighting.
pub fn overall_score(category_scores: &[f64]) -> Result<f64> {
    if category_scores.is_empty() {
        return Err(EffcalcError::EmptyAssessment);
    }
    Ok(category_scores.iter().sum::<f64>() / category_scores.len() as f64)
}

/// Three-way reading of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Verdict {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Verdict::Excellent
        } else if score >= 60.0 {
            Verdict::Good
        } else {
            Verdict::NeedsImprovement
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent efficiency level. Continue maintaining high standards.",
            Verdict::Good => "Good efficiency level with room for improvement.",
            Verdict::NeedsImprovement => "Significant improvement needed in efficiency metrics.",
        }
    }
}
