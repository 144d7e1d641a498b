use crate::assessment::Category;
use crate::error::{EffcalcError, Result};

/// Fixed total that sibling subcategory weights must sum to.
pub const TOTAL_WEIGHT: f64 = 100.0;

/// Directly set one subcategory's weight and rebalance its siblings so the
/// category total stays exactly [`TOTAL_WEIGHT`].
///
/// The delta is spread across the siblings in proportion to their current
/// share. Siblings already at 0 get the equal-split treatment instead, since
/// a proportional share of zero is undefined. Whatever rounding drift is left
/// lands on the largest holder, so the sum is exact after every call.
///
/// Returns the full updated weight vector in subcategory order. On error the
/// category is left untouched.
pub fn set_weight(category: &mut Category, subcategory: &str, new_weight: f64) -> Result<Vec<f64>> {
    if !new_weight.is_finite() || !(0.0..=TOTAL_WEIGHT).contains(&new_weight) {
        return Err(EffcalcError::WeightOutOfRange {
            category: category.name.clone(),
            subcategory: subcategory.to_string(),
            value: new_weight,
        });
    }

    let target = category
        .subcategories
        .iter()
        .position(|s| s.name == subcategory)
        .ok_or_else(|| EffcalcError::UnknownSubcategory {
            category: category.name.clone(),
            subcategory: subcategory.to_string(),
        })?;

    let old = category.subcategories[target].weight;
    let delta = new_weight - old;
    if delta == 0.0 {
        return Ok(category.weights());
    }

    let others_total: f64 = category
        .subcategories
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target)
        .map(|(_, s)| s.weight)
        .sum();

    if others_total == 0.0 {
        // Every sibling is already at zero, so proportional shares are
        // undefined: split the remaining budget equally instead.
        let sibling_count = category.subcategories.len() - 1;
        if sibling_count > 0 {
            let share = (TOTAL_WEIGHT - new_weight) / sibling_count as f64;
            for (i, sub) in category.subcategories.iter_mut().enumerate() {
                if i != target {
                    sub.weight = share;
                }
            }
        }
        category.subcategories[target].weight = new_weight;
    } else {
        // Spread the delta across the siblings in proportion to their share
        // of others_total, flooring each at zero.
        let mut unabsorbed = 0.0;
        for (i, sub) in category.subcategories.iter_mut().enumerate() {
            if i == target {
                continue;
            }
            let adjusted = sub.weight - delta * (sub.weight / others_total);
            if adjusted < 0.0 {
                unabsorbed += -adjusted;
                sub.weight = 0.0;
            } else {
                sub.weight = adjusted;
            }
        }

        // Weight a floored sibling could not give up is re-offered to the
        // rest in a second proportional pass; with nobody left it stays on
        // the target instead of being dropped.
        let mut target_weight = new_weight;
        if unabsorbed > 0.0 {
            let pool: f64 = category
                .subcategories
                .iter()
                .enumerate()
                .filter(|(i, s)| *i != target && s.weight > 0.0)
                .map(|(_, s)| s.weight)
                .sum();

            if pool > 0.0 {
                let mut leftover = 0.0;
                for (i, sub) in category.subcategories.iter_mut().enumerate() {
                    if i == target || sub.weight == 0.0 {
                        continue;
                    }
                    let adjusted = sub.weight - unabsorbed * (sub.weight / pool);
                    if adjusted < 0.0 {
                        leftover += -adjusted;
                        sub.weight = 0.0;
                    } else {
                        sub.weight = adjusted;
                    }
                }
                target_weight -= leftover;
            } else {
                target_weight -= unabsorbed;
            }
        }
        category.subcategories[target].weight = target_weight;
    }

    // Floating-point drift from the proportional passes is assigned to the
    // current largest holder (first in order among ties), making the
    // sum-to-total invariant exact rather than approximate.
    let total = category.total_weight();
    if total != TOTAL_WEIGHT {
        let residual = TOTAL_WEIGHT - total;
        // Strictly-greater comparison keeps the first holder among ties.
        let mut largest = 0;
        for (i, sub) in category.subcategories.iter().enumerate() {
            if sub.weight > category.subcategories[largest].weight {
                largest = i;
            }
        }
        category.subcategories[largest].weight += residual;
    }

    Ok(category.weights())
}
