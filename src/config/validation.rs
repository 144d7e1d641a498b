use super::schema::Config;
use std::collections::HashSet;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate the hierarchy configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// Zero-total metric weights and empty categories are rejected here so the
/// scoring paths never have to divide by zero at assessment time.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.categories.is_empty() {
        errors.push("categories: at least one category is required".to_string());
    }

    let mut category_names = HashSet::new();
    for (ci, category) in config.categories.iter().enumerate() {
        if !category_names.insert(category.name.as_str()) {
            errors.push(format!(
                "categories[{}].name: duplicate category '{}'",
                ci, category.name
            ));
        }

        if category.subcategories.is_empty() {
            errors.push(format!(
                "categories[{}] ('{}'): at least one subcategory is required",
                ci, category.name
            ));
        }

        let mut subcategory_names = HashSet::new();
        let mut weight_sum = 0.0;
        let mut weights_in_range = true;
        for (si, sub) in category.subcategories.iter().enumerate() {
            let path = format!("categories[{}].subcategories[{}]", ci, si);

            if !subcategory_names.insert(sub.name.as_str()) {
                errors.push(format!(
                    "{}.name: duplicate subcategory '{}' in '{}'",
                    path, sub.name, category.name
                ));
            }

            if !sub.weight.is_finite() || !(0.0..=100.0).contains(&sub.weight) {
                errors.push(format!(
                    "{}.weight: {} is outside 0..=100",
                    path, sub.weight
                ));
                weights_in_range = false;
            } else {
                weight_sum += sub.weight;
            }

            if sub.metrics.is_empty() {
                errors.push(format!(
                    "{} ('{}'): at least one metric is required",
                    path, sub.name
                ));
            }

            let mut metric_names = HashSet::new();
            for (mi, metric) in sub.metrics.iter().enumerate() {
                if !metric_names.insert(metric.name.as_str()) {
                    errors.push(format!(
                        "{}.metrics[{}].name: duplicate metric '{}' in '{}'",
                        path, mi, metric.name, sub.name
                    ));
                }
                if !metric.weight.is_finite() || metric.weight <= 0.0 {
                    errors.push(format!(
                        "{}.metrics[{}].weight: {} must be a positive number",
                        path, mi, metric.weight
                    ));
                }
            }
        }

        // The sum check only means something once every weight is in range.
        if weights_in_range
            && !category.subcategories.is_empty()
            && (weight_sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE
        {
            errors.push(format!(
                "categories[{}] ('{}'): subcategory weights sum to {}, expected 100",
                ci, category.name, weight_sum
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
