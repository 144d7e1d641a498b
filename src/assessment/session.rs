use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::types::Category;
use crate::config::Config;
use crate::error::{EffcalcError, Result};
use crate::scoring::{self, TOTAL_WEIGHT};

/// Live state of one assessment: the owned category hierarchy with its
/// current weights and implemented-metric selections.
///
/// This is the only mutable state in the core. `record_edit` is the sole
/// mutation path for weights; scores are never stored, always recomputed.
/// Access is expected to be exclusive and serialized; the state itself does
/// no locking.
#[derive(Debug, Clone)]
pub struct AssessmentState {
    categories: Vec<Category>,
}

impl AssessmentState {
    /// Build a fresh session from the hierarchy config, starting at the
    /// configured default weights with nothing implemented.
    pub fn new(config: &Config) -> Self {
        Self {
            categories: config.categories.iter().map(Category::from_config).collect(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| EffcalcError::UnknownCategory {
                category: name.to_string(),
            })
    }

    fn category_mut(&mut self, name: &str) -> Result<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| EffcalcError::UnknownCategory {
                category: name.to_string(),
            })
    }

    /// Restore every category to an equal split and clear all selections.
    pub fn reset(&mut self) {
        for category in &mut self.categories {
            let count = category.subcategories.len();
            if count == 0 {
                continue;
            }
            let share = TOTAL_WEIGHT / count as f64;
            for sub in &mut category.subcategories {
                sub.weight = share;
                sub.implemented.clear();
            }
        }
    }

    /// Apply one weight-slider edit, rebalancing the siblings. Returns the
    /// updated weight vector for the category. On error nothing changes.
    pub fn record_edit(
        &mut self,
        category: &str,
        subcategory: &str,
        new_weight: f64,
    ) -> Result<Vec<f64>> {
        let category = self.category_mut(category)?;
        scoring::set_weight(category, subcategory, new_weight)
    }

    /// Flip one metric in or out of a subcategory's implemented set.
    /// Returns whether the metric is implemented afterwards.
    pub fn toggle_metric(
        &mut self,
        category: &str,
        subcategory: &str,
        metric: &str,
    ) -> Result<bool> {
        let category_name = category.to_string();
        let category = self.category_mut(category)?;
        let sub = category.subcategory_mut(subcategory).ok_or_else(|| {
            EffcalcError::UnknownSubcategory {
                category: category_name.clone(),
                subcategory: subcategory.to_string(),
            }
        })?;

        if !sub.has_metric(metric) {
            return Err(EffcalcError::UnknownMetric {
                category: category_name,
                subcategory: subcategory.to_string(),
                metric: metric.to_string(),
            });
        }

        if sub.implemented.remove(metric) {
            Ok(false)
        } else {
            sub.implemented.insert(metric.to_string());
            Ok(true)
        }
    }

    pub fn category_score(&self, name: &str) -> Result<f64> {
        scoring::category_score(self.category(name)?)
    }

    /// Overall score: the unweighted mean of all category scores.
    pub fn overall_score(&self) -> Result<f64> {
        let scores = self
            .categories
            .iter()
            .map(scoring::category_score)
            .collect::<Result<Vec<f64>>>()?;
        scoring::overall_score(&scores)
    }

    /// Replay a recorded assessment: selections first, then the weight
    /// edits in file order (one rebalance per entry, exactly as if the
    /// user had moved the sliders one at a time).
    pub fn apply(&mut self, input: &AssessmentInput) -> Result<()> {
        for selection in &input.implemented {
            for metric in &selection.metrics {
                self.toggle_metric(&selection.category, &selection.subcategory, metric)?;
            }
        }
        for edit in &input.weights {
            self.record_edit(&edit.category, &edit.subcategory, edit.weight)?;
        }
        Ok(())
    }
}

/// A recorded assessment, as read from a YAML input file.
///
/// Example:
/// ```yaml
/// organization: Department of Public Works
/// ratings: [4, 5, 3, 4, 4]
/// weights:
///   - { category: Operational Efficiency, subcategory: Process Optimization, weight: 40 }
/// implemented:
///   - category: Operational Efficiency
///     subcategory: Process Optimization
///     metrics: [Standardized workflows, Bottleneck elimination]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssessmentInput {
    pub organization: String,

    /// Optional qualitative ratings (five values, 1..=5), in the order
    /// Communication, Transparency, Responsiveness, Policy Impact,
    /// Citizen Satisfaction.
    #[serde(default)]
    pub ratings: Option<Vec<u8>>,

    /// Weight edits, applied in order through the rebalance engine.
    #[serde(default)]
    pub weights: Vec<WeightEdit>,

    /// Implemented-metric selections per subcategory.
    #[serde(default)]
    pub implemented: Vec<MetricSelection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightEdit {
    pub category: String,
    pub subcategory: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricSelection {
    pub category: String,
    pub subcategory: String,
    pub metrics: Vec<String>,
}

impl AssessmentInput {
    /// Load an assessment input from a YAML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read assessment input at {}", path.display()))?;
        let input: AssessmentInput = serde_saphyr::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> AssessmentState {
        AssessmentState::new(&Config::default())
    }

    #[test]
    fn test_new_starts_at_config_defaults() {
        let state = sample_state();
        assert_eq!(state.categories().len(), 4);
        for category in state.categories() {
            assert_eq!(category.weights(), vec![25.0, 25.0, 25.0, 25.0]);
            for sub in &category.subcategories {
                assert!(sub.implemented.is_empty());
            }
        }
    }

    #[test]
    fn test_record_edit_rebalances() {
        let mut state = sample_state();
        let weights = state
            .record_edit("Operational Efficiency", "Process Optimization", 40.0)
            .unwrap();
        assert_eq!(weights, vec![40.0, 20.0, 20.0, 20.0]);
        // Other categories untouched.
        assert_eq!(
            state.category("Fiscal Efficiency").unwrap().weights(),
            vec![25.0, 25.0, 25.0, 25.0]
        );
    }

    #[test]
    fn test_record_edit_unknown_category() {
        let mut state = sample_state();
        let err = state.record_edit("Nope", "Process Optimization", 40.0).unwrap_err();
        assert_eq!(
            err,
            EffcalcError::UnknownCategory {
                category: "Nope".to_string(),
            }
        );
    }

    #[test]
    fn test_rejected_edit_leaves_state_unchanged() {
        let mut state = sample_state();
        assert!(state
            .record_edit("Operational Efficiency", "Process Optimization", 140.0)
            .is_err());
        assert_eq!(
            state.category("Operational Efficiency").unwrap().weights(),
            vec![25.0, 25.0, 25.0, 25.0]
        );
    }

    #[test]
    fn test_toggle_metric_roundtrip() {
        let mut state = sample_state();
        let on = state
            .toggle_metric(
                "Operational Efficiency",
                "Process Optimization",
                "Standardized workflows",
            )
            .unwrap();
        assert!(on);
        let off = state
            .toggle_metric(
                "Operational Efficiency",
                "Process Optimization",
                "Standardized workflows",
            )
            .unwrap();
        assert!(!off);
    }

    #[test]
    fn test_toggle_unknown_metric() {
        let mut state = sample_state();
        let err = state
            .toggle_metric("Operational Efficiency", "Process Optimization", "Ghost")
            .unwrap_err();
        assert!(matches!(err, EffcalcError::UnknownMetric { .. }));
    }

    #[test]
    fn test_reset_restores_equal_split_and_clears_selections() {
        let mut state = sample_state();
        state
            .record_edit("Operational Efficiency", "Process Optimization", 90.0)
            .unwrap();
        state
            .toggle_metric(
                "Operational Efficiency",
                "Process Optimization",
                "Standardized workflows",
            )
            .unwrap();

        state.reset();

        for category in state.categories() {
            assert_eq!(category.weights(), vec![25.0, 25.0, 25.0, 25.0]);
            for sub in &category.subcategories {
                assert!(sub.implemented.is_empty());
            }
        }
    }

    #[test]
    fn test_reset_is_equal_split_for_any_count() {
        let yaml = r#"
categories:
  - name: Ops
    subcategories:
      - name: A
        weight: 60
        metrics: [{ name: m, weight: 1 }]
      - name: B
        weight: 30
        metrics: [{ name: m, weight: 1 }]
      - name: C
        weight: 10
        metrics: [{ name: m, weight: 1 }]
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let mut state = AssessmentState::new(&config);
        state.reset();
        let weights = state.category("Ops").unwrap().weights();
        for w in weights {
            assert!((w - 100.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_overall_score_fresh_session_is_zero() {
        let state = sample_state();
        assert_eq!(state.overall_score().unwrap(), 0.0);
    }

    #[test]
    fn test_category_and_overall_scores() {
        let mut state = sample_state();
        // Implement everything in one category.
        for sub_name in [
            "Process Optimization",
            "Resource Utilization",
            "Service Delivery Speed",
            "Digital Transformation",
        ] {
            let metrics: Vec<String> = state
                .category("Operational Efficiency")
                .unwrap()
                .subcategory(sub_name)
                .unwrap()
                .metrics
                .iter()
                .map(|m| m.name.clone())
                .collect();
            for metric in metrics {
                state
                    .toggle_metric("Operational Efficiency", sub_name, &metric)
                    .unwrap();
            }
        }

        assert_eq!(state.category_score("Operational Efficiency").unwrap(), 100.0);
        // One of four categories at 100, three at 0.
        assert_eq!(state.overall_score().unwrap(), 25.0);
    }

    #[test]
    fn test_apply_input() {
        let yaml = r#"
organization: Department of Public Works
ratings: [4, 5, 3, 4, 4]
weights:
  - { category: Operational Efficiency, subcategory: Process Optimization, weight: 40 }
implemented:
  - category: Operational Efficiency
    subcategory: Process Optimization
    metrics: [Standardized workflows, Bottleneck elimination]
"#;
        let input: AssessmentInput = serde_saphyr::from_str(yaml).unwrap();
        let mut state = sample_state();
        state.apply(&input).unwrap();

        let category = state.category("Operational Efficiency").unwrap();
        assert_eq!(category.weights(), vec![40.0, 20.0, 20.0, 20.0]);
        let sub = category.subcategory("Process Optimization").unwrap();
        assert_eq!(sub.implemented.len(), 2);
    }

    #[test]
    fn test_apply_rejects_unknown_names() {
        let yaml = r#"
organization: Test
weights:
  - { category: Operational Efficiency, subcategory: Nope, weight: 40 }
"#;
        let input: AssessmentInput = serde_saphyr::from_str(yaml).unwrap();
        let mut state = sample_state();
        assert!(state.apply(&input).is_err());
    }
}
