use serde::Serialize;
use std::collections::HashSet;

use crate::config::{CategoryConfig, SubcategoryConfig};

/// A leaf metric definition: name plus a fixed positive weight.
/// Reference data, never mutated after config load.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricWeight {
    pub name: String,
    pub weight: f64,
}

/// A subcategory as held by a live assessment: its metric definitions, its
/// current share of the parent category (0..=100), and the set of metric
/// names the user has marked as implemented.
#[derive(Debug, Clone, Serialize)]
pub struct Subcategory {
    pub name: String,

    /// Share of the parent category. Siblings always sum to 100 after any
    /// completed rebalance.
    pub weight: f64,

    pub metrics: Vec<MetricWeight>,

    /// Names of implemented metrics; always a subset of `metrics` names.
    pub implemented: HashSet<String>,
}

impl Subcategory {
    pub fn from_config(config: &SubcategoryConfig) -> Self {
        Self {
            name: config.name.clone(),
            weight: config.weight,
            metrics: config
                .metrics
                .iter()
                .map(|m| MetricWeight {
                    name: m.name.clone(),
                    weight: m.weight,
                })
                .collect(),
            implemented: HashSet::new(),
        }
    }

    pub fn has_metric(&self, name: &str) -> bool {
        self.metrics.iter().any(|m| m.name == name)
    }

    /// Sum of all metric weights (the denominator of the metric score).
    pub fn total_metric_weight(&self) -> f64 {
        self.metrics.iter().map(|m| m.weight).sum()
    }

    /// Sum of the weights of implemented metrics.
    pub fn implemented_weight(&self) -> f64 {
        self.metrics
            .iter()
            .filter(|m| self.implemented.contains(&m.name))
            .map(|m| m.weight)
            .sum()
    }
}

/// A category: an ordered collection of subcategories whose weights sum
/// to 100.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn from_config(config: &CategoryConfig) -> Self {
        Self {
            name: config.name.clone(),
            subcategories: config
                .subcategories
                .iter()
                .map(Subcategory::from_config)
                .collect(),
        }
    }

    pub fn subcategory(&self, name: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.name == name)
    }

    pub fn subcategory_mut(&mut self, name: &str) -> Option<&mut Subcategory> {
        self.subcategories.iter_mut().find(|s| s.name == name)
    }

    /// The current weight vector, in subcategory order.
    pub fn weights(&self) -> Vec<f64> {
        self.subcategories.iter().map(|s| s.weight).collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.subcategories.iter().map(|s| s.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_from_config_preserves_order_and_weights() {
        let config = Config::default();
        let category = Category::from_config(&config.categories[0]);

        assert_eq!(category.name, "Operational Efficiency");
        assert_eq!(category.subcategories.len(), 4);
        assert_eq!(category.subcategories[0].name, "Process Optimization");
        assert_eq!(category.subcategories[0].weight, 25.0);
        assert_eq!(
            category.subcategories[0].metrics[0],
            MetricWeight {
                name: "Standardized workflows".to_string(),
                weight: 10.0,
            }
        );
        assert!(category.subcategories[0].implemented.is_empty());
    }

    #[test]
    fn test_has_metric() {
        let config = Config::default();
        let sub = Subcategory::from_config(&config.categories[0].subcategories[0]);
        assert!(sub.has_metric("Bottleneck elimination"));
        assert!(!sub.has_metric("Not a metric"));
    }

    #[test]
    fn test_implemented_weight() {
        let config = Config::default();
        let mut sub = Subcategory::from_config(&config.categories[0].subcategories[0]);
        assert_eq!(sub.implemented_weight(), 0.0);

        sub.implemented.insert("Standardized workflows".to_string());
        sub.implemented.insert("Regular process reviews".to_string());
        assert_eq!(sub.implemented_weight(), 16.0); // 10 + 6
    }

    #[test]
    fn test_weight_vector() {
        let config = Config::default();
        let category = Category::from_config(&config.categories[0]);
        assert_eq!(category.weights(), vec![25.0, 25.0, 25.0, 25.0]);
        assert_eq!(category.total_weight(), 100.0);
    }

    #[test]
    fn test_subcategory_lookup() {
        let config = Config::default();
        let mut category = Category::from_config(&config.categories[0]);
        assert!(category.subcategory("Resource Utilization").is_some());
        assert!(category.subcategory("Missing").is_none());
        assert!(category.subcategory_mut("Resource Utilization").is_some());
    }
}
