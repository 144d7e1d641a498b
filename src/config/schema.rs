use serde::{Deserialize, Serialize};

/// Main configuration: the category/subcategory/metric hierarchy.
///
/// Loaded once at startup and never mutated afterwards. Subcategory `weight`
/// values are the *defaults* an assessment session starts from; the session
/// owns the live, rebalanced copies.
///
/// Example YAML:
/// ```yaml
/// categories:
///   - name: Operational Efficiency
///     subcategories:
///       - name: Process Optimization
///         weight: 25
///         metrics:
///           - { name: Standardized workflows, weight: 10 }
///           - { name: Bottleneck elimination, weight: 9 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub categories: Vec<CategoryConfig>,
}

/// A named category holding an ordered list of subcategories.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub name: String,
    pub subcategories: Vec<SubcategoryConfig>,
}

/// A subcategory with its default weight (share of the category total,
/// 0..=100) and its leaf metrics.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SubcategoryConfig {
    pub name: String,

    /// Default share of the parent category. Defaults across a category must
    /// sum to 100.
    pub weight: f64,

    pub metrics: Vec<MetricConfig>,
}

/// A leaf metric with a fixed positive weight.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetricConfig {
    pub name: String,
    pub weight: f64,
}

fn subcategory(name: &str, weight: f64, metrics: &[(&str, f64)]) -> SubcategoryConfig {
    SubcategoryConfig {
        name: name.to_string(),
        weight,
        metrics: metrics
            .iter()
            .map(|(name, weight)| MetricConfig {
                name: name.to_string(),
                weight: *weight,
            })
            .collect(),
    }
}

fn category(name: &str, subcategories: Vec<SubcategoryConfig>) -> CategoryConfig {
    CategoryConfig {
        name: name.to_string(),
        subcategories,
    }
}

impl Default for Config {
    /// The built-in government-department hierarchy: four categories, four
    /// subcategories each at weight 25, four metrics per subcategory.
    fn default() -> Self {
        Self {
            categories: vec![
                category(
                    "Operational Efficiency",
                    vec![
                        subcategory(
                            "Process Optimization",
                            25.0,
                            &[
                                ("Standardized workflows", 10.0),
                                ("Process mapping implementation", 8.0),
                                ("Regular process reviews", 6.0),
                                ("Bottleneck elimination", 9.0),
                            ],
                        ),
                        subcategory(
                            "Resource Utilization",
                            25.0,
                            &[
                                ("Labor optimization", 9.0),
                                ("Time management", 8.0),
                                ("Resource waste reduction", 7.0),
                                ("Energy efficiency", 6.0),
                            ],
                        ),
                        subcategory(
                            "Service Delivery Speed",
                            25.0,
                            &[
                                ("Response time", 10.0),
                                ("Service completion rate", 8.0),
                                ("Queue management", 7.0),
                                ("Service automation", 8.0),
                            ],
                        ),
                        subcategory(
                            "Digital Transformation",
                            25.0,
                            &[
                                ("Process automation", 10.0),
                                ("Digital systems adoption", 9.0),
                                ("Cloud solution usage", 8.0),
                                ("AI implementation", 7.0),
                            ],
                        ),
                    ],
                ),
                category(
                    "Fiscal Efficiency",
                    vec![
                        subcategory(
                            "Budget Management",
                            25.0,
                            &[
                                ("Budget utilization", 10.0),
                                ("Cost forecasting", 8.0),
                                ("Budget monitoring", 7.0),
                                ("Financial planning", 8.0),
                            ],
                        ),
                        subcategory(
                            "Cost Control",
                            25.0,
                            &[
                                ("Expense reduction", 9.0),
                                ("Cost monitoring", 8.0),
                                ("Vendor management", 7.0),
                                ("Resource optimization", 8.0),
                            ],
                        ),
                        subcategory(
                            "Resource Allocation",
                            25.0,
                            &[
                                ("Fund distribution", 9.0),
                                ("Resource prioritization", 8.0),
                                ("Asset management", 7.0),
                                ("Investment planning", 8.0),
                            ],
                        ),
                        subcategory(
                            "Financial Transparency",
                            25.0,
                            &[
                                ("Financial reporting", 10.0),
                                ("Audit compliance", 9.0),
                                ("Stakeholder communication", 7.0),
                                ("Data accessibility", 8.0),
                            ],
                        ),
                    ],
                ),
                category(
                    "Administrative Efficiency",
                    vec![
                        subcategory(
                            "Paperwork Processing",
                            25.0,
                            &[
                                ("Document digitization", 10.0),
                                ("Workflow automation", 9.0),
                                ("Processing speed", 8.0),
                                ("Error reduction", 7.0),
                            ],
                        ),
                        subcategory(
                            "Response Time",
                            25.0,
                            &[
                                ("Query handling", 9.0),
                                ("Service delivery", 8.0),
                                ("Communication speed", 7.0),
                                ("Issue resolution", 8.0),
                            ],
                        ),
                        subcategory(
                            "Staff Productivity",
                            25.0,
                            &[
                                ("Task completion", 9.0),
                                ("Work quality", 8.0),
                                ("Time management", 7.0),
                                ("Goal achievement", 8.0),
                            ],
                        ),
                        subcategory(
                            "Regulatory Compliance",
                            25.0,
                            &[
                                ("Policy adherence", 10.0),
                                ("Documentation", 8.0),
                                ("Audit readiness", 7.0),
                                ("Compliance monitoring", 8.0),
                            ],
                        ),
                    ],
                ),
                category(
                    "Public Service Efficiency",
                    vec![
                        subcategory(
                            "Citizen Satisfaction",
                            25.0,
                            &[
                                ("Service quality", 10.0),
                                ("Feedback management", 8.0),
                                ("Complaint resolution", 7.0),
                                ("User experience", 8.0),
                            ],
                        ),
                        subcategory(
                            "Service Accessibility",
                            25.0,
                            &[
                                ("Digital access", 9.0),
                                ("Physical access", 8.0),
                                ("Information availability", 7.0),
                                ("Support services", 8.0),
                            ],
                        ),
                        subcategory(
                            "Communication Effectiveness",
                            25.0,
                            &[
                                ("Clear messaging", 9.0),
                                ("Channel effectiveness", 8.0),
                                ("Response quality", 7.0),
                                ("Public engagement", 8.0),
                            ],
                        ),
                        subcategory(
                            "Public Engagement",
                            25.0,
                            &[
                                ("Community involvement", 9.0),
                                ("Feedback collection", 8.0),
                                ("Public consultation", 7.0),
                                ("Stakeholder engagement", 8.0),
                            ],
                        ),
                    ],
                ),
            ],
        }
    }
}

impl Config {
    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.name == name)
    }
}

impl SubcategoryConfig {
    /// Sum of all metric weights (the denominator of a metric score).
    pub fn total_metric_weight(&self) -> f64 {
        self.metrics.iter().map(|m| m.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hierarchy_shape() {
        let config = Config::default();
        assert_eq!(config.categories.len(), 4);
        for category in &config.categories {
            assert_eq!(category.subcategories.len(), 4);
            for sub in &category.subcategories {
                assert_eq!(sub.weight, 25.0);
                assert_eq!(sub.metrics.len(), 4);
            }
        }
    }

    #[test]
    fn test_default_weights_sum_to_100() {
        let config = Config::default();
        for category in &config.categories {
            let sum: f64 = category.subcategories.iter().map(|s| s.weight).sum();
            assert!((sum - 100.0).abs() < 1e-6, "{}: sum {}", category.name, sum);
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_minimal_config_parse() {
        let yaml = r#"
categories:
  - name: Operations
    subcategories:
      - name: Throughput
        weight: 100
        metrics:
          - name: Automated intake
            weight: 10
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.categories.len(), 1);
        let sub = &config.categories[0].subcategories[0];
        assert_eq!(sub.weight, 100.0);
        assert_eq!(sub.metrics[0].name, "Automated intake");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
categories: []
extra: true
"#;
        let result: Result<Config, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_category_lookup() {
        let config = Config::default();
        assert!(config.category("Fiscal Efficiency").is_some());
        assert!(config.category("Missing").is_none());
    }

    #[test]
    fn test_total_metric_weight() {
        let config = Config::default();
        let sub = &config.categories[0].subcategories[0];
        // Process Optimization: 10 + 8 + 6 + 9
        assert_eq!(sub.total_metric_weight(), 33.0);
    }
}
