use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Result;
use crate::record::Category;

const SCORE_DOMAIN: [f64; 2] = [0.0, 5.0];
const PERCENTAGE_DOMAIN: [f64; 2] = [0.0, 100.0];

/// The configuration of a single dashboard chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSpec {
    pub title: String,
    pub category: Category,
    pub field: String,
    /// Score metrics live on a 0-5 scale and have no unit suffix.
    #[serde(default)]
    pub is_score: bool,
    /// Inverse metrics get worse as their value grows, e.g. the return rate.
    #[serde(default)]
    pub is_inverse: bool,
    #[serde(default)]
    pub y_domain: Option<[f64; 2]>,
}

impl MetricSpec {
    pub fn new(title: &str, category: Category, field: &str) -> Self {
        Self {
            title: title.to_owned(),
            category,
            field: field.to_owned(),
            is_score: false,
            is_inverse: false,
            y_domain: None,
        }
    }

    pub fn score(mut self) -> Self {
        self.is_score = true;
        self
    }

    pub fn inverse(mut self) -> Self {
        self.is_inverse = true;
        self
    }

    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.y_domain = Some([min, max]);
        self
    }

    /// A stable identifier built from the category and the field name.
    pub fn id(&self) -> String {
        let field: String = self
            .field
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();

        format!("{}-{field}", self.category)
    }

    pub fn domain(&self) -> [f64; 2] {
        self.y_domain.unwrap_or(if self.is_score {
            SCORE_DOMAIN
        } else {
            PERCENTAGE_DOMAIN
        })
    }

    pub fn unit_suffix(&self) -> &'static str {
        if self.is_score { "" } else { "%" }
    }

    /// Formats a value with one decimal (halves round up) and the unit suffix
    /// of the metric.
    pub fn format_value(&self, value: f64) -> String {
        let rounded = (value * 10.0 + 0.5).floor() / 10.0;
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };

        format!("{rounded:.1}{}", self.unit_suffix())
    }
}

/// The ordered list of charts shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricCatalog(Vec<MetricSpec>);

impl MetricCatalog {
    pub fn new(metrics: Vec<MetricSpec>) -> Self {
        Self(metrics)
    }

    /// Reads a catalog from a JSON file holding an array of metric specs.
    pub fn from_file(path: &Path) -> Result<MetricCatalog> {
        let bytes = fs::read(path)?;
        let catalog = serde_json::from_slice(&bytes)?;
        Ok(catalog)
    }

    pub fn metrics(&self) -> &[MetricSpec] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self(vec![
            MetricSpec::new("Satisfacción del Cliente", Category::Percent, "satisfaction"),
            MetricSpec::new("Trustpilot", Category::Scores, "Trustpilot").score(),
            MetricSpec::new("NPS Business School", Category::Nps, "Business_School")
                .with_domain(-100.0, 100.0),
            MetricSpec::new(
                "Devoluciones sobre Facturación",
                Category::Devoluciones,
                "return_percentage_over_invoicing",
            )
            .inverse()
            .with_domain(0.0, 20.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_domains() {
        let percentage = MetricSpec::new("Satisfaction", Category::Percent, "satisfaction");
        let score = MetricSpec::new("Trustpilot", Category::Scores, "Trustpilot").score();
        let custom = percentage.clone().with_domain(-100.0, 100.0);

        assert_eq!(percentage.domain(), [0.0, 100.0]);
        assert_eq!(score.domain(), [0.0, 5.0]);
        assert_eq!(custom.domain(), [-100.0, 100.0]);
    }

    #[test]
    fn format_values() {
        let percentage = MetricSpec::new("Satisfaction", Category::Percent, "satisfaction");
        let score = MetricSpec::new("Trustpilot", Category::Scores, "Trustpilot").score();

        assert_eq!(percentage.format_value(72.0), "72.0%");
        assert_eq!(percentage.format_value(3.46), "3.5%");
        assert_eq!(score.format_value(4.26), "4.3");
        assert_eq!(score.format_value(4.0), "4.0");
    }

    #[test]
    fn format_rounds_halves_up() {
        let percentage = MetricSpec::new("Satisfaction", Category::Percent, "satisfaction");
        let score = MetricSpec::new("Trustpilot", Category::Scores, "Trustpilot").score();

        assert_eq!(score.format_value(4.25), "4.3");
        assert_eq!(score.format_value(4.75), "4.8");
        assert_eq!(percentage.format_value(72.25), "72.3%");
        assert_eq!(percentage.format_value(-0.04), "0.0%");
        assert_eq!(percentage.format_value(-2.25), "-2.2%");
    }

    #[test]
    fn id_is_dom_friendly() {
        let spec = MetricSpec::new("NPS", Category::Nps, "Business_School");
        assert_eq!(spec.id(), "nps-business-school");
    }

    #[test]
    fn decode_catalog_with_defaults() {
        let json = r#"[
            { "title": "Return rate", "category": "devoluciones", "field": "rate", "isInverse": true },
            { "title": "Google", "category": "scores", "field": "Google", "isScore": true, "yDomain": [1, 5] }
        ]"#;

        let catalog: MetricCatalog = serde_json::from_str(json).unwrap();
        let metrics = catalog.metrics();

        assert_eq!(metrics.len(), 2);
        assert!(metrics[0].is_inverse);
        assert!(!metrics[0].is_score);
        assert_eq!(metrics[0].y_domain, None);
        assert_eq!(metrics[1].domain(), [1.0, 5.0]);
    }

    #[test]
    fn default_catalog_covers_every_category() {
        let catalog = MetricCatalog::default();

        for category in Category::ALL {
            assert!(catalog.metrics().iter().any(|m| m.category == category));
        }
    }
}
