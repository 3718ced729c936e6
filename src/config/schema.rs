use serde::{Deserialize, Serialize};

use crate::scoring::{Alternative, AnchorTables, CriteriaConfig, Criterion, CriterionKind, RawValue};

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   criteria:
///     - { id: academic, kind: benefit, weight: 0.30, range: [0, 100] }
///     - { id: interest, kind: categorical-match, weight: 0.35, choices: [IPA, IPS, Seni] }
///   anchors:
///     capacity: { Rendah: 100, Sedang: 70, Tinggi: 40 }
///     cost: { Rendah: 40, Sedang: 70, Tinggi: 100 }
/// catalog:
///   - code: A1
///     name: Teknik Informatika
///     attributes: { academic: 85, interest: IPA, economy: Tinggi, job_prospect: 95 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub scoring: CriteriaConfig,
    pub catalog: Vec<Alternative>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: CriteriaConfig {
                criteria: vec![
                    criterion("academic", CriterionKind::Benefit, 0.30).with_range(0.0, 100.0),
                    criterion("interest", CriterionKind::CategoricalMatch, 0.35)
                        .with_choices(&["IPA", "IPS", "Seni"]),
                    criterion("economy", CriterionKind::Cost, 0.20)
                        .with_choices(&["Rendah", "Sedang", "Tinggi"]),
                    criterion("job_prospect", CriterionKind::WeightedInteraction, 0.15)
                        .with_range(0.0, 100.0),
                ],
                anchors: AnchorTables {
                    capacity: [
                        ("Rendah".to_string(), 100.0),
                        ("Sedang".to_string(), 70.0),
                        ("Tinggi".to_string(), 40.0),
                    ]
                    .into_iter()
                    .collect(),
                    cost: [
                        ("Rendah".to_string(), 40.0),
                        ("Sedang".to_string(), 70.0),
                        ("Tinggi".to_string(), 100.0),
                    ]
                    .into_iter()
                    .collect(),
                },
            },
            catalog: vec![
                alternative("A1", "Teknik Informatika", 85.0, "IPA", "Tinggi", 95.0),
                alternative("A2", "Manajemen", 75.0, "IPS", "Sedang", 80.0),
                alternative("A3", "Akuntansi", 78.0, "IPS", "Sedang", 85.0),
                alternative("A4", "Teknik Sipil", 80.0, "IPA", "Tinggi", 82.0),
                alternative("A5", "Psikologi", 76.0, "Seni", "Sedang", 78.0),
            ],
        }
    }
}

fn criterion(id: &str, kind: CriterionKind, weight: f64) -> Criterion {
    Criterion {
        id: id.to_string(),
        kind,
        weight,
        range: None,
        choices: None,
    }
}

trait CriterionExt {
    fn with_range(self, low: f64, high: f64) -> Criterion;
    fn with_choices(self, choices: &[&str]) -> Criterion;
}

impl CriterionExt for Criterion {
    fn with_range(mut self, low: f64, high: f64) -> Criterion {
        self.range = Some([low, high]);
        self
    }

    fn with_choices(mut self, choices: &[&str]) -> Criterion {
        self.choices = Some(choices.iter().map(|s| s.to_string()).collect());
        self
    }
}

fn alternative(
    code: &str,
    name: &str,
    standard: f64,
    interest: &str,
    cost: &str,
    prospect: f64,
) -> Alternative {
    Alternative {
        code: code.to_string(),
        name: name.to_string(),
        attributes: [
            ("academic".to_string(), RawValue::Number(standard)),
            ("interest".to_string(), RawValue::Label(interest.to_string())),
            ("economy".to_string(), RawValue::Label(cost.to_string())),
            ("job_prospect".to_string(), RawValue::Number(prospect)),
        ]
        .into_iter()
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{validate_catalog, WEIGHT_TOLERANCE};

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.scoring.validate().is_ok());
        assert!(validate_catalog(&config.catalog, &config.scoring).is_ok());
        assert_eq!(config.catalog.len(), 5);

        let sum: f64 = config.scoring.criteria.iter().map(|c| c.weight).sum();
        assert!((sum - 1.0).abs() <= WEIGHT_TOLERANCE);
    }

    #[test]
    fn test_default_config_serde_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_parse_from_yaml() {
        let yaml = r#"
scoring:
  criteria:
    - id: academic
      kind: benefit
      weight: 0.6
      range: [0, 100]
    - id: interest
      kind: categorical-match
      weight: 0.4
      choices: [IPA, IPS]
  anchors:
    capacity: { Rendah: 100 }
    cost: { Rendah: 40 }
catalog:
  - code: A1
    name: Teknik Informatika
    attributes:
      academic: 85
      interest: IPA
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.scoring.criteria.len(), 2);
        assert_eq!(config.scoring.criteria[0].kind, CriterionKind::Benefit);
        assert_eq!(config.scoring.criteria[0].range, Some([0.0, 100.0]));
        assert_eq!(config.catalog[0].code, "A1");
        assert_eq!(
            config.catalog[0].attributes.get("interest"),
            Some(&RawValue::Label("IPA".to_string()))
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
scoring:
  criteria: []
  anchors: { capacity: {}, cost: {} }
catalog: []
extra: true
"#;
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }
}
