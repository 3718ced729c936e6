use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ScoreError;

/// Score for a categorical criterion when the profile choice equals the
/// alternative's target category.
pub const MATCH_SCORE: f64 = 1.0;
/// Score when the categories differ. A mismatch is penalized, not zeroed.
pub const MISMATCH_SCORE: f64 = 0.6;
/// Neutral score when the profile expresses no preference (priority 0) on a
/// weighted-interaction criterion.
pub const NEUTRAL_SCORE: f64 = 0.5;
/// Fixed ceiling the weighted-interaction product is normalized against.
pub const INTERACTION_CEILING: f64 = 100.0;

/// A raw attribute value as it appears in profiles and the catalog.
///
/// YAML example:
/// ```yaml
/// academic: 85        # Number
/// interest: IPA       # Label
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Label(String),
}

impl RawValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            RawValue::Number(_) => None,
            RawValue::Label(s) => Some(s),
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Label(s) => write!(f, "{}", s),
        }
    }
}

/// Fixed categorical-to-numeric anchor tables used by cost normalization.
///
/// `capacity` maps profile-side economic-capacity labels, `cost` maps
/// alternative-side cost labels. Both are part of configuration, never
/// computed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorTables {
    pub capacity: BTreeMap<String, f64>,
    pub cost: BTreeMap<String, f64>,
}

impl AnchorTables {
    fn capacity_anchor(&self, label: &str) -> Result<f64, ScoreError> {
        self.capacity.get(label).copied().ok_or_else(|| {
            ScoreError::Configuration(format!(
                "capacity anchor table has no entry for '{}'",
                label
            ))
        })
    }

    fn cost_anchor(&self, label: &str) -> Result<f64, ScoreError> {
        self.cost.get(label).copied().ok_or_else(|| {
            ScoreError::Configuration(format!("cost anchor table has no entry for '{}'", label))
        })
    }
}

/// Benefit normalization: `value / reference`, higher raw value is better.
///
/// Returns 0 when the reference is 0 (criterion not applicable). The result
/// is intentionally not clamped: a value above the reference scores above
/// 1.0.
pub fn normalize_benefit(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    value / reference
}

/// Cost normalization: `best / actual`, lower raw value is better.
///
/// Returns 0 when `actual` is 0.
pub fn normalize_cost(best: f64, actual: f64) -> f64 {
    if actual == 0.0 {
        return 0.0;
    }
    best / actual
}

/// How a criterion turns a raw (profile value, alternative attribute) pair
/// into a dimensionless score. Each variant owns its formula and its
/// degenerate-input guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriterionKind {
    /// Profile value over the alternative's reference standard; uncapped.
    Benefit,
    /// Anchor-mapped capacity over anchor-mapped cost.
    Cost,
    /// Exact label match scores 1.0, anything else 0.6.
    CategoricalMatch,
    /// Profile priority scales the alternative's desirability, then
    /// benefit-normalized against a fixed ceiling of 100.
    WeightedInteraction,
}

impl CriterionKind {
    /// Whether the profile supplies a numeric value (as opposed to a label)
    /// for this kind of criterion.
    pub fn expects_number(&self) -> bool {
        matches!(self, CriterionKind::Benefit | CriterionKind::WeightedInteraction)
    }

    /// Compute the normalized score for one (profile, attribute) pair.
    ///
    /// Assumes the profile value passed boundary validation; a value of the
    /// wrong shape or a label missing from the anchor tables is a
    /// configuration defect and fails loudly.
    pub fn normalize(
        &self,
        id: &str,
        profile_value: &RawValue,
        attribute: &RawValue,
        anchors: &AnchorTables,
    ) -> Result<f64, ScoreError> {
        match self {
            CriterionKind::Benefit => {
                let value = expect_number(id, profile_value)?;
                let reference = expect_number(id, attribute)?;
                Ok(normalize_benefit(value, reference))
            }
            CriterionKind::Cost => {
                let capacity = anchors.capacity_anchor(expect_label(id, profile_value)?)?;
                let cost = anchors.cost_anchor(expect_label(id, attribute)?)?;
                Ok(normalize_cost(capacity, cost))
            }
            CriterionKind::CategoricalMatch => {
                let choice = expect_label(id, profile_value)?;
                let target = expect_label(id, attribute)?;
                if choice == target {
                    Ok(MATCH_SCORE)
                } else {
                    Ok(MISMATCH_SCORE)
                }
            }
            CriterionKind::WeightedInteraction => {
                let priority = expect_number(id, profile_value)?;
                let desirability = expect_number(id, attribute)?;
                // "Not interested" short-circuits to neutral rather than
                // zeroing the criterion for every alternative.
                if priority == 0.0 {
                    return Ok(NEUTRAL_SCORE);
                }
                Ok(normalize_benefit(
                    priority * (desirability / INTERACTION_CEILING),
                    INTERACTION_CEILING,
                ))
            }
        }
    }
}

fn expect_number(id: &str, value: &RawValue) -> Result<f64, ScoreError> {
    value.as_number().ok_or_else(|| {
        ScoreError::Configuration(format!(
            "criterion '{}': expected a numeric value, got '{}'",
            id, value
        ))
    })
}

fn expect_label<'a>(id: &str, value: &'a RawValue) -> Result<&'a str, ScoreError> {
    value.as_label().ok_or_else(|| {
        ScoreError::Configuration(format!(
            "criterion '{}': expected a categorical value, got '{}'",
            id, value
        ))
    })
}

/// One evaluation dimension: its normalization kind, its weight in the
/// aggregate, and the contract profile values must satisfy at the boundary.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Criterion {
    /// Stable key, shared by profile and catalog attributes.
    pub id: String,
    pub kind: CriterionKind,
    /// Relative importance, 0-1. Weights across a configuration sum to 1.0.
    pub weight: f64,
    /// Closed range a numeric profile value must lie in.
    #[serde(default)]
    pub range: Option<[f64; 2]>,
    /// Enumerated labels a categorical profile value must be one of.
    #[serde(default)]
    pub choices: Option<Vec<String>>,
}

/// Tolerance for the weight-sum invariant, matching floating point noise
/// from weights written as decimals.
pub const WEIGHT_TOLERANCE: f64 = 0.001;

/// The fixed criteria set plus the anchor tables cost normalization needs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CriteriaConfig {
    pub criteria: Vec<Criterion>,
    pub anchors: AnchorTables,
}

impl CriteriaConfig {
    /// Check the configuration invariants. Collects every problem before
    /// failing so a broken deployment surfaces all defects at once.
    pub fn validate(&self) -> Result<(), ScoreError> {
        let mut errors = Vec::new();

        if self.criteria.is_empty() {
            errors.push("no criteria configured".to_string());
        }

        for criterion in &self.criteria {
            if !(0.0..=1.0).contains(&criterion.weight) {
                errors.push(format!(
                    "criterion '{}': weight {} is outside 0-1",
                    criterion.id, criterion.weight
                ));
            }
        }

        let sum: f64 = self.criteria.iter().map(|c| c.weight).sum();
        if !self.criteria.is_empty() && (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            errors.push(format!("criterion weights sum to {}, expected 1.0", sum));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScoreError::Configuration(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors() -> AnchorTables {
        AnchorTables {
            capacity: [("Rendah", 100.0), ("Sedang", 70.0), ("Tinggi", 40.0)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            cost: [("Rendah", 40.0), ("Sedang", 70.0), ("Tinggi", 100.0)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    fn num(n: f64) -> RawValue {
        RawValue::Number(n)
    }

    fn label(s: &str) -> RawValue {
        RawValue::Label(s.to_string())
    }

    #[test]
    fn test_benefit_basic() {
        assert_eq!(normalize_benefit(85.0, 85.0), 1.0);
        assert_eq!(normalize_benefit(42.5, 85.0), 0.5);
    }

    #[test]
    fn test_benefit_uncapped_above_one() {
        // Exceeding the reference standard is rewarded, not clamped.
        assert_eq!(normalize_benefit(120.0, 100.0), 1.2);
    }

    #[test]
    fn test_benefit_zero_reference_guard() {
        assert_eq!(normalize_benefit(85.0, 0.0), 0.0);
    }

    #[test]
    fn test_cost_basic() {
        assert_eq!(normalize_cost(70.0, 100.0), 0.7);
        assert_eq!(normalize_cost(70.0, 70.0), 1.0);
    }

    #[test]
    fn test_cost_zero_actual_guard() {
        assert_eq!(normalize_cost(70.0, 0.0), 0.0);
    }

    #[test]
    fn test_categorical_match_exact_constants() {
        let kind = CriterionKind::CategoricalMatch;
        let score = kind
            .normalize("interest", &label("IPA"), &label("IPA"), &anchors())
            .unwrap();
        assert_eq!(score, 1.0);

        let score = kind
            .normalize("interest", &label("IPS"), &label("IPA"), &anchors())
            .unwrap();
        assert_eq!(score, 0.6);
    }

    #[test]
    fn test_cost_via_anchor_tables() {
        let kind = CriterionKind::Cost;
        // Sedang capacity (70) against Tinggi cost (100) -> 0.7
        let score = kind
            .normalize("economy", &label("Sedang"), &label("Tinggi"), &anchors())
            .unwrap();
        assert_eq!(score, 0.7);
    }

    #[test]
    fn test_cost_missing_anchor_is_configuration_error() {
        let kind = CriterionKind::Cost;
        let err = kind
            .normalize("economy", &label("Mewah"), &label("Tinggi"), &anchors())
            .unwrap_err();
        assert!(matches!(err, ScoreError::Configuration(_)));
        assert!(err.to_string().contains("Mewah"));
    }

    #[test]
    fn test_interaction_zero_priority_is_neutral() {
        let kind = CriterionKind::WeightedInteraction;
        for desirability in [0.0, 50.0, 95.0, 100.0] {
            let score = kind
                .normalize("job_prospect", &num(0.0), &num(desirability), &anchors())
                .unwrap();
            assert_eq!(score, 0.5);
        }
    }

    #[test]
    fn test_interaction_scales_desirability_by_priority() {
        let kind = CriterionKind::WeightedInteraction;
        // 90 * (95/100) / 100 = 0.855
        let score = kind
            .normalize("job_prospect", &num(90.0), &num(95.0), &anchors())
            .unwrap();
        assert!((score - 0.855).abs() < 1e-12);
    }

    #[test]
    fn test_type_mismatch_is_configuration_error() {
        let kind = CriterionKind::Benefit;
        let err = kind
            .normalize("academic", &label("IPA"), &num(85.0), &anchors())
            .unwrap_err();
        assert!(matches!(err, ScoreError::Configuration(_)));
    }

    #[test]
    fn test_kind_serde_names() {
        let kinds: Vec<CriterionKind> =
            serde_saphyr::from_str("[benefit, cost, categorical-match, weighted-interaction]")
                .unwrap();
        assert_eq!(
            kinds,
            vec![
                CriterionKind::Benefit,
                CriterionKind::Cost,
                CriterionKind::CategoricalMatch,
                CriterionKind::WeightedInteraction,
            ]
        );
    }

    fn weighted(weights: &[f64]) -> CriteriaConfig {
        CriteriaConfig {
            criteria: weights
                .iter()
                .enumerate()
                .map(|(i, w)| Criterion {
                    id: format!("c{}", i),
                    kind: CriterionKind::Benefit,
                    weight: *w,
                    range: None,
                    choices: None,
                })
                .collect(),
            anchors: anchors(),
        }
    }

    #[test]
    fn test_weight_sum_within_tolerance_accepted() {
        assert!(weighted(&[0.30, 0.35, 0.20, 0.15]).validate().is_ok());
        assert!(weighted(&[0.3334, 0.3333, 0.3333]).validate().is_ok());
    }

    #[test]
    fn test_weight_sum_off_rejected() {
        let err = weighted(&[0.5, 0.3]).validate().unwrap_err();
        assert!(matches!(err, ScoreError::Configuration(_)));
        assert!(err.to_string().contains("sum"));
    }

    #[test]
    fn test_weight_out_of_range_rejected() {
        let err = weighted(&[1.5, -0.5]).validate().unwrap_err();
        assert!(err.to_string().contains("outside 0-1"));
    }

    #[test]
    fn test_empty_criteria_rejected() {
        assert!(weighted(&[]).validate().is_err());
    }

    #[test]
    fn test_raw_value_untagged_parse() {
        let values: Vec<RawValue> = serde_saphyr::from_str("[85, IPA]").unwrap();
        assert_eq!(values[0], RawValue::Number(85.0));
        assert_eq!(values[1], RawValue::Label("IPA".to_string()));
    }
}
