use std::collections::HashSet;

use super::criteria::{CriteriaConfig, CriterionKind, RawValue};
use super::engine::{Alternative, Profile};

/// Validate a profile against the declared contract of each criterion.
/// Returns all violations at once (not just the first) so the caller can
/// fix everything in one round trip. Accept-or-reject only; no coercion.
pub fn validate_profile(profile: &Profile, config: &CriteriaConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for criterion in &config.criteria {
        let value = match profile.values.get(&criterion.id) {
            Some(v) => v,
            None => {
                errors.push(format!("{}: no value supplied", criterion.id));
                continue;
            }
        };

        if criterion.kind.expects_number() {
            match value {
                RawValue::Number(n) => {
                    if let Some([low, high]) = criterion.range {
                        if *n < low || *n > high {
                            errors.push(format!(
                                "{}: {} is outside the allowed range {}-{}",
                                criterion.id, n, low, high
                            ));
                        }
                    }
                }
                RawValue::Label(s) => {
                    errors.push(format!(
                        "{}: expected a number, got '{}'",
                        criterion.id, s
                    ));
                }
            }
        } else {
            match value {
                RawValue::Label(s) => {
                    if let Some(ref choices) = criterion.choices {
                        if !choices.iter().any(|c| c == s) {
                            errors.push(format!(
                                "{}: '{}' is not one of {}",
                                criterion.id,
                                s,
                                choices.join(", ")
                            ));
                        }
                    }
                }
                RawValue::Number(n) => {
                    errors.push(format!(
                        "{}: expected one of {}, got number {}",
                        criterion.id,
                        criterion
                            .choices
                            .as_deref()
                            .unwrap_or_default()
                            .join(", "),
                        n
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the catalog against the configuration at load time: duplicate
/// codes, attribute holes, and cost labels missing from the anchor tables
/// all surface here rather than per scoring call.
pub fn validate_catalog(catalog: &[Alternative], config: &CriteriaConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut seen_codes = HashSet::new();
    for alternative in catalog {
        if !seen_codes.insert(alternative.code.as_str()) {
            errors.push(format!("duplicate alternative code '{}'", alternative.code));
        }

        for criterion in &config.criteria {
            let value = match alternative.attributes.get(&criterion.id) {
                Some(v) => v,
                None => {
                    errors.push(format!(
                        "alternative '{}': no attribute for criterion '{}'",
                        alternative.code, criterion.id
                    ));
                    continue;
                }
            };

            match (criterion.kind, value) {
                (CriterionKind::Cost, RawValue::Label(label)) => {
                    if !config.anchors.cost.contains_key(label) {
                        errors.push(format!(
                            "alternative '{}': cost label '{}' has no anchor entry",
                            alternative.code, label
                        ));
                    }
                }
                (CriterionKind::Cost, RawValue::Number(n)) => {
                    errors.push(format!(
                        "alternative '{}': criterion '{}' expects a cost label, got {}",
                        alternative.code, criterion.id, n
                    ));
                }
                (CriterionKind::CategoricalMatch, RawValue::Number(n)) => {
                    errors.push(format!(
                        "alternative '{}': criterion '{}' expects a category, got {}",
                        alternative.code, criterion.id, n
                    ));
                }
                (kind, RawValue::Label(s)) if kind.expects_number() => {
                    errors.push(format!(
                        "alternative '{}': criterion '{}' expects a number, got '{}'",
                        alternative.code, criterion.id, s
                    ));
                }
                _ => {}
            }
        }
    }

    // Profile-side labels for cost criteria must resolve through the
    // capacity table.
    for criterion in &config.criteria {
        if criterion.kind == CriterionKind::Cost {
            if let Some(ref choices) = criterion.choices {
                for choice in choices {
                    if !config.anchors.capacity.contains_key(choice) {
                        errors.push(format!(
                            "criterion '{}': choice '{}' has no capacity anchor entry",
                            criterion.id, choice
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
