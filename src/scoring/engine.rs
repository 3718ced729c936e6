use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::criteria::{CriteriaConfig, RawValue};
use super::error::ScoreError;
use super::validation::validate_profile;

/// One candidate major: a unique code, a display name, and one raw
/// attribute per criterion. The catalog is supplied whole and never
/// mutated by the core.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Alternative {
    pub code: String,
    pub name: String,
    pub attributes: BTreeMap<String, RawValue>,
}

/// The subject being scored: one raw value per criterion id.
///
/// Serialized transparently, so a profile file is plain YAML:
/// ```yaml
/// academic: 85
/// interest: IPA
/// economy: Sedang
/// job_prospect: 90
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Profile {
    pub values: BTreeMap<String, RawValue>,
}

/// Per-alternative intermediate result: one normalized score per criterion
/// (in configuration order) plus the weighted total.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub code: String,
    pub name: String,
    pub scores: Vec<CriterionScore>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CriterionScore {
    pub criterion: String,
    pub score: f64,
}

/// One line of the ranked summary. Rank is positional: index + 1 in the
/// returned sequence.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub code: String,
    pub name: String,
    pub total: f64,
}

/// Score every alternative against the profile and rank them.
///
/// Returns the ranked summary and the full score table, built from the same
/// pass over the same order, so position N refers to the same alternative
/// in both.
///
/// Fails with `ScoreError::Validation` (listing every violated rule) when
/// the profile breaks its declared contract, and `ScoreError::Configuration`
/// when the weights or anchor tables are defective.
pub fn score(
    profile: &Profile,
    catalog: &[Alternative],
    config: &CriteriaConfig,
) -> Result<(Vec<RankedEntry>, Vec<ScoreRow>), ScoreError> {
    config.validate()?;
    validate_profile(profile, config).map_err(ScoreError::Validation)?;

    let mut rows = Vec::with_capacity(catalog.len());
    for alternative in catalog {
        let mut scores = Vec::with_capacity(config.criteria.len());
        let mut total = 0.0;

        for criterion in &config.criteria {
            // validate_profile already rejected missing profile values, so a
            // hole on either side here is a configuration defect.
            let profile_value = profile.values.get(&criterion.id).ok_or_else(|| {
                ScoreError::Configuration(format!(
                    "no profile value for criterion '{}'",
                    criterion.id
                ))
            })?;
            let attribute = alternative.attributes.get(&criterion.id).ok_or_else(|| {
                ScoreError::Configuration(format!(
                    "alternative '{}' has no attribute for criterion '{}'",
                    alternative.code, criterion.id
                ))
            })?;

            let normalized =
                criterion
                    .kind
                    .normalize(&criterion.id, profile_value, attribute, &config.anchors)?;
            total += criterion.weight * normalized;
            scores.push(CriterionScore {
                criterion: criterion.id.clone(),
                score: normalized,
            });
        }

        rows.push(ScoreRow {
            code: alternative.code.clone(),
            name: alternative.name.clone(),
            scores,
            total,
        });
    }

    // Stable sort: equal totals keep catalog order, first-inserted wins.
    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let ranking = rows
        .iter()
        .map(|row| RankedEntry {
            code: row.code.clone(),
            name: row.name.clone(),
            total: row.total,
        })
        .collect();

    Ok((ranking, rows))
}
