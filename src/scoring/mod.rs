pub mod criteria;
pub mod engine;
pub mod error;
pub mod validation;

pub use criteria::{AnchorTables, CriteriaConfig, Criterion, CriterionKind, RawValue, WEIGHT_TOLERANCE};
pub use engine::{score, Alternative, CriterionScore, Profile, RankedEntry, ScoreRow};
pub use error::ScoreError;
pub use validation::{validate_catalog, validate_profile};
