use thiserror::Error;

/// Failure modes of the scoring core.
///
/// `Validation` is recoverable by the caller correcting input; it carries
/// every violated rule so one round trip fixes them all. `Configuration`
/// means the fixed setup (weights, anchor tables, catalog) is defective.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("invalid profile: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("configuration error: {0}")]
    Configuration(String),
}
