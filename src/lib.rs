//! SAW (Simple Additive Weighting) scoring for academic-major recommendation.
//!
//! The scoring core is a pure function of its inputs: `scoring::score` takes
//! a student profile, the catalog of majors, and the criteria configuration,
//! and returns a ranked summary plus the per-criterion score table. The
//! `config` and `output` modules are glue for the CLI around it.

pub mod config;
pub mod output;
pub mod scoring;
