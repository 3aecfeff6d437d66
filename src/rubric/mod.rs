//! Rubric files: named structural checks run against TypeScript sources.

pub mod loader;
pub mod runner;
pub mod schema;

pub use loader::{load_from_path, load_from_str, RubricError, RubricOrigin};
pub use runner::{apply_step, evaluate, run_checks, CheckOutcome, CheckReport};
pub use schema::{
    CheckDefinition, Expectation, Metadata, RubricConfig, Step, ValidationError, ValidationIssue,
};
