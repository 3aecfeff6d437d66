use crate::explorer::Explorer;
use crate::rubric::schema::{CheckDefinition, Expectation, RubricConfig, Step};
use crate::ts::validate_syntax;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Result of evaluating a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum CheckOutcome {
    Passed,
    Failed { reason: String },
    /// The check could not run, e.g. its file is unreadable.
    Error { message: String },
}

impl CheckOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed)
    }

    fn failed(reason: impl Into<String>) -> Self {
        CheckOutcome::Failed {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub id: String,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Run every check of `config`, resolving files against `root`.
pub fn run_checks(config: &RubricConfig, root: &Path) -> Vec<CheckReport> {
    config
        .checks
        .iter()
        .map(|check| run_check(check, root))
        .collect()
}

fn run_check(check: &CheckDefinition, root: &Path) -> CheckReport {
    let path = root.join(&check.file);
    let mut warnings = Vec::new();

    let outcome = match fs::read_to_string(&path) {
        Ok(source) => {
            if let Err(error) = validate_syntax(&source) {
                warnings.push(format!("{} does not parse cleanly: {error}", check.file));
            }
            evaluate(&source, check)
        }
        Err(error) => CheckOutcome::Error {
            message: format!("failed to read {}: {error}", path.display()),
        },
    };

    debug!(check = %check.id, file = %path.display(), ?outcome, "evaluated check");

    CheckReport {
        id: check.id.clone(),
        file: check.file.clone(),
        description: check.description.clone(),
        outcome,
        warnings,
    }
}

/// Evaluate one check against source text.
pub fn evaluate(source: &str, check: &CheckDefinition) -> CheckOutcome {
    let absent_expected = matches!(check.expect, Expectation::Absent);

    let mut current = Explorer::new(source);
    if current.is_empty() {
        return if absent_expected {
            CheckOutcome::Passed
        } else {
            CheckOutcome::failed("source is empty")
        };
    }

    for step in &check.select {
        current = apply_step(&current, step);
        if current.is_empty() {
            return if absent_expected {
                CheckOutcome::Passed
            } else {
                CheckOutcome::failed(format!("{step} not found"))
            };
        }
    }

    expect(&current, &check.expect)
}

/// Apply one lookup step to a handle.
pub fn apply_step(current: &Explorer, step: &Step) -> Explorer {
    match step {
        Step::Variable { name } => current.find_variable(name),
        Step::Function {
            name,
            include_variables,
        } => current.find_function(name, *include_variables),
        Step::Type { name } => current.find_type(name),
        Step::Interface { name } => current.find_interface(name),
        Step::Class { name } => current.find_class(name),
        Step::Method { name } => current.find_method(name),
        Step::Property { name } => current.find_class_prop(name),
        Step::Parameter { index } => current
            .find_parameters()
            .into_iter()
            .nth(*index)
            .unwrap_or_default(),
        Step::If { index } => current.find_ifs().into_iter().nth(*index).unwrap_or_default(),
        Step::Condition { index } => current
            .find_conditions()
            .into_iter()
            .nth(*index)
            .unwrap_or_default(),
        Step::Branch { index } => current
            .find_if_bodies()
            .into_iter()
            .nth(*index)
            .unwrap_or_default(),
        Step::Annotation => current.annotation(),
        Step::ReturnAnnotation => current.return_annotation(),
        Step::Body => current.body(),
    }
}

fn expect(current: &Explorer, expectation: &Expectation) -> CheckOutcome {
    match expectation {
        Expectation::Exists => CheckOutcome::Passed,
        Expectation::Absent => CheckOutcome::failed(format!("found `{current}`")),
        Expectation::Matches { text } => {
            if current.matches(text) {
                CheckOutcome::Passed
            } else {
                CheckOutcome::failed(format!("`{current}` does not match `{text}`"))
            }
        }
        Expectation::Annotation { text } => {
            if current.has_annotation(text) {
                CheckOutcome::Passed
            } else {
                CheckOutcome::failed(format!(
                    "annotation is `{}`, expected `{text}`",
                    current.annotation()
                ))
            }
        }
        Expectation::ReturnAnnotation { text } => {
            if current.has_return_annotation(text) {
                CheckOutcome::Passed
            } else {
                CheckOutcome::failed(format!(
                    "return annotation is `{}`, expected `{text}`",
                    current.return_annotation()
                ))
            }
        }
        Expectation::TypeProps { props } => {
            let missing = props.iter().find(|prop| {
                !current.has_type_prop(&prop.name, prop.ty.as_deref(), prop.optional)
            });
            match missing {
                None => CheckOutcome::Passed,
                Some(prop) => {
                    CheckOutcome::failed(format!("member '{}' is missing or differs", prop.name))
                }
            }
        }
        Expectation::ParameterCount { count } => {
            let actual = current.find_parameters().len();
            if actual == *count {
                CheckOutcome::Passed
            } else {
                CheckOutcome::failed(format!("expected {count} parameters, found {actual}"))
            }
        }
        Expectation::ValueCall { callee } => {
            if current.value_is_call(callee) {
                CheckOutcome::Passed
            } else {
                CheckOutcome::failed(format!(
                    "value `{}` is not a call to `{callee}`",
                    current.value()
                ))
            }
        }
        Expectation::Integer => {
            if current.is_integer() {
                CheckOutcome::Passed
            } else {
                CheckOutcome::failed(format!(
                    "value `{}` is not an integer literal",
                    current.value()
                ))
            }
        }
    }
}
