use crate::explorer::TypeProp;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RubricConfig {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub checks: Vec<CheckDefinition>,
    /// Directory of the rubric file, set when loaded from disk.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl RubricConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.checks.is_empty() {
            issues.push(ValidationIssue::EmptyCheckList);
        }

        let mut seen = HashSet::new();
        for check in &self.checks {
            if check.id.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    check_id: None,
                    field: "id",
                });
            } else if !seen.insert(check.id.as_str()) {
                issues.push(ValidationIssue::DuplicateId {
                    check_id: check.id.clone(),
                });
            }
            if check.file.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    check_id: Some(check.id.clone()),
                    field: "file",
                });
            } else if !stays_inside_root(&check.file) {
                issues.push(ValidationIssue::FileOutsideRoot {
                    check_id: check.id.clone(),
                    file: check.file.clone(),
                });
            }

            for step in &check.select {
                if step.name().is_some_and(|name| name.trim().is_empty()) {
                    issues.push(ValidationIssue::MissingField {
                        check_id: Some(check.id.clone()),
                        field: "select.name",
                    });
                }
            }

            match &check.expect {
                Expectation::Matches { text }
                | Expectation::Annotation { text }
                | Expectation::ReturnAnnotation { text } => {
                    if text.trim().is_empty() {
                        issues.push(ValidationIssue::MissingField {
                            check_id: Some(check.id.clone()),
                            field: "expect.text",
                        });
                    }
                }
                Expectation::TypeProps { props } => {
                    if props.is_empty() {
                        issues.push(ValidationIssue::MissingField {
                            check_id: Some(check.id.clone()),
                            field: "expect.props",
                        });
                    }
                    if props.iter().any(|prop| prop.name.trim().is_empty()) {
                        issues.push(ValidationIssue::MissingField {
                            check_id: Some(check.id.clone()),
                            field: "expect.props.name",
                        });
                    }
                }
                Expectation::ValueCall { callee } => {
                    if callee.trim().is_empty() {
                        issues.push(ValidationIssue::MissingField {
                            check_id: Some(check.id.clone()),
                            field: "expect.callee",
                        });
                    }
                }
                Expectation::Exists
                | Expectation::Absent
                | Expectation::ParameterCount { .. }
                | Expectation::Integer => {}
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

/// Relative, and never climbing with `..`.
fn stays_inside_root(file: &str) -> bool {
    Path::new(file)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CheckDefinition {
    pub id: String,
    pub file: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub select: Vec<Step>,
    pub expect: Expectation,
}

/// One lookup applied to the current handle.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Step {
    Variable {
        name: String,
    },
    Function {
        name: String,
        #[serde(default)]
        include_variables: bool,
    },
    Type {
        name: String,
    },
    Interface {
        name: String,
    },
    Class {
        name: String,
    },
    Method {
        name: String,
    },
    Property {
        name: String,
    },
    Parameter {
        index: usize,
    },
    /// `if` statement in scope, by position.
    If {
        #[serde(default)]
        index: usize,
    },
    /// Condition of an `if` chain; the final `else` has none.
    Condition {
        index: usize,
    },
    /// Branch statement of an `if` chain.
    Branch {
        index: usize,
    },
    Annotation,
    ReturnAnnotation,
    Body,
}

impl Step {
    pub fn name(&self) -> Option<&str> {
        match self {
            Step::Variable { name }
            | Step::Function { name, .. }
            | Step::Type { name }
            | Step::Interface { name }
            | Step::Class { name }
            | Step::Method { name }
            | Step::Property { name } => Some(name.as_str()),
            Step::Parameter { .. }
            | Step::If { .. }
            | Step::Condition { .. }
            | Step::Branch { .. }
            | Step::Annotation
            | Step::ReturnAnnotation
            | Step::Body => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Variable { name } => write!(f, "variable '{name}'"),
            Step::Function { name, .. } => write!(f, "function '{name}'"),
            Step::Type { name } => write!(f, "type '{name}'"),
            Step::Interface { name } => write!(f, "interface '{name}'"),
            Step::Class { name } => write!(f, "class '{name}'"),
            Step::Method { name } => write!(f, "method '{name}'"),
            Step::Property { name } => write!(f, "property '{name}'"),
            Step::Parameter { index } => write!(f, "parameter #{index}"),
            Step::If { index } => write!(f, "if statement #{index}"),
            Step::Condition { index } => write!(f, "condition #{index}"),
            Step::Branch { index } => write!(f, "branch #{index}"),
            Step::Annotation => write!(f, "annotation"),
            Step::ReturnAnnotation => write!(f, "return annotation"),
            Step::Body => write!(f, "body"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Expectation {
    Exists,
    Absent,
    Matches { text: String },
    Annotation { text: String },
    ReturnAnnotation { text: String },
    TypeProps { props: Vec<TypeProp> },
    ParameterCount { count: usize },
    ValueCall { callee: String },
    /// Initializer is an integer literal.
    Integer,
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    EmptyCheckList,
    MissingField {
        check_id: Option<String>,
        field: &'static str,
    },
    DuplicateId {
        check_id: String,
    },
    FileOutsideRoot {
        check_id: String,
        file: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyCheckList => write!(f, "rubric contains no checks"),
            ValidationIssue::MissingField { check_id, field } => match check_id {
                Some(id) => write!(f, "check '{id}' missing required field '{field}'"),
                None => write!(f, "check missing required field '{field}'"),
            },
            ValidationIssue::DuplicateId { check_id } => {
                write!(f, "check id '{check_id}' is used more than once")
            }
            ValidationIssue::FileOutsideRoot { check_id, file } => {
                write!(f, "check '{check_id}' file '{file}' must be relative to the rubric root")
            }
        }
    }
}
