//! Reading rubric files.
//!
//! A rubric loaded from disk remembers its directory so check `file`
//! entries resolve next to it unless the caller picks another root.

use crate::rubric::schema::{RubricConfig, ValidationError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Where rubric text came from.
#[derive(Debug, Clone)]
pub enum RubricOrigin {
    Inline,
    File(PathBuf),
}

impl fmt::Display for RubricOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RubricOrigin::Inline => f.write_str("<inline>"),
            RubricOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RubricError {
    #[error("cannot read rubric {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rubric {origin} is not valid TOML: {source}")]
    Toml {
        origin: RubricOrigin,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("rubric {origin} has {} problem(s):\n{source}", .source.issues.len())]
    Invalid {
        origin: RubricOrigin,
        #[source]
        source: ValidationError,
    },
}

/// Parse and validate rubric text. Check files resolve against the
/// caller's root.
pub fn load_from_str(input: &str) -> Result<RubricConfig, RubricError> {
    parse(input, RubricOrigin::Inline)
}

/// Read, parse and validate a rubric file, recording its directory as
/// [`RubricConfig::base_dir`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RubricConfig, RubricError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| RubricError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = parse(&contents, RubricOrigin::File(path.to_path_buf()))?;
    config.base_dir = Some(match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    });
    debug!(rubric = %path.display(), checks = config.checks.len(), "loaded rubric");
    Ok(config)
}

fn parse(input: &str, origin: RubricOrigin) -> Result<RubricConfig, RubricError> {
    let config: RubricConfig = match toml_edit::de::from_str(input) {
        Ok(config) => config,
        Err(source) => return Err(RubricError::Toml { origin, source }),
    };
    match config.validate() {
        Ok(()) => Ok(config),
        Err(source) => Err(RubricError::Invalid { origin, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::schema::{Expectation, Step, ValidationIssue};
    use tempfile::TempDir;

    #[test]
    fn loads_steps_and_expectations() {
        let config = load_from_str(
            r#"
[meta]
name = "lesson"

[[checks]]
id = "area-returns-number"
file = "shapes.ts"

[[checks.select]]
kind = "class"
name = "Circle"

[[checks.select]]
kind = "method"
name = "area"

[checks.expect]
type = "return-annotation"
text = "number"

[[checks]]
id = "point-shape"
file = "shapes.ts"

[[checks.select]]
kind = "interface"
name = "Point"

[checks.expect]
type = "type-props"
props = [{ name = "x", type = "number" }, { name = "label", optional = true }]
"#,
        )
        .unwrap();

        assert_eq!(config.meta.name, "lesson");
        assert!(config.base_dir.is_none());
        assert_eq!(config.checks.len(), 2);
        assert_eq!(
            config.checks[0].select,
            vec![
                Step::Class {
                    name: "Circle".into()
                },
                Step::Method {
                    name: "area".into()
                },
            ]
        );
        match &config.checks[1].expect {
            Expectation::TypeProps { props } => {
                assert_eq!(props[0].ty.as_deref(), Some("number"));
                assert_eq!(props[1].optional, Some(true));
                assert_eq!(props[1].ty, None);
            }
            other => panic!("unexpected expectation {other:?}"),
        }
    }

    #[test]
    fn branch_steps_deserialize() {
        let config = load_from_str(
            r#"
[[checks]]
id = "else-branch"
file = "grade.ts"
select = [{ kind = "if" }, { kind = "branch", index = 2 }]
expect = { type = "exists" }

[[checks]]
id = "limit-is-integer"
file = "grade.ts"
select = [{ kind = "variable", name = "limit" }]
expect = { type = "integer" }
"#,
        )
        .unwrap();

        assert_eq!(
            config.checks[0].select,
            vec![Step::If { index: 0 }, Step::Branch { index: 2 }]
        );
        assert_eq!(config.checks[1].expect, Expectation::Integer);
    }

    #[test]
    fn file_rubric_records_its_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rubric.toml");
        fs::write(
            &path,
            "[[checks]]\nid = \"a\"\nfile = \"src/a.ts\"\nexpect = { type = \"exists\" }\n",
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.base_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn rejects_empty_rubric() {
        let err = load_from_str("[meta]\nname = \"empty\"\n").unwrap_err();
        match err {
            RubricError::Invalid { source, .. } => {
                assert!(matches!(source.issues[0], ValidationIssue::EmptyCheckList));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn rejects_duplicate_ids_and_blank_text() {
        let err = load_from_str(
            r#"
[[checks]]
id = "a"
file = "x.ts"
expect = { type = "matches", text = " " }

[[checks]]
id = "a"
file = "x.ts"
expect = { type = "exists" }
"#,
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("2 problem(s)"), "{message}");
        assert!(message.contains("expect.text"), "{message}");
        assert!(message.contains("used more than once"), "{message}");
    }

    #[test]
    fn rejects_files_outside_the_root() {
        let err = load_from_str(
            r#"
[[checks]]
id = "escape"
file = "../secret.ts"
expect = { type = "exists" }

[[checks]]
id = "absolute"
file = "/etc/passwd"
expect = { type = "exists" }
"#,
        )
        .unwrap_err();

        let RubricError::Invalid { source, .. } = err else {
            panic!("expected validation failure");
        };
        let escaping: Vec<_> = source
            .issues
            .iter()
            .filter_map(|issue| match issue {
                ValidationIssue::FileOutsideRoot { check_id, .. } => Some(check_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(escaping, vec!["escape", "absolute"]);
    }

    #[test]
    fn reports_toml_errors() {
        let err = load_from_str("[[checks]\n").unwrap_err();
        assert!(matches!(
            err,
            RubricError::Toml {
                origin: RubricOrigin::Inline,
                ..
            }
        ));
        assert!(err.to_string().contains("<inline>"));
    }

    #[test]
    fn io_error_carries_path() {
        let err = load_from_path("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
