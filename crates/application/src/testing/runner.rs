//! Assertion runner.
//!
//! Evaluates [`Assertion`]s against a captured response.

use gorest_check_domain::{Assertion, AssertionResult, ResponseSpec};

const PREVIEW_CHARS: usize = 100;

/// Runs assertions against responses. Holds no per-response state, so the
/// same runner can evaluate any number of responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssertionRunner;

impl AssertionRunner {
    /// Create a new runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run every assertion in order against `response`.
    #[must_use]
    pub fn run(&self, assertions: &[Assertion], response: &ResponseSpec) -> Vec<AssertionResult> {
        assertions
            .iter()
            .map(|assertion| self.run_assertion(assertion, response))
            .collect()
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
    ) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => {
                Self::check_status_code(assertion, response, *expected)
            }
            Assertion::JsonPath { path, expected } => {
                Self::check_json_path(assertion, response, path, expected.as_ref())
            }
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: u16,
    ) -> AssertionResult {
        let actual = response.status;
        if actual == expected {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!("Expected status {expected}, got {actual}"),
            )
        }
    }

    fn check_json_path(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        expected: Option<&serde_json::Value>,
    ) -> AssertionResult {
        let json = match serde_json::from_str::<serde_json::Value>(&response.body) {
            Ok(json) => json,
            Err(e) => {
                return AssertionResult::fail_with_value(
                    assertion.clone(),
                    response.body_preview(PREVIEW_CHARS),
                    format!("Failed to parse body as JSON: {e}"),
                );
            }
        };

        match query_json_path(&json, path) {
            Ok(Some(value)) => match expected {
                Some(expected) if value != expected => AssertionResult::fail_with_value(
                    assertion.clone(),
                    value.to_string(),
                    format!("JSON path '{path}' value mismatch: expected {expected}, got {value}"),
                ),
                _ => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
            },
            Ok(None) => AssertionResult::fail(
                assertion.clone(),
                format!("JSON path '{path}' not found"),
            ),
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                format!("Invalid JSON path '{path}': {e}"),
            ),
        }
    }
}

/// Resolve a JSONPath-like expression.
/// Supports `$`, `$.field`, `$.field.nested`, `$.array[0]`.
fn query_json_path<'a>(
    json: &'a serde_json::Value,
    path: &str,
) -> Result<Option<&'a serde_json::Value>, String> {
    let Some(rest) = path.trim().strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };

    let mut current = json;
    for segment in rest.split('.').filter(|s| !s.is_empty()) {
        let (name, brackets) = match segment.find('[') {
            Some(bracket) => segment.split_at(bracket),
            None => (segment, ""),
        };
        let indexes = parse_indexes(brackets)?;

        if !name.is_empty() {
            match current.get(name) {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }

        for index in indexes {
            match current.get(index) {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }
    }

    Ok(Some(current))
}

/// Parse a run of `[n]` suffixes.
fn parse_indexes(mut brackets: &str) -> Result<Vec<usize>, String> {
    let mut indexes = Vec::new();
    while let Some(stripped) = brackets.strip_prefix('[') {
        let Some(end) = stripped.find(']') else {
            return Err(format!("Unclosed bracket in '{brackets}'"));
        };
        let raw = &stripped[..end];
        let index = raw
            .parse()
            .map_err(|_| format!("Invalid array index: {raw}"))?;
        indexes.push(index);
        brackets = &stripped[end + 1..];
    }

    if brackets.is_empty() {
        Ok(indexes)
    } else {
        Err(format!("Unexpected characters after index: '{brackets}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> ResponseSpec {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponseSpec::new(
            status,
            headers,
            body.as_bytes().to_vec(),
            Duration::from_millis(20),
        )
    }

    #[test]
    fn test_status_code_exact() {
        let runner = AssertionRunner::new();
        let response = response(200, "[]");

        assert!(runner.run_assertion(&Assertion::status(200), &response).passed);

        let result = runner.run_assertion(&Assertion::status(201), &response);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("200"));
        assert_eq!(result.error.as_deref(), Some("Expected status 201, got 200"));
    }

    #[test]
    fn test_same_response_evaluates_identically_twice() {
        let runner = AssertionRunner::new();
        let response = response(200, "[]");
        let assertions = [Assertion::status(200)];

        let first = runner.run(&assertions, &response);
        let second = runner.run(&assertions, &response);
        assert!(first[0].passed);
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_path_presence_and_value() {
        let runner = AssertionRunner::new();
        let response = response(201, r#"{"id": 42, "name": "irfan"}"#);

        assert!(runner.run_assertion(&Assertion::json_present("$.id"), &response).passed);
        assert!(
            runner
                .run_assertion(&Assertion::json_equals("$.id", json!(42)), &response)
                .passed
        );

        let result = runner.run_assertion(&Assertion::json_equals("$.id", json!(7)), &response);
        assert!(!result.passed);
        assert_eq!(
            result.error.as_deref(),
            Some("JSON path '$.id' value mismatch: expected 7, got 42")
        );

        let result = runner.run_assertion(&Assertion::json_present("$.email"), &response);
        assert_eq!(result.error.as_deref(), Some("JSON path '$.email' not found"));
    }

    #[test]
    fn test_json_path_nested_and_indexed() {
        let runner = AssertionRunner::new();
        let response = response(200, r#"{"data": [{"id": 1}, {"id": 2, "tags": [[5]]}]}"#);

        assert!(
            runner
                .run_assertion(&Assertion::json_equals("$.data[1].id", json!(2)), &response)
                .passed
        );
        let nested = Assertion::json_equals("$.data[1].tags[0][0]", json!(5));
        assert!(runner.run_assertion(&nested, &response).passed);
        assert!(
            !runner
                .run_assertion(&Assertion::json_present("$.data[5]"), &response)
                .passed
        );
    }

    #[test]
    fn test_json_path_errors() {
        let runner = AssertionRunner::new();
        let response = response(200, r#"{"id": 1}"#);

        let result = runner.run_assertion(&Assertion::json_present("id"), &response);
        assert!(result.error.is_some_and(|e| e.contains("must start with '$'")));

        let result = runner.run_assertion(&Assertion::json_present("$.items[x]"), &response);
        assert!(result.error.is_some_and(|e| e.contains("Invalid array index")));
    }

    #[test]
    fn test_json_path_on_empty_body() {
        let runner = AssertionRunner::new();
        let response = response(204, "");

        let result = runner.run_assertion(&Assertion::json_present("$.id"), &response);
        assert!(!result.passed);
        assert!(result.error.is_some_and(|e| e.starts_with("Failed to parse body as JSON")));
    }
}
