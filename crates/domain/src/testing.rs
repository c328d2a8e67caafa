//! Assertions and the reports produced by a suite run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A check to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Check a JSON path exists and optionally its value.
    JsonPath {
        /// Path expression, e.g. `$.id`.
        path: String,
        /// Expected value; `None` only checks presence.
        expected: Option<serde_json::Value>,
    },
}

impl Assertion {
    /// Status must equal `code`.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusCode {
            expected: code,
        }
    }

    /// `path` must be present in the body.
    #[must_use]
    pub fn json_present(path: impl Into<String>) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: None,
        }
    }

    /// `path` must be present and equal `value`.
    #[must_use]
    pub fn json_equals(path: impl Into<String>, value: serde_json::Value) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: Some(value),
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code {expected}"),
            Self::JsonPath {
                path,
                expected: Some(v),
            } => format!("JSON {path} equals {v}"),
            Self::JsonPath {
                path,
                expected: None,
            } => format!("JSON {path} exists"),
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// How a single suite step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Every assertion held.
    Passed,
    /// At least one assertion failed, or the exchange itself failed.
    Failed {
        /// One line per problem.
        reasons: Vec<String>,
    },
    /// Not executed because a prerequisite was missing.
    Skipped {
        /// Why the step did not run.
        reason: String,
    },
}

impl StepOutcome {
    /// Short label for reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed { .. } => "FAIL",
            Self::Skipped { .. } => "SKIP",
        }
    }

    /// Returns true for [`StepOutcome::Passed`].
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns true for [`StepOutcome::Failed`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns true for [`StepOutcome::Skipped`].
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Report for one step of the suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Step title, e.g. "Create a new user".
    pub name: String,
    /// `METHOD url` of the request that was sent, if any.
    pub request: Option<String>,
    /// Status received, if the exchange completed.
    pub status: Option<u16>,
    /// Assertion results, in evaluation order.
    pub assertions: Vec<AssertionResult>,
    /// How the step ended.
    pub outcome: StepOutcome,
    /// Wall time spent in the step.
    pub duration_ms: u64,
}

impl StepReport {
    /// Builds a report whose outcome is derived from `assertions`.
    #[must_use]
    pub fn from_assertions(
        name: impl Into<String>,
        request: impl Into<String>,
        status: u16,
        assertions: Vec<AssertionResult>,
        duration_ms: u64,
    ) -> Self {
        let reasons: Vec<String> = assertions
            .iter()
            .filter(|r| !r.passed)
            .map(|r| {
                r.error
                    .clone()
                    .unwrap_or_else(|| format!("{} failed", r.assertion.description()))
            })
            .collect();
        let outcome = if reasons.is_empty() {
            StepOutcome::Passed
        } else {
            StepOutcome::Failed { reasons }
        };

        Self {
            name: name.into(),
            request: Some(request.into()),
            status: Some(status),
            assertions,
            outcome,
            duration_ms,
        }
    }

    /// A step whose exchange could not be completed or evaluated.
    #[must_use]
    pub fn failed(
        name: impl Into<String>,
        request: Option<String>,
        status: Option<u16>,
        reason: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            request,
            status,
            assertions: Vec::new(),
            outcome: StepOutcome::Failed {
                reasons: vec![reason.into()],
            },
            duration_ms,
        }
    }

    /// A step that was never executed.
    #[must_use]
    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            request: None,
            status: None,
            assertions: Vec::new(),
            outcome: StepOutcome::Skipped {
                reason: reason.into(),
            },
            duration_ms: 0,
        }
    }
}

/// Results from running the whole suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite name.
    pub suite_name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-step reports in execution order.
    pub steps: Vec<StepReport>,
    /// Number of steps.
    pub total: usize,
    /// Steps that passed.
    pub passed: usize,
    /// Steps that failed.
    pub failed: usize,
    /// Steps that were skipped.
    pub skipped: usize,
    /// Wall time for the whole run in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Create a new report and tally the outcomes.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        started_at: DateTime<Utc>,
        steps: Vec<StepReport>,
        duration_ms: u64,
    ) -> Self {
        let total = steps.len();
        let passed = steps.iter().filter(|s| s.outcome.is_passed()).count();
        let failed = steps.iter().filter(|s| s.outcome.is_failed()).count();
        let skipped = total - passed - failed;

        Self {
            suite_name: suite_name.into(),
            started_at,
            steps,
            total,
            passed,
            failed,
            skipped,
            duration_ms,
        }
    }

    /// True only when every step ran and passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Looks a step report up by name.
    #[must_use]
    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}
