//! Sequential execution of the suite steps.

use std::sync::Arc;
use std::time::Instant;

use gorest_check_domain::{
    Assertion, DomainResult, ErrorResponse, RequestSpec, ResponseSpec, StepOutcome, StepReport,
    SuiteReport,
};
use tracing::{debug, info, instrument, warn};

use super::{CreatedUser, SuiteConfig, SuiteContext, SuiteStep, UserFixtures};
use crate::error::ApplicationResult;
use crate::execute_request::ExecuteRequest;
use crate::ports::{Clock, HttpClient};
use crate::testing::AssertionRunner;
use crate::users_api::UsersApi;

/// Name stamped on every [`SuiteReport`].
pub const SUITE_NAME: &str = "API Automation - GoRest";

const SKIP_NO_USER: &str = "prerequisite failed: no user was created";
const LOG_BODY_CHARS: usize = 500;
const FAILURE_BODY_CHARS: usize = 200;

/// A request ready to send and the checks its response must satisfy.
struct PlannedStep {
    request: RequestSpec,
    assertions: Vec<Assertion>,
}

/// Runs [`SuiteStep::ALL`] in order against one user collection.
pub struct UserSuite<C: HttpClient> {
    executor: ExecuteRequest<C>,
    api: UsersApi,
    fixtures: UserFixtures,
    runner: AssertionRunner,
    clock: Arc<dyn Clock>,
}

impl<C: HttpClient> UserSuite<C> {
    /// Creates the suite.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is unusable.
    pub fn new(
        client: Arc<C>,
        config: &SuiteConfig,
        clock: Arc<dyn Clock>,
    ) -> ApplicationResult<Self> {
        if !config.has_token() {
            warn!("no bearer token configured; authenticated requests will be rejected");
        }

        let api = UsersApi::new(&config.base_url, config.token.as_deref())?
            .with_timeout_ms(config.timeout_ms);

        Ok(Self {
            executor: ExecuteRequest::new(client),
            api,
            fixtures: UserFixtures::for_run(config.email.as_deref()),
            runner: AssertionRunner::new(),
            clock,
        })
    }

    /// Runs every step with a fresh context.
    pub async fn run(&self) -> SuiteReport {
        let mut ctx = SuiteContext::new();
        self.run_with_context(&mut ctx).await
    }

    /// Runs every step in order, threading `ctx` through them. A failing step
    /// never stops the run; steps whose prerequisite is missing are skipped.
    pub async fn run_with_context(&self, ctx: &mut SuiteContext) -> SuiteReport {
        let started_at = self.clock.now();
        let start = Instant::now();
        info!(base_url = self.api.collection_url(), "starting suite");

        let mut steps = Vec::with_capacity(SuiteStep::ALL.len());
        for step in SuiteStep::ALL {
            steps.push(self.run_step(step, ctx).await);
        }

        let report = SuiteReport::new(SUITE_NAME, started_at, steps, elapsed_ms(start));
        info!(
            passed = report.passed,
            failed = report.failed,
            skipped = report.skipped,
            duration_ms = report.duration_ms,
            "suite finished"
        );
        report
    }

    /// Runs a single step.
    #[instrument(skip_all, fields(step = step.title()))]
    pub async fn run_step(&self, step: SuiteStep, ctx: &mut SuiteContext) -> StepReport {
        let start = Instant::now();

        let planned = match self.plan(step, ctx) {
            Ok(Some(planned)) => planned,
            Ok(None) => {
                warn!(reason = SKIP_NO_USER, "step skipped");
                return StepReport::skipped(step.title(), SKIP_NO_USER);
            }
            Err(e) => {
                warn!(error = %e, "could not build request");
                return StepReport::failed(
                    step.title(),
                    None,
                    None,
                    e.to_string(),
                    elapsed_ms(start),
                );
            }
        };

        let label = format!("{} {}", planned.request.method, planned.request.url);
        let outcome = match self.executor.execute_classified(&planned.request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "request failed");
                return StepReport::failed(
                    step.title(),
                    Some(label),
                    None,
                    e.to_string(),
                    elapsed_ms(start),
                );
            }
        };

        let report = match (step.expects_error_response(), outcome) {
            (false, Ok(response)) => {
                let report = self.evaluate(step, &label, &response, &planned.assertions, start);
                if step == SuiteStep::CreateUser && report.outcome.is_passed() {
                    Self::record_created_user(step, report, &response, ctx, start)
                } else {
                    report
                }
            }
            (true, Err(ErrorResponse { response, .. })) => {
                self.evaluate(step, &label, &response, &planned.assertions, start)
            }
            (false, Err(error)) => {
                log_body(&error.response);
                StepReport::failed(
                    step.title(),
                    Some(label),
                    Some(error.status),
                    format!("{error}: {}", error.response.body_preview(FAILURE_BODY_CHARS)),
                    elapsed_ms(start),
                )
            }
            (true, Ok(response)) => {
                log_body(&response);
                StepReport::failed(
                    step.title(),
                    Some(label),
                    Some(response.status),
                    format!(
                        "expected an error response, request succeeded with status {}",
                        response.status
                    ),
                    elapsed_ms(start),
                )
            }
        };

        match &report.outcome {
            StepOutcome::Failed { reasons } => {
                warn!(status = report.status, reasons = ?reasons, "step failed");
            }
            outcome => info!(status = report.status, outcome = outcome.label(), "step finished"),
        }
        report
    }

    /// Builds the request and assertions for `step`. `Ok(None)` means the
    /// step needs a created user and there is none.
    fn plan(&self, step: SuiteStep, ctx: &SuiteContext) -> DomainResult<Option<PlannedStep>> {
        let planned = match (step, ctx.created_user()) {
            (SuiteStep::ListUsers, _) => PlannedStep {
                request: self.api.list(),
                assertions: vec![Assertion::status(200)],
            },
            (SuiteStep::CreateUser, _) => PlannedStep {
                request: self.api.create(&self.fixtures.new_user)?,
                assertions: vec![Assertion::status(201), Assertion::json_present("$.id")],
            },
            (SuiteStep::GetUser, Some(user)) => PlannedStep {
                request: self.api.get(user.id),
                assertions: vec![
                    Assertion::status(200),
                    Assertion::json_equals("$.id", user.raw_id.clone()),
                ],
            },
            (SuiteStep::UpdateUser, Some(user)) => PlannedStep {
                request: self.api.update(user.id, &self.fixtures.update)?,
                assertions: vec![Assertion::status(200)],
            },
            (SuiteStep::DeleteUser, Some(user)) => PlannedStep {
                request: self.api.delete(user.id),
                assertions: vec![Assertion::status(204)],
            },
            (SuiteStep::GetMissingUser, _) => PlannedStep {
                request: self.api.get(self.fixtures.missing_user_id),
                assertions: vec![Assertion::status(404)],
            },
            (step, None) => {
                debug_assert!(step.requires_created_user());
                return Ok(None);
            }
        };

        Ok(Some(planned))
    }

    fn evaluate(
        &self,
        step: SuiteStep,
        label: &str,
        response: &ResponseSpec,
        assertions: &[Assertion],
        start: Instant,
    ) -> StepReport {
        log_body(response);
        let results = self.runner.run(assertions, response);
        StepReport::from_assertions(
            step.title(),
            label,
            response.status,
            results,
            elapsed_ms(start),
        )
    }

    /// Stores the id from a passed create response. An id that is present but
    /// not a non-negative integer turns the step into a failure.
    fn record_created_user(
        step: SuiteStep,
        report: StepReport,
        response: &ResponseSpec,
        ctx: &mut SuiteContext,
        start: Instant,
    ) -> StepReport {
        match response.json_field("id").and_then(CreatedUser::from_json) {
            Some(user) => {
                info!(user_id = %user.id, "recorded created user");
                ctx.record_created_user(user);
                report
            }
            None => StepReport::failed(
                step.title(),
                report.request,
                report.status,
                "response id is not a valid user id",
                elapsed_ms(start),
            ),
        }
    }
}

fn log_body(response: &ResponseSpec) {
    debug!(
        status = response.status,
        body = %response.body_preview(LOG_BODY_CHARS),
        "response body"
    );
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::{HttpClientError, HttpFuture};
    use chrono::{DateTime, TimeZone, Utc};
    use gorest_check_domain::UserId;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    const BASE: &str = "https://gorest.test/public/v2/users/";

    /// Answers by `METHOD url`; unscripted routes get a 404.
    #[derive(Default)]
    struct ScriptedHttpClient {
        routes: HashMap<String, Result<(u16, String), HttpClientError>>,
        sent: Mutex<Vec<String>>,
    }

    impl ScriptedHttpClient {
        fn on(mut self, method: &str, path: &str, status: u16, body: &str) -> Self {
            self.routes.insert(format!("{method} {BASE}{path}"), Ok((status, body.to_string())));
            self
        }

        fn fail(mut self, method: &str, path: &str, error: HttpClientError) -> Self {
            self.routes.insert(format!("{method} {BASE}{path}"), Err(error));
            self
        }

        /// The happy path for a user with id 7.
        fn happy() -> Self {
            Self::default()
                .on("GET", "", 200, r#"[{"id": 1}]"#)
                .on("POST", "", 201, r#"{"id": 7, "name": "irfan"}"#)
                .on("GET", "7", 200, r#"{"id": 7, "name": "irfan"}"#)
                .on("PUT", "7", 200, r#"{"id": 7, "name": "Irfan"}"#)
                .on("DELETE", "7", 204, "")
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
            let key = format!("{} {}", request.method, request.url);
            self.sent.lock().unwrap().push(key.clone());
            let result = match self.routes.get(&key) {
                Some(Ok((status, body))) => Ok(ResponseSpec::new(
                    *status,
                    HashMap::new(),
                    body.clone().into_bytes(),
                    Duration::from_millis(3),
                )),
                Some(Err(e)) => Err(e.clone()),
                None => Ok(ResponseSpec::new(
                    404,
                    HashMap::new(),
                    br#"{"message": "Resource not found"}"#.to_vec(),
                    Duration::from_millis(3),
                )),
            };
            Box::pin(async move { result })
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn build_suite(client: &Arc<ScriptedHttpClient>) -> UserSuite<ScriptedHttpClient> {
        let config = SuiteConfig::new(BASE)
            .with_token("token")
            .with_email("irfan@example.com");
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()));
        UserSuite::new(Arc::clone(client), &config, clock).unwrap()
    }

    fn outcome<'a>(report: &'a SuiteReport, step: SuiteStep) -> &'a StepOutcome {
        &report.step(step.title()).unwrap().outcome
    }

    #[tokio::test]
    async fn test_full_run_passes() {
        let client = Arc::new(ScriptedHttpClient::happy());
        let mut ctx = SuiteContext::new();

        let report = build_suite(&client).run_with_context(&mut ctx).await;

        assert!(report.all_passed(), "{report:#?}");
        assert_eq!(report.total, 6);
        assert_eq!(report.suite_name, SUITE_NAME);
        assert_eq!(report.started_at, Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap());
        assert_eq!(ctx.created_user_id(), Some(UserId(7)));
        assert_eq!(
            client.sent(),
            vec![
                format!("GET {BASE}"),
                format!("POST {BASE}"),
                format!("GET {BASE}7"),
                format!("PUT {BASE}7"),
                format!("DELETE {BASE}7"),
                format!("GET {BASE}9999999"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_fails_on_non_200() {
        let client = Arc::new(ScriptedHttpClient::default().on("GET", "", 500, "oops"));
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();

        let report = suite.run_step(SuiteStep::ListUsers, &mut ctx).await;
        assert!(report.outcome.is_failed());
        assert_eq!(report.status, Some(500));
    }

    #[tokio::test]
    async fn test_list_step_is_repeatable() {
        let client = Arc::new(ScriptedHttpClient::happy());
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();

        let first = suite.run_step(SuiteStep::ListUsers, &mut ctx).await;
        let second = suite.run_step(SuiteStep::ListUsers, &mut ctx).await;
        assert!(first.outcome.is_passed());
        assert!(second.outcome.is_passed());
        assert_eq!(ctx, SuiteContext::new());
    }

    #[tokio::test]
    async fn test_create_records_id_for_later_steps() {
        let client = Arc::new(
            ScriptedHttpClient::default()
                .on("POST", "", 201, r#"{"id": 42}"#)
                .on("GET", "42", 200, r#"{"id": 42}"#),
        );
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();

        let create = suite.run_step(SuiteStep::CreateUser, &mut ctx).await;
        assert!(create.outcome.is_passed());
        assert_eq!(ctx.created_user_id(), Some(UserId(42)));

        let get = suite.run_step(SuiteStep::GetUser, &mut ctx).await;
        assert!(get.outcome.is_passed());
        assert!(get.request.unwrap().ends_with("/42"));
    }

    #[tokio::test]
    async fn test_get_fails_on_id_mismatch() {
        let client = Arc::new(ScriptedHttpClient::default().on("GET", "7", 200, r#"{"id": 8}"#));
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();
        ctx.record_created_user(CreatedUser::new(UserId(7)));

        let report = suite.run_step(SuiteStep::GetUser, &mut ctx).await;
        assert_eq!(
            report.outcome,
            StepOutcome::Failed {
                reasons: vec!["JSON path '$.id' value mismatch: expected 7, got 8".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_create_with_wrong_status_skips_dependents() {
        let client = Arc::new(ScriptedHttpClient::happy().on("POST", "", 200, r#"{"id": 7}"#));
        let mut ctx = SuiteContext::new();

        let report = build_suite(&client).run_with_context(&mut ctx).await;

        assert!(outcome(&report, SuiteStep::CreateUser).is_failed());
        assert_eq!(ctx.created_user_id(), None);
        for step in [SuiteStep::GetUser, SuiteStep::UpdateUser, SuiteStep::DeleteUser] {
            assert_eq!(
                outcome(&report, step),
                &StepOutcome::Skipped {
                    reason: "prerequisite failed: no user was created".to_string()
                }
            );
        }
        assert!(outcome(&report, SuiteStep::GetMissingUser).is_passed());
        assert_eq!((report.passed, report.failed, report.skipped), (2, 1, 3));
        assert!(!client.sent().iter().any(|r| r.contains(&format!("{BASE}7"))));
    }

    #[tokio::test]
    async fn test_create_without_id_fails() {
        let body = r#"{"name": "irfan"}"#;
        let client = Arc::new(ScriptedHttpClient::default().on("POST", "", 201, body));
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();

        let report = suite.run_step(SuiteStep::CreateUser, &mut ctx).await;
        assert!(report.outcome.is_failed());
        assert_eq!(ctx.created_user_id(), None);
    }

    #[tokio::test]
    async fn test_create_with_unusable_id_fails() {
        let client = Arc::new(ScriptedHttpClient::default().on("POST", "", 201, r#"{"id": null}"#));
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();

        let report = suite.run_step(SuiteStep::CreateUser, &mut ctx).await;
        assert_eq!(
            report.outcome,
            StepOutcome::Failed {
                reasons: vec!["response id is not a valid user id".to_string()]
            }
        );
        assert_eq!(ctx.created_user_id(), None);
    }

    #[tokio::test]
    async fn test_create_conflict_reports_body() {
        let client = Arc::new(ScriptedHttpClient::default().on(
            "POST",
            "",
            422,
            r#"[{"field":"email","message":"has already been taken"}]"#,
        ));
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();

        let report = suite.run_step(SuiteStep::CreateUser, &mut ctx).await;
        let StepOutcome::Failed { reasons } = report.outcome else {
            panic!("expected failure");
        };
        assert!(reasons[0].starts_with("request failed with status 422"));
        assert!(reasons[0].contains("has already been taken"));
    }

    #[tokio::test]
    async fn test_delete_expects_204() {
        for (status, passes) in [(204, true), (200, false), (404, false)] {
            let client = Arc::new(ScriptedHttpClient::default().on("DELETE", "7", status, ""));
            let suite = build_suite(&client);
            let mut ctx = SuiteContext::new();
            ctx.record_created_user(CreatedUser::new(UserId(7)));

            let report = suite.run_step(SuiteStep::DeleteUser, &mut ctx).await;
            assert_eq!(report.outcome.is_passed(), passes, "status {status}");
        }
    }

    #[tokio::test]
    async fn test_missing_user_not_found_passes() {
        let client = Arc::new(ScriptedHttpClient::default());
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();

        let report = suite.run_step(SuiteStep::GetMissingUser, &mut ctx).await;
        assert!(report.outcome.is_passed());
        assert_eq!(report.status, Some(404));
    }

    #[tokio::test]
    async fn test_missing_user_found_fails() {
        let body = r#"{"id": 9999999}"#;
        let client = Arc::new(ScriptedHttpClient::default().on("GET", "9999999", 200, body));
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();

        let report = suite.run_step(SuiteStep::GetMissingUser, &mut ctx).await;
        assert_eq!(
            report.outcome,
            StepOutcome::Failed {
                reasons: vec![
                    "expected an error response, request succeeded with status 200".to_string()
                ]
            }
        );
    }

    #[tokio::test]
    async fn test_string_id_round_trips_to_get() {
        let client = Arc::new(
            ScriptedHttpClient::default()
                .on("POST", "", 201, r#"{"id": "7"}"#)
                .on("GET", "7", 200, r#"{"id": "7"}"#),
        );
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();

        let create = suite.run_step(SuiteStep::CreateUser, &mut ctx).await;
        assert!(create.outcome.is_passed());
        assert_eq!(ctx.created_user_id(), Some(UserId(7)));

        let get = suite.run_step(SuiteStep::GetUser, &mut ctx).await;
        assert_eq!(get.outcome, StepOutcome::Passed);
        assert_eq!(get.request.as_deref(), Some("GET https://gorest.test/public/v2/users/7"));
    }

    #[tokio::test]
    async fn test_missing_user_with_other_error_status_fails() {
        let client = Arc::new(ScriptedHttpClient::default().on("GET", "9999999", 401, "{}"));
        let suite = build_suite(&client);
        let mut ctx = SuiteContext::new();

        let report = suite.run_step(SuiteStep::GetMissingUser, &mut ctx).await;
        assert!(report.outcome.is_failed());
        assert_eq!(report.status, Some(401));
    }

    #[tokio::test]
    async fn test_transport_error_fails_step_and_run_continues() {
        let client = Arc::new(ScriptedHttpClient::happy().fail(
            "GET",
            "",
            HttpClientError::ConnectionFailed("reset by peer".to_string()),
        ));

        let report = build_suite(&client).run().await;

        assert_eq!(
            outcome(&report, SuiteStep::ListUsers),
            &StepOutcome::Failed {
                reasons: vec!["connection failed: reset by peer".to_string()]
            }
        );
        assert!(outcome(&report, SuiteStep::CreateUser).is_passed());
        assert!(outcome(&report, SuiteStep::DeleteUser).is_passed());
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let client = Arc::new(ScriptedHttpClient::default());
        let clock = Arc::new(FixedClock(Utc::now()));
        let result = UserSuite::new(client, &SuiteConfig::new("gorest"), clock);
        assert!(result.is_err());
    }
}
