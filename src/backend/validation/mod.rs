//! Input Validation Stage
//!
//! Checks the raw request against a route's [`RuleSet`] before anything
//! else happens. Every failing check is collected; the request then stops
//! with one aggregated 400 listing them all.
//!
//! Accepted string fields (passwords included) are trimmed in the
//! payload, and a valid `:id`
//! path parameter is parsed into [`RequestContext::post_id`].
//!
//! # Username Availability
//!
//! Registration asks the store whether the username exists as part of
//! validation. A taken username wins over any other violation and halts
//! with 409. This check is advisory: two registrations can both pass it,
//! and the store's unique constraint decides which one lands.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::error::BackendError;
use crate::backend::pipeline::{Outcome, RequestContext, Stage, StageKind};
use crate::backend::store::Store;
use crate::shared::{FieldLocation, FieldViolation};

/// Declarative rules for each route
pub mod rules;

pub use rules::{Check, Rule, RuleSet};

/// Pipeline stage enforcing a [`RuleSet`]
pub struct ValidationStage {
    rules: RuleSet,
    store: Arc<dyn Store>,
}

impl ValidationStage {
    pub fn new(rules: RuleSet, store: Arc<dyn Store>) -> Self {
        Self { rules, store }
    }

    /// Collect violations, trimming accepted body fields in place
    ///
    /// Returns `Err` only for a store failure during an availability check.
    async fn check(&self, ctx: &mut RequestContext) -> Result<Report, BackendError> {
        let mut report = Report::default();

        let body_malformed = self.rules.reads_body() && ctx.body().is_none();
        if body_malformed {
            report.violations.push(FieldViolation::body(
                "body",
                "Request body must be a JSON object",
            ));
        }

        for rule in &self.rules.rules {
            // Field checks on a malformed body would only repeat the above.
            if body_malformed && rule.location == FieldLocation::Body {
                continue;
            }

            let raw = match rule.location {
                FieldLocation::Body => ctx.body().and_then(|b| b.get(rule.field)).cloned(),
                FieldLocation::Params => ctx.path_id.clone().map(Value::String),
            };

            if rule.optional && raw.is_none() {
                continue;
            }

            // Non-string values are checked as if empty.
            let text = raw
                .as_ref()
                .and_then(Value::as_str)
                .map(str::trim)
                .unwrap_or("")
                .to_string();

            let mut field_ok = true;
            for (check, message) in &rule.checks {
                let passed = match check.evaluate(&text) {
                    Some(passed) => passed,
                    None => self.username_available(&text).await?,
                };
                if !passed {
                    field_ok = false;
                    if *check == Check::UsernameAvailable {
                        report.username_taken = true;
                    }
                    report.violations.push(FieldViolation {
                        field: rule.field.to_string(),
                        location: rule.location,
                        message: message.to_string(),
                    });
                }
            }

            if !field_ok {
                continue;
            }
            match rule.location {
                FieldLocation::Params => {
                    ctx.post_id = rules::parse_positive_id(&text);
                }
                FieldLocation::Body if raw.as_ref().is_some_and(Value::is_string) => {
                    if let Some(body) = ctx.payload.as_object_mut() {
                        body.insert(rule.field.to_string(), Value::String(text));
                    }
                }
                FieldLocation::Body => {}
            }
        }

        Ok(report)
    }

    async fn username_available(&self, username: &str) -> Result<bool, BackendError> {
        // Nothing to look up; the emptiness rule reports this field.
        if username.is_empty() {
            return Ok(true);
        }
        let existing = self.store.find_user_by_username(username).await?;
        Ok(existing.is_none())
    }
}

#[derive(Debug, Default)]
struct Report {
    violations: Vec<FieldViolation>,
    username_taken: bool,
}

#[async_trait]
impl Stage for ValidationStage {
    fn kind(&self) -> StageKind {
        StageKind::Validation
    }

    async fn run(&self, mut ctx: RequestContext) -> Outcome {
        let report = match self.check(&mut ctx).await {
            Ok(report) => report,
            Err(err) => return Outcome::Halt(err),
        };

        if report.username_taken {
            tracing::warn!("{} rejected: username already exists", self.rules.name);
            return Outcome::Halt(BackendError::conflict("Username already exists"));
        }
        if !report.violations.is_empty() {
            tracing::warn!(
                "{} rejected with {} violation(s)",
                self.rules.name,
                report.violations.len()
            );
            return Outcome::Halt(BackendError::Validation(report.violations));
        }

        Outcome::Continue(ctx)
    }
}
