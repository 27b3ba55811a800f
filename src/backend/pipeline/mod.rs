//! Request Pipeline
//!
//! Every mutating route runs its request through an ordered list of stages
//! before the handler sees it. A stage takes the [`RequestContext`] by value
//! and either continues with it or halts the request with a
//! [`BackendError`].
//!
//! # Ordering
//!
//! Stages run strictly as Validation -> Authentication -> Authorization,
//! each at most once. [`Pipeline::new`] refuses any other order, and an
//! authorization stage without a preceding authentication stage.
//!
//! ```text
//! Received -> Validated -> Authenticated -> Authorized -> Executed
//!     |            |              |              |
//!     |         400          401         403 / 404
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::error::BackendError;

/// Per-request context and lifecycle phase
pub mod context;

/// Pipelines for each route
pub mod catalog;

pub use catalog::PipelineCatalog;
pub use context::{Phase, RequestContext};

/// Result of running one stage
#[derive(Debug)]
pub enum Outcome {
    /// Proceed to the next stage with this context
    Continue(RequestContext),
    /// Stop the request with this error
    Halt(BackendError),
}

/// Position of a stage in the fixed ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StageKind {
    Validation,
    Authentication,
    Authorization,
}

impl StageKind {
    /// Phase a request reaches once a stage of this kind lets it through
    pub fn completes(self) -> Phase {
        match self {
            Self::Validation => Phase::Validated,
            Self::Authentication => Phase::Authenticated,
            Self::Authorization => Phase::Authorized,
        }
    }
}

/// One step of a request pipeline
#[async_trait]
pub trait Stage: Send + Sync {
    fn kind(&self) -> StageKind;

    async fn run(&self, ctx: RequestContext) -> Outcome;
}

/// Rejected pipeline composition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("{stage:?} stage cannot run after {after:?}")]
    OutOfOrder { stage: StageKind, after: StageKind },

    #[error("authorization requires an earlier authentication stage")]
    AuthorizationWithoutAuthentication,
}

/// An ordered, validated list of stages
#[derive(Clone)]
pub struct Pipeline {
    name: &'static str,
    stages: Vec<Arc<dyn Stage>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<StageKind> = self.stages.iter().map(|s| s.kind()).collect();
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("stages", &kinds)
            .finish()
    }
}

impl Pipeline {
    /// Compose a pipeline, checking the stage order
    pub fn new(name: &'static str, stages: Vec<Arc<dyn Stage>>) -> Result<Self, PipelineError> {
        let mut previous: Option<StageKind> = None;
        let mut authenticated = false;

        for stage in &stages {
            let kind = stage.kind();
            if let Some(after) = previous {
                if kind <= after {
                    return Err(PipelineError::OutOfOrder { stage: kind, after });
                }
            }
            match kind {
                StageKind::Authentication => authenticated = true,
                StageKind::Authorization if !authenticated => {
                    return Err(PipelineError::AuthorizationWithoutAuthentication);
                }
                _ => {}
            }
            previous = Some(kind);
        }

        Ok(Self { name, stages })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stage kinds in execution order
    pub fn kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|s| s.kind()).collect()
    }

    /// Run every stage in order, stopping at the first halt
    pub async fn run(&self, mut ctx: RequestContext) -> Result<RequestContext, BackendError> {
        for stage in &self.stages {
            let kind = stage.kind();
            ctx = match stage.run(ctx).await {
                Outcome::Continue(next) => next,
                Outcome::Halt(err) => {
                    tracing::warn!(
                        "{} pipeline halted at {:?}: {}",
                        self.name,
                        kind,
                        err.status_code()
                    );
                    return Err(err);
                }
            };
            ctx.advance(kind.completes());
        }
        Ok(ctx)
    }
}
