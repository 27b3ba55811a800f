//! One pipeline per route.
//!
//! | Route | Stages |
//! |---|---|
//! | `POST /auth/login` | validation |
//! | `POST /auth/register` | validation |
//! | `POST /posts` | validation, authentication |
//! | `PUT /posts/{id}` | validation, authentication, ownership |
//! | `DELETE /posts/{id}` | validation, authentication, ownership |
//!
//! Read-only post routes have no pipeline.

use std::sync::Arc;

use super::{Pipeline, PipelineError, Stage};
use crate::backend::auth::TokenService;
use crate::backend::middleware::AuthenticateStage;
use crate::backend::posts::OwnershipStage;
use crate::backend::store::Store;
use crate::backend::validation::{rules, ValidationStage};

/// Pipelines for every route that has one
#[derive(Debug, Clone)]
pub struct PipelineCatalog {
    pub login: Pipeline,
    pub register: Pipeline,
    pub create_post: Pipeline,
    pub update_post: Pipeline,
    pub delete_post: Pipeline,
}

impl PipelineCatalog {
    pub fn new(store: Arc<dyn Store>, tokens: Arc<TokenService>) -> Result<Self, PipelineError> {
        let validate = |set: rules::RuleSet| -> Arc<dyn Stage> {
            Arc::new(ValidationStage::new(set, store.clone()))
        };
        let authenticate: Arc<dyn Stage> = Arc::new(AuthenticateStage::new(tokens));
        let ownership: Arc<dyn Stage> = Arc::new(OwnershipStage::new(store.clone()));

        Ok(Self {
            login: Pipeline::new("login", vec![validate(rules::login())])?,
            register: Pipeline::new("register", vec![validate(rules::register())])?,
            create_post: Pipeline::new(
                "create_post",
                vec![validate(rules::create_post()), authenticate.clone()],
            )?,
            update_post: Pipeline::new(
                "update_post",
                vec![
                    validate(rules::update_post()),
                    authenticate.clone(),
                    ownership.clone(),
                ],
            )?,
            delete_post: Pipeline::new(
                "delete_post",
                vec![validate(rules::delete_post()), authenticate, ownership],
            )?,
        })
    }
}
