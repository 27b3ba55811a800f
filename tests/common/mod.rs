//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - An in-process test application over the in-memory store
//! - Authentication helpers (register, login, bearer headers)
//! - Assertion macros for the JSON error shape
//! - PostgreSQL fixtures for the store tests

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use auth_helpers::*;
