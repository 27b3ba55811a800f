//! Declarative per-route field rules.
//!
//! A [`Rule`] names one field, where it lives, and an ordered list of
//! checks, each with the message reported when it fails. Rules never look
//! at persisted state except through [`Check::UsernameAvailable`], which
//! the validation stage resolves against the store.

use crate::backend::auth::password::MAX_PASSWORD_BYTES;
use crate::shared::FieldLocation;

/// A single constraint on a field's (trimmed) text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// At least one non-whitespace character
    NotEmpty,
    /// At least this many characters after trimming
    MinLength(usize),
    /// At most this many UTF-8 bytes after trimming
    MaxBytes(usize),
    /// Parses as an integer greater than zero
    PositiveInteger,
    /// No user with this username exists yet
    UsernameAvailable,
}

impl Check {
    /// Evaluate a check that needs no store access
    ///
    /// Returns `None` for checks the stage must resolve asynchronously.
    pub fn evaluate(self, text: &str) -> Option<bool> {
        match self {
            Self::NotEmpty => Some(!text.is_empty()),
            Self::MinLength(min) => Some(text.chars().count() >= min),
            Self::MaxBytes(max) => Some(text.len() <= max),
            Self::PositiveInteger => Some(parse_positive_id(text).is_some()),
            Self::UsernameAvailable => None,
        }
    }
}

/// Parse a path identifier that must be a positive integer
pub fn parse_positive_id(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Constraints on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub field: &'static str,
    pub location: FieldLocation,
    /// Absent skips every check; `null` is still checked
    pub optional: bool,
    pub checks: Vec<(Check, &'static str)>,
}

impl Rule {
    /// Rule on a JSON body field, trimmed before the handler sees it
    pub fn body(field: &'static str) -> Self {
        Self {
            field,
            location: FieldLocation::Body,
            optional: false,
            checks: Vec::new(),
        }
    }

    /// Rule on a path parameter
    pub fn param(field: &'static str) -> Self {
        Self {
            field,
            location: FieldLocation::Params,
            optional: false,
            checks: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn not_empty(self, message: &'static str) -> Self {
        self.check(Check::NotEmpty, message)
    }

    pub fn min_length(self, min: usize, message: &'static str) -> Self {
        self.check(Check::MinLength(min), message)
    }

    pub fn max_bytes(self, max: usize, message: &'static str) -> Self {
        self.check(Check::MaxBytes(max), message)
    }

    pub fn positive_integer(self, message: &'static str) -> Self {
        self.check(Check::PositiveInteger, message)
    }

    pub fn username_available(self, message: &'static str) -> Self {
        self.check(Check::UsernameAvailable, message)
    }

    fn check(mut self, check: Check, message: &'static str) -> Self {
        self.checks.push((check, message));
        self
    }
}

/// Ordered rules for one route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Whether any rule reads the JSON body
    pub fn reads_body(&self) -> bool {
        self.rules.iter().any(|r| r.location == FieldLocation::Body)
    }
}

const PASSWORD_TOO_LONG: &str = "Password must be at most 72 bytes long";

pub fn login() -> RuleSet {
    RuleSet {
        name: "login",
        rules: vec![
            Rule::body("username").not_empty("Username is required"),
            Rule::body("password")
                .not_empty("Password is required")
                .max_bytes(MAX_PASSWORD_BYTES, PASSWORD_TOO_LONG),
        ],
    }
}

pub fn register() -> RuleSet {
    RuleSet {
        name: "register",
        rules: vec![
            Rule::body("username")
                .not_empty("Username is required")
                .min_length(3, "Username must be at least 3 characters long")
                .username_available("Username already taken"),
            Rule::body("password")
                .not_empty("Password is required")
                .min_length(6, "Password must be at least 6 characters long")
                .max_bytes(MAX_PASSWORD_BYTES, PASSWORD_TOO_LONG),
        ],
    }
}

pub fn create_post() -> RuleSet {
    RuleSet {
        name: "create_post",
        rules: vec![
            Rule::body("title").not_empty("Title is required"),
            Rule::body("content").not_empty("Content is required"),
        ],
    }
}

pub fn update_post() -> RuleSet {
    RuleSet {
        name: "update_post",
        rules: vec![
            Rule::param("id").positive_integer("Invalid post ID"),
            Rule::body("title")
                .optional()
                .not_empty("Title cannot be empty"),
            Rule::body("content")
                .optional()
                .not_empty("Content cannot be empty"),
        ],
    }
}

pub fn delete_post() -> RuleSet {
    RuleSet {
        name: "delete_post",
        rules: vec![Rule::param("id").positive_integer("Invalid post ID")],
    }
}
