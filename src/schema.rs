//! Reference API schema built from route annotations.
//!
//! Each documented handler becomes one [`Api`] record. The keys understood
//! here, and the payload each one expects, are:
//!
//! | key | payload | repeatable |
//! |---|---|---|
//! | `route` | `"METHOD", "/path"` | yes |
//! | `auth` | quoted role names, stored with their quotes | yes |
//! | `middlewareBefore` / `middlewareAfter` | quoted middleware names | yes |
//! | `desc` | free text, optionally quoted | no |
//! | `param` | `"name", type` | yes |
//! | `payload` / `?payload` | `"name", type` | yes |
//! | `query` / `?query` | `"name", type` | yes |
//! | `response` | status codes | yes |
//! | `version` | `"1.2.0"` | no |
//!
//! Keys are case-insensitive and unknown keys are ignored.

use crate::error::{Error, Result};
use crate::mapper::{Record, RecordMapper};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// "GET", "/users"
static ROUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^['"](.+)['"],\s*['"](.+)['"]$"#).unwrap());

// "name", type
static PAIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^['"](.+)['"],\s*(.+)$"#).unwrap());

static QUOTED_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"['"](.*?)['"]"#).unwrap());

static DIGITS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^("|'|)[0-9a-zA-Z.]+("|'|)$"#).unwrap());

/// Mapper producing one [`Api`] per annotated handler.
pub type ApiMapper = RecordMapper<Api>;

/// One documented API handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Api {
    pub controller: String,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorization: Vec<String>,
    #[serde(rename = "middlewares", default, skip_serializing_if = "Middleware::is_empty")]
    pub middleware: Middleware,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response: Vec<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Validate::is_empty")]
    pub validate: Validate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub method: String,
    pub route: String,
}

/// Middleware names in execution order around the handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Middleware {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<String>,
}

impl Middleware {
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// Input validation rules for path parameters, body fields and query fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validate {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payload: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<Field>,
}

impl Validate {
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.payload.is_empty() && self.queries.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

/// A body or query field. Only `?payload` and `?query` make it nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

/// Annotation keys understood by [`Api`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKey {
    Route,
    Auth,
    MiddlewareBefore,
    MiddlewareAfter,
    Desc,
    Param,
    Payload { nullable: bool },
    Query { nullable: bool },
    Response,
    Version,
}

impl AnnotationKey {
    /// Looks up a key, ignoring case. Returns `None` for unknown keys.
    pub fn parse(key: &str) -> Option<Self> {
        let key = match key.to_lowercase().as_str() {
            "route" => AnnotationKey::Route,
            "auth" => AnnotationKey::Auth,
            "middlewarebefore" => AnnotationKey::MiddlewareBefore,
            "middlewareafter" => AnnotationKey::MiddlewareAfter,
            "desc" => AnnotationKey::Desc,
            "param" => AnnotationKey::Param,
            "payload" => AnnotationKey::Payload { nullable: false },
            "?payload" => AnnotationKey::Payload { nullable: true },
            "query" => AnnotationKey::Query { nullable: false },
            "?query" => AnnotationKey::Query { nullable: true },
            "response" => AnnotationKey::Response,
            "version" => AnnotationKey::Version,
            _ => return None,
        };
        Some(key)
    }
}

impl Record for Api {
    fn begin(&mut self, method: &str) {
        self.controller = method.to_string();
    }

    fn insert(&mut self, key: &str, data: &str) -> Result<()> {
        let Some(key) = AnnotationKey::parse(key) else {
            return Ok(());
        };

        match key {
            AnnotationKey::Route => self.routes.push(parse_route(data)?),
            AnnotationKey::Auth => self.authorization.extend(quoted_values(data)),
            AnnotationKey::MiddlewareBefore => self.middleware.before.extend(quoted_values(data)),
            AnnotationKey::MiddlewareAfter => self.middleware.after.extend(quoted_values(data)),
            AnnotationKey::Desc => self.description = strip_double_quotes(data).to_string(),
            AnnotationKey::Param => self.validate.params.push(parse_param(data)?),
            AnnotationKey::Payload { nullable } => {
                self.validate.payload.push(parse_field(data, nullable)?)
            }
            AnnotationKey::Query { nullable } => {
                self.validate.queries.push(parse_field(data, nullable)?)
            }
            AnnotationKey::Response => self.response.extend(parse_responses(data)?),
            AnnotationKey::Version => self.version = parse_version(data)?,
        }
        Ok(())
    }
}

fn parse_route(data: &str) -> Result<Route> {
    let captures = ROUTE_REGEX
        .captures(data)
        .ok_or_else(|| Error::grammar("incorrect route pattern", data))?;

    Ok(Route {
        method: captures[1].to_string(),
        route: captures[2].to_string(),
    })
}

fn parse_param(data: &str) -> Result<Param> {
    let captures = PAIR_REGEX
        .captures(data)
        .ok_or_else(|| Error::grammar("incorrect document parameter pattern", data))?;

    Ok(Param {
        key: captures[1].to_string(),
        kind: captures[2].to_string(),
    })
}

fn parse_field(data: &str, nullable: bool) -> Result<Field> {
    let captures = PAIR_REGEX
        .captures(data)
        .ok_or_else(|| Error::grammar("incorrect document field pattern", data))?;

    Ok(Field {
        key: captures[1].to_string(),
        kind: captures[2].to_string(),
        description: String::new(),
        nullable,
    })
}

// Whole matches, quotes included.
fn quoted_values(data: &str) -> impl Iterator<Item = String> + '_ {
    QUOTED_REGEX.find_iter(data).map(|m| m.as_str().to_string())
}

fn parse_responses(data: &str) -> Result<Vec<i64>> {
    DIGITS_REGEX
        .find_iter(data)
        .map(|m| {
            m.as_str()
                .parse::<i64>()
                .map_err(|_| Error::grammar("responses value need to be an int", data))
        })
        .collect()
}

fn parse_version(data: &str) -> Result<String> {
    if !VERSION_REGEX.is_match(data) {
        return Err(Error::grammar("incorrect version name pattern", data));
    }
    Ok(strip_quotes(data).to_string())
}

/// Removes at most one leading and one trailing double quote.
fn strip_double_quotes(data: &str) -> &str {
    let data = data.strip_prefix('"').unwrap_or(data);
    data.strip_suffix('"').unwrap_or(data)
}

/// Removes at most one leading and one trailing quote, `"` or `'`.
fn strip_quotes(data: &str) -> &str {
    let data = data
        .strip_prefix('"')
        .or_else(|| data.strip_prefix('\''))
        .unwrap_or(data);
    data.strip_suffix('"')
        .or_else(|| data.strip_suffix('\''))
        .unwrap_or(data)
}
