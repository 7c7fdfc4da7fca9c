//! Annotation triples and the line grammar that produces them.
//!
//! An annotation is a single doc-comment line of the form `@key(payload)`.
//! Every recognized line becomes an [`Annotation`] carrying the name of the
//! function it documents, the lower-cased key and the verbatim payload.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// Matches a cleaned doc line: @key(payload)
static ANNOTATION_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([^()]+)\((.*)\)$").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// One `@key(payload)` line attached to a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Name of the declaring function
    pub method: String,
    /// Lower-cased annotation keyword
    pub key: String,
    /// Raw payload between the outer parentheses
    pub data: String,
}

impl Annotation {
    pub fn new(method: impl Into<String>, key: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            key: key.into(),
            data: data.into(),
        }
    }
}

/// All annotations documenting one function, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationGroup {
    pub method: String,
    pub annotations: Vec<Annotation>,
}

/// Tokenizes one doc line.
///
/// Whitespace runs are collapsed to a single space and the line is trimmed
/// before matching. Returns `(key, data)` with the key trimmed and
/// lower-cased, or `None` when the line is not an annotation.
pub fn parse_annotation_line(line: &str) -> Option<(String, String)> {
    let cleaned = WHITESPACE_REGEX.replace_all(line.trim(), " ");
    let captures = ANNOTATION_LINE_REGEX.captures(&cleaned)?;

    let key = captures.get(1)?.as_str().trim().to_lowercase();
    if key.is_empty() {
        return None;
    }
    let data = captures.get(2).map_or("", |m| m.as_str()).to_string();

    Some((key, data))
}

/// Splits a function's doc text into lines and keeps every annotation line.
pub fn annotations_from_doc(method: &str, doc: &str) -> Vec<Annotation> {
    doc.lines()
        .filter_map(parse_annotation_line)
        .map(|(key, data)| Annotation::new(method, key, data))
        .collect()
}

/// Groups annotations by declaring function.
///
/// Groups are returned in order of each method's first appearance and keep
/// the scan order of their annotations.
pub fn group_by_method(annotations: &[Annotation]) -> Vec<AnnotationGroup> {
    let mut groups: Vec<AnnotationGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for annotation in annotations {
        let slot = *index.entry(annotation.method.as_str()).or_insert_with(|| {
            groups.push(AnnotationGroup {
                method: annotation.method.clone(),
                annotations: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].annotations.push(annotation.clone());
    }

    groups
}
