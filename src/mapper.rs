//! The mapper contract: turning annotation triples into caller-defined records.
//!
//! A [`Mapper`] receives the flat annotation stream of one scan and appends
//! structured elements to a caller-owned `Vec`. Closures with the matching
//! signature are mappers, so small schemas need no type of their own.
//!
//! Schemas that build one record per function can implement [`Record`] and
//! use [`RecordMapper`], which takes care of grouping.
//!
//! # Example
//!
//! ```
//! use api_annotations::annotation::Annotation;
//! use api_annotations::error::Result;
//! use api_annotations::mapper::Mapper;
//!
//! let names = |out: &mut Vec<String>, annotations: &[Annotation]| -> Result<()> {
//!     out.extend(annotations.iter().map(|a| a.method.clone()));
//!     Ok(())
//! };
//!
//! let mut out = Vec::new();
//! names.map(&mut out, &[Annotation::new("ping", "route", "\"GET\", \"/ping\"")]).unwrap();
//! assert_eq!(out, vec!["ping".to_string()]);
//! ```

use crate::annotation::{group_by_method, Annotation};
use crate::error::Result;
use log::debug;
use std::marker::PhantomData;

/// Converts a scan result into elements of a caller-chosen type.
pub trait Mapper<T> {
    /// Appends the elements built from `annotations` to `output`.
    ///
    /// An error is returned as is by the orchestrator; elements appended
    /// before the failure are left in place.
    fn map(&self, output: &mut Vec<T>, annotations: &[Annotation]) -> Result<()>;
}

impl<T, F> Mapper<T> for F
where
    F: Fn(&mut Vec<T>, &[Annotation]) -> Result<()>,
{
    fn map(&self, output: &mut Vec<T>, annotations: &[Annotation]) -> Result<()> {
        self(output, annotations)
    }
}

/// A record assembled from all annotations of one function.
pub trait Record: Default {
    /// Called once with the declaring function's name before any insert.
    fn begin(&mut self, method: &str);

    /// Applies one annotation. `key` is already lower-cased.
    fn insert(&mut self, key: &str, data: &str) -> Result<()>;
}

/// Builds one `R` per annotated function, in order of first appearance.
pub struct RecordMapper<R> {
    _record: PhantomData<fn() -> R>,
}

impl<R> RecordMapper<R> {
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<R> Default for RecordMapper<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Mapper<R> for RecordMapper<R> {
    fn map(&self, output: &mut Vec<R>, annotations: &[Annotation]) -> Result<()> {
        for group in group_by_method(annotations) {
            let mut record = R::default();
            record.begin(&group.method);

            for annotation in &group.annotations {
                record.insert(&annotation.key, &annotation.data)?;
            }

            debug!(
                "Mapped {} with {} annotations",
                group.method,
                group.annotations.len()
            );
            output.push(record);
        }
        Ok(())
    }
}
