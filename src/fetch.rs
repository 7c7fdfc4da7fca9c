use crate::error::{Error, Result};
use crate::mapper::Mapper;
use crate::scanner;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Scans `dir` and maps its annotations into `output`.
///
/// `output` must be empty. The directory is checked before anything is
/// read, then the scanner runs, then `mapper`. The first error from any step
/// is returned unchanged; `output` is untouched unless the mapper ran.
///
/// # Errors
///
/// - [`Error::IoError`] when `dir` does not exist or cannot be read
/// - [`Error::ValidationError`] when `dir` is not a directory or `output` is not empty
/// - [`Error::ParseError`] when a source file is malformed
/// - whatever `mapper` returns, typically [`Error::GrammarError`]
///
/// # Example
///
/// ```no_run
/// use api_annotations::fetch::fetch;
/// use api_annotations::schema::{Api, ApiMapper};
/// use std::path::Path;
///
/// let mut apis: Vec<Api> = Vec::new();
/// fetch(Path::new("./src/controllers"), &mut apis, &ApiMapper::new()).unwrap();
/// println!("Found {} handlers", apis.len());
/// ```
pub fn fetch<T, M>(dir: &Path, output: &mut Vec<T>, mapper: &M) -> Result<()>
where
    M: Mapper<T> + ?Sized,
{
    if !output.is_empty() {
        return Err(Error::ValidationError(format!(
            "output collection must be empty, found {} elements",
            output.len()
        )));
    }

    let metadata = fs::metadata(dir)?;
    if !metadata.is_dir() {
        return Err(Error::ValidationError(format!(
            "path is not a directory: {}",
            dir.display()
        )));
    }

    info!("Scanning {} for annotations", dir.display());
    let annotations = scanner::scan(dir)?;

    debug!("Mapping {} annotations", annotations.len());
    mapper.map(output, &annotations)?;

    info!("Built {} records", output.len());
    Ok(())
}
