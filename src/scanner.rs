use crate::annotation::{annotations_from_doc, Annotation};
use crate::error::Result;
use crate::parser::AstParser;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File scanner for listing the Rust sources of one directory.
///
/// The `FileScanner` only looks at the directory itself; subdirectories are
/// not entered. Files are returned sorted by name so that repeated scans of
/// an unchanged directory produce the same annotation order.
///
/// # Example
///
/// ```no_run
/// use api_annotations::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./src/controllers"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} Rust files", result.rust_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
}

/// Result of directory scanning operation.
pub struct ScanResult {
    /// Paths of all `.rs` files directly inside the root
    pub rust_files: Vec<PathBuf>,
}

impl FileScanner {
    /// Creates a new `FileScanner` for the specified directory.
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Lists the `.rs` files of the directory.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the directory or one of its entries cannot be
    /// accessed. A missing directory is reported as `NotFound`.
    pub fn scan(&self) -> Result<ScanResult> {
        let mut rust_files = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("rs") {
                continue;
            }
            if path.file_name().and_then(|s| s.to_str()).is_none() {
                warn!("Skipping file with non UTF-8 name: {}", path.display());
                continue;
            }

            rust_files.push(path.to_path_buf());
        }

        debug!(
            "Found {} Rust files in {}",
            rust_files.len(),
            self.root_path.display()
        );

        Ok(ScanResult { rust_files })
    }
}

/// Scans a directory into annotation triples.
///
/// Every `.rs` file directly inside `dir` is parsed; each documented function
/// contributes one [`Annotation`] per `@key(payload)` line of its doc
/// comment, in source order. The first unreadable or malformed file aborts
/// the scan.
pub fn scan(dir: &Path) -> Result<Vec<Annotation>> {
    let scan_result = FileScanner::new(dir.to_path_buf()).scan()?;
    let mut annotations = Vec::new();

    for path in &scan_result.rust_files {
        let parsed = AstParser::parse_file(path)?;

        for function in parsed.function_docs() {
            if function.doc.is_empty() {
                continue;
            }
            let found = annotations_from_doc(&function.name, &function.doc);
            debug!("{}: {} annotations", function.name, found.len());
            annotations.extend(found);
        }
    }

    info!(
        "Collected {} annotations from {} files",
        annotations.len(),
        scan_result.rust_files.len()
    );

    Ok(annotations)
}
