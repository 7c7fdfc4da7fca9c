use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use syn::visit::Visit;
use syn::{Attribute, Expr, ExprLit, ImplItemFn, ItemFn, Lit, Meta, TraitItemFn};

/// AST (Abstract Syntax Tree) parser for Rust source files.
///
/// The `AstParser` uses the `syn` crate to parse Rust source code into an abstract syntax tree,
/// from which the doc comments of every function declaration can be collected.
///
/// # Example
///
/// ```no_run
/// use api_annotations::parser::AstParser;
/// use std::path::Path;
///
/// let parsed = AstParser::parse_file(Path::new("src/handlers.rs")).unwrap();
/// for function in parsed.function_docs() {
///     println!("{}: {} doc lines", function.name, function.doc.lines().count());
/// }
/// ```
pub struct AstParser;

/// A successfully parsed Rust file with its abstract syntax tree.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// The parsed abstract syntax tree
    pub syntax_tree: syn::File,
}

/// The doc text attached to one function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDoc {
    /// Function name as declared
    pub name: String,
    /// Doc attributes joined with newlines, empty when undocumented
    pub doc: String,
}

impl AstParser {
    /// Parses a single Rust source file into an AST.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IoError`] if the file cannot be read and
    /// [`Error::ParseError`] if it contains invalid Rust syntax.
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let content = fs::read_to_string(path)?;
        let syntax_tree = Self::parse_source(path, &content)?;

        debug!("Successfully parsed file: {}", path.display());

        Ok(ParsedFile {
            path: path.to_path_buf(),
            syntax_tree,
        })
    }

    /// Parses in-memory source, attributing syntax errors to `path`.
    pub fn parse_source(path: &Path, content: &str) -> Result<syn::File> {
        syn::parse_file(content).map_err(|e| Error::ParseError {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl ParsedFile {
    /// Collects every function declaration in source order.
    ///
    /// Free functions, `impl` methods and trait methods are included, also
    /// when nested in inline modules. Functions declared inside function
    /// bodies are not.
    pub fn function_docs(&self) -> Vec<FunctionDoc> {
        collect_function_docs(&self.syntax_tree)
    }
}

/// Collects every function declaration of a syntax tree in source order.
pub fn collect_function_docs(file: &syn::File) -> Vec<FunctionDoc> {
    let mut visitor = FunctionDocVisitor::default();
    visitor.visit_file(file);
    visitor.functions
}

#[derive(Default)]
struct FunctionDocVisitor {
    functions: Vec<FunctionDoc>,
}

impl FunctionDocVisitor {
    fn push(&mut self, name: String, attrs: &[Attribute]) {
        let doc = doc_text(attrs);
        debug!("Found function {} ({} doc lines)", name, doc.lines().count());
        self.functions.push(FunctionDoc { name, doc });
    }
}

// Bodies are not walked: only declarations at item level count.
impl<'ast> Visit<'ast> for FunctionDocVisitor {
    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        self.push(node.sig.ident.to_string(), &node.attrs);
    }

    fn visit_impl_item_fn(&mut self, node: &'ast ImplItemFn) {
        self.push(node.sig.ident.to_string(), &node.attrs);
    }

    fn visit_trait_item_fn(&mut self, node: &'ast TraitItemFn) {
        self.push(node.sig.ident.to_string(), &node.attrs);
    }
}

/// Joins the outer `#[doc = "..."]` attributes into one text block.
fn doc_text(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| matches!(attr.style, syn::AttrStyle::Outer) && attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::TempDir;

    /// Helper function to create a temporary file with content
    fn create_temp_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    fn docs_of(source: &str) -> Vec<FunctionDoc> {
        collect_function_docs(&syn::parse_file(source).unwrap())
    }

    #[test]
    fn test_parse_valid_rust_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = create_temp_file(&temp_dir, "valid.rs", "pub fn get_user(id: u32) {}");

        let parsed = AstParser::parse_file(&file_path).unwrap();

        assert_eq!(parsed.path, file_path);
        assert_eq!(parsed.syntax_tree.items.len(), 1);
    }

    #[test]
    fn test_parse_invalid_rust_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = create_temp_file(&temp_dir, "invalid.rs", "fn broken( {");

        let err = AstParser::parse_file(&file_path).unwrap_err();

        match err {
            Error::ParseError { file, .. } => assert_eq!(file, file_path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let err = AstParser::parse_file(Path::new("/nonexistent/file.rs")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_collects_doc_lines_of_free_function() {
        let docs = docs_of(
            r#"
            /// Lists users.
            /// @route("GET", "/users")
            pub fn list_users() {}
            "#,
        );

        assert_eq!(
            docs,
            vec![FunctionDoc {
                name: "list_users".to_string(),
                doc: " Lists users.\n @route(\"GET\", \"/users\")".to_string(),
            }]
        );
    }

    #[test]
    fn test_collects_methods_and_nested_modules() {
        let docs = docs_of(
            r#"
            struct UserController;

            impl UserController {
                /// @route("POST", "/users")
                pub fn create(&self) {}
            }

            trait Health {
                /// @route("GET", "/health")
                fn health(&self);
            }

            mod admin {
                /// @auth("admin")
                pub fn purge() {
                    /// @route("GET", "/hidden")
                    fn inner() {}
                }
            }
            "#,
        );

        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["create", "health", "purge"]);
    }

    #[test]
    fn test_undocumented_function_has_empty_doc() {
        let docs = docs_of("#[inline] fn plain() {}");
        assert_eq!(docs.len(), 1);
        assert!(docs[0].doc.is_empty());
    }

    #[test]
    fn test_block_doc_comment_keeps_lines() {
        let docs = docs_of("/** @route(\"GET\", \"/a\")\n @response(200) */\nfn a() {}");
        assert_eq!(docs[0].doc.lines().count(), 2);
    }
}
