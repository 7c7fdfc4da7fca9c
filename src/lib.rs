//! api-annotations - API inventories from annotated Rust doc comments.
//!
//! Handlers describe themselves with `@key(payload)` lines in their doc
//! comments:
//!
//! ```text
//! /// Fetches one user.
//! /// @route("GET", "/users/:id")
//! /// @auth("admin", "self")
//! /// @param("id", int)
//! /// @response(200, 404)
//! /// @version("1.2")
//! async fn get_user() {}
//! ```
//!
//! # Architecture
//!
//! 1. [`scanner`] - Lists the `.rs` files of a directory and turns doc comments into
//!    [`annotation::Annotation`] triples, using [`parser`] for the syntax tree
//! 2. [`mapper`] - The [`mapper::Mapper`] trait that converts triples into caller-defined records
//! 3. [`schema`] - The reference [`schema::Api`] record and its payload grammars
//! 4. [`fetch`] - Validates the inputs and drives scanner then mapper
//! 5. [`serializer`] - Saves the resulting collection as JSON or YAML
//!
//! # Example Usage
//!
//! ```no_run
//! use api_annotations::{
//!     fetch::fetch,
//!     schema::{Api, ApiMapper},
//!     serializer::save,
//! };
//! use std::path::Path;
//!
//! let mut apis: Vec<Api> = Vec::new();
//! fetch(Path::new("./src/controllers"), &mut apis, &ApiMapper::new()).unwrap();
//! save(&apis, Path::new("api.json")).unwrap();
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod annotation;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod mapper;
pub mod parser;
pub mod scanner;
pub mod schema;
pub mod serializer;
