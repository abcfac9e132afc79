//! xmlchain: build XML documents by chaining element names
//!
//! This crate provides functionality to:
//! - Describe element paths lazily with cursors
//! - Commit a path with attributes, creating missing ancestors once
//! - Create same-named siblings by committing the same path again
//! - Pretty print the committed tree
//!
//! # Examples
//! ```
//! use xmlchain::{attrs, Document, Result};
//!
//! fn example() -> Result<()> {
//!     let mut books = Document::new("books");
//!     books.at("book").commit(attrs! { "title" => "Example A" })?;
//!     books.at("book.author").commit(attrs! { "name" => "John Smith", "age" => 57 })?;
//!     books.at("book").commit(attrs! { "title" => "Example B" })?;
//!     books.at("book.author").commit(attrs! { "name" => "Jane Doe", "age" => 30 })?;
//!     println!("{}", books.to_xml()?);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

use tracing::{debug, info, instrument};

pub mod config;
pub mod cursor;
pub mod document;
pub mod error;
pub mod markup;
pub mod node;
pub mod script;
pub mod shared;
pub mod test_utils;
pub mod value;

// Re-exports
pub use config::BuilderConfig;
pub use cursor::{Chain, Cursor};
pub use document::Document;
pub use error::{Error, ErrorKind, Result};
pub use markup::FormatConfig;
pub use node::{Node, NodeId};
pub use script::{parse_script, run_script, Script};
pub use shared::SharedDocument;
pub use value::{AttrValue, Attributes};

/// Read a build script from `path` and return the generated XML
#[instrument]
pub fn build_file(path: &str) -> Result<String> {
    debug!("Reading build script: {}", path);

    let content = std::fs::read_to_string(path).map_err(|e| Error::from(e).with_context(path))?;

    info!("Script read successfully, building document");
    let xml = run_script(&content)?;

    debug!("Build completed");
    Ok(xml)
}
