//! Shared fixtures for unit tests, integration tests and benchmarks

pub use crate::{
    attrs,
    build_file,
    config::{BuilderConfig, DEFAULT_MAX_ATTRIBUTES, DEFAULT_MAX_DEPTH},
    cursor::{Chain, Cursor},
    document::Document,
    error::{Error, ErrorKind, Result},
    markup::{Element, FormatConfig, Formatter, XmlFormatter},
    node::{Node, NodeId},
    script::{parse_script, run_script, run_script_with, Script},
    shared::SharedDocument,
    value::{AttrValue, Attributes},
};

use std::{env, fs, path::PathBuf};

/// The bookshelf example as a build script
pub const BOOKS_SCRIPT: &str = r#"# two books, three authors
root books
book title="Example A"
book.author name="John Smith" age=57
book.publisher name="Publisher A"
book title="Example B"
book.author name="Jane Doe" age=30
book.author name="James Cutter" age=45
book.publisher name="Publisher B"
"#;

/// Expected serialization of [`BOOKS_SCRIPT`]
pub const BOOKS_XML: &str = r#"<books>
  <book title="Example A">
    <author name="John Smith" age="57"/>
    <publisher name="Publisher A"/>
  </book>
  <book title="Example B">
    <author name="Jane Doe" age="30"/>
    <author name="James Cutter" age="45"/>
    <publisher name="Publisher B"/>
  </book>
</books>"#;

/// Expected serialization of `a.b.c`, `a.b.c`, `a`, `a.b.c`, `a.b.c`
pub const REPEATED_PATH_XML: &str = "<root>
  <a>
    <b>
      <c/>
      <c/>
    </b>
  </a>
  <a>
    <b>
      <c/>
      <c/>
    </b>
  </a>
</root>";

/// Build the bookshelf example through the chaining API
pub fn books_document() -> Result<Document> {
    let mut books = Document::new("books");
    books.at("book").commit(attrs! { "title" => "Example A" })?;
    books
        .at("book.author")
        .commit(attrs! { "name" => "John Smith", "age" => 57 })?;
    books
        .at("book.publisher")
        .commit(attrs! { "name" => "Publisher A" })?;
    books.at("book").commit(attrs! { "title" => "Example B" })?;
    books
        .at("book.author")
        .commit(attrs! { "name" => "Jane Doe", "age" => 30 })?;
    books
        .at("book.author")
        .commit(attrs! { "name" => "James Cutter", "age" => 45 })?;
    books
        .at("book.publisher")
        .commit(attrs! { "name" => "Publisher B" })?;
    Ok(books)
}

/// A document with `width` leaves under each of `depth` nested levels
pub fn wide_document(depth: usize, width: usize) -> Result<Document> {
    let mut doc = Document::new("root");
    let mut path = String::new();
    for level in 0..depth {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(&format!("level{level}"));
        for index in 0..width {
            doc.at(&format!("{path}.leaf")).commit(attrs! { "index" => index })?;
        }
    }
    Ok(doc)
}

pub fn tmp_file_path(name: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    dir.push("xmlchain_tests");
    let _ = fs::create_dir_all(&dir);
    dir.push(name);
    dir
}
