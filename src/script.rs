//! Line-oriented build scripts
//!
//! ```text
//! # comment
//! root books
//! book title="Example A"
//! book.author name="John Smith" age=57
//! ```
//!
//! The first line names the root; every other line commits one dotted path
//! with `key=value` attributes. Quoted values support `\"`, `\\`, `\n` and
//! `\t`; bare values become booleans or numbers when they look like one.

use std::iter::Peekable;
use std::str::Chars;

use tracing::{debug, instrument};

use crate::config::BuilderConfig;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::markup::FormatConfig;
use crate::value::{AttrValue, Attributes};

/// One commit taken from a script line
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub path: String,
    pub attributes: Attributes,
}

/// A parsed build script
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub root: String,
    pub root_attributes: Attributes,
    pub commits: Vec<ScriptLine>,
}

impl Script {
    /// Replay the script into a fresh document
    pub fn build(&self, config: BuilderConfig) -> Result<Document> {
        let mut document =
            Document::try_with_attributes(&self.root, self.root_attributes.clone(), config)
                .map_err(|e| e.with_context("root line"))?;
        for commit in &self.commits {
            let cursor = document.path(&commit.path);
            document
                .commit(&cursor, commit.attributes.clone())
                .map_err(|e| e.with_context(format!("line {}", commit.line)))?;
        }
        debug!(
            "built {} nodes from {} commits",
            document.node_count(),
            self.commits.len()
        );
        Ok(document)
    }
}

pub fn parse_script(input: &str) -> Result<Script> {
    let mut root: Option<(String, Attributes)> = None;
    let mut commits = Vec::new();

    for (index, text) in input.lines().enumerate() {
        let line = index + 1;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut lexer = LineLexer::new(trimmed, line);
        let head = lexer.word().ok_or_else(|| Error::script(line, "expected a path"))?;

        if root.is_none() {
            if head != "root" {
                return Err(Error::script(line, "expected `root <name>` first"));
            }
            let name = lexer
                .word()
                .ok_or_else(|| Error::script(line, "missing root name"))?;
            root = Some((name, lexer.attributes()?));
            continue;
        }

        commits.push(ScriptLine {
            line,
            path: head,
            attributes: lexer.attributes()?,
        });
    }

    let (root, root_attributes) =
        root.ok_or_else(|| Error::script(1, "script has no `root` line"))?;
    Ok(Script {
        root,
        root_attributes,
        commits,
    })
}

/// Parse, build and serialize a script with default settings
#[instrument(skip_all, fields(bytes = input.len()))]
pub fn run_script(input: &str) -> Result<String> {
    run_script_with(input, &BuilderConfig::default(), &FormatConfig::default())
}

pub fn run_script_with(
    input: &str,
    config: &BuilderConfig,
    format: &FormatConfig,
) -> Result<String> {
    let script = parse_script(input)?;
    let document = script.build(config.clone())?;
    document.to_xml_with(format)
}

struct LineLexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> LineLexer<'a> {
    fn new(text: &'a str, line: usize) -> Self {
        Self {
            chars: text.chars().peekable(),
            line,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    /// Next run of characters up to whitespace, `=` or a quote
    fn word(&mut self) -> Option<String> {
        self.skip_whitespace();
        let mut word = String::new();
        while let Some(c) = self
            .chars
            .next_if(|c| !c.is_whitespace() && !matches!(c, '=' | '"'))
        {
            word.push(c);
        }
        (!word.is_empty()).then_some(word)
    }

    fn attributes(&mut self) -> Result<Attributes> {
        let mut attributes = Attributes::new();
        loop {
            self.skip_whitespace();
            if self.chars.peek().is_none() {
                return Ok(attributes);
            }

            let key = self
                .word()
                .ok_or_else(|| Error::script(self.line, "expected attribute name"))?;
            if self.chars.next() != Some('=') {
                return Err(Error::script(
                    self.line,
                    format!("expected `=` after `{key}`"),
                ));
            }
            let value = self.value()?;
            attributes.insert(key, value);
        }
    }

    fn value(&mut self) -> Result<AttrValue> {
        if self.chars.next_if_eq(&'"').is_some() {
            let text = self.quoted()?;
            if self.chars.peek().is_some_and(|c| !c.is_whitespace()) {
                return Err(Error::script(self.line, "expected whitespace after value"));
            }
            return Ok(AttrValue::String(text));
        }

        let mut bare = String::new();
        while let Some(c) = self.chars.next_if(|c| !c.is_whitespace()) {
            bare.push(c);
        }
        if bare.is_empty() {
            return Err(Error::script(self.line, "missing attribute value"));
        }
        Ok(bare_value(bare))
    }

    fn quoted(&mut self) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(text),
                Some('\\') => match self.chars.next() {
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some(other) => {
                        return Err(Error::script(
                            self.line,
                            format!("invalid escape `\\{other}`"),
                        ))
                    }
                    None => return Err(Error::script(self.line, "unterminated string")),
                },
                Some(c) => text.push(c),
                None => return Err(Error::script(self.line, "unterminated string")),
            }
        }
    }
}

fn bare_value(bare: String) -> AttrValue {
    match bare.as_str() {
        "true" => return AttrValue::Boolean(true),
        "false" => return AttrValue::Boolean(false),
        _ => {}
    }
    if let Ok(n) = bare.parse::<i64>() {
        return AttrValue::Integer(n);
    }
    if let Ok(n) = bare.parse::<u64>() {
        return AttrValue::Unsigned(n);
    }
    let numeric = bare.chars().any(|c| c.is_ascii_digit())
        && bare
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if numeric {
        if let Ok(n) = bare.parse::<f64>() {
            return AttrValue::Float(n);
        }
    }
    AttrValue::String(bare)
}
