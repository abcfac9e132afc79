use std::fmt;

use super::Element;
use crate::error::{Error, ErrorKind, Result};

/// Largest supported indentation unit
pub const MAX_INDENT_SPACES: usize = 8;

const DECLARATION: &str = "<?xml version=\"1.0\" ?>";

/// Configuration options for formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Number of spaces per nesting level
    pub indent_spaces: usize,
    /// Emit an `<?xml ...?>` declaration before the root element
    pub declaration: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_spaces: 2,
            declaration: true,
        }
    }
}

impl fmt::Display for FormatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FormatConfig {{ indent_spaces: {}, declaration: {} }}",
            self.indent_spaces, self.declaration
        )
    }
}

impl FormatConfig {
    pub fn validate(&self) -> Result<()> {
        if self.indent_spaces > MAX_INDENT_SPACES {
            return Err(Error::new(ErrorKind::InvalidIndentation(format!(
                "{} spaces exceeds maximum allowed ({})",
                self.indent_spaces, MAX_INDENT_SPACES
            ))));
        }
        Ok(())
    }
}

/// Trait for rendering an element tree as text
pub trait Formatter {
    fn format(&self, element: &Element, config: &FormatConfig) -> Result<String>;
}

/// Pretty printer producing one tag per line
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormatter;

impl Formatter for XmlFormatter {
    fn format(&self, element: &Element, config: &FormatConfig) -> Result<String> {
        config.validate()?;

        let mut out = String::new();
        if config.declaration {
            out.push_str(DECLARATION);
            out.push('\n');
        }
        Self::write_element(&mut out, element, 0, config);
        Ok(out)
    }
}

impl XmlFormatter {
    fn write_element(out: &mut String, element: &Element, level: usize, config: &FormatConfig) {
        let indent = " ".repeat(level * config.indent_spaces);

        out.push_str(&indent);
        out.push('<');
        out.push_str(&element.name);
        for (key, value) in &element.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_attribute(out, value);
            out.push('"');
        }

        if element.is_empty() {
            out.push_str("/>\n");
            return;
        }

        out.push_str(">\n");
        for child in &element.children {
            Self::write_element(out, child, level + 1, config);
        }
        out.push_str(&indent);
        out.push_str("</");
        out.push_str(&element.name);
        out.push_str(">\n");
    }
}

fn escape_attribute(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
}

/// Remove a leading `<?xml ...?>` declaration and surrounding whitespace
pub fn strip_declaration(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("<?xml") {
        Some(rest) => rest
            .find("?>")
            .and_then(|end| rest.get(end + 2..))
            .map_or(trimmed, str::trim),
        None => trimmed,
    }
}
