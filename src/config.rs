use std::fmt;

use crate::error::{Error, ErrorKind, Result};

/// Maximum node depth (128) below the root
pub const DEFAULT_MAX_DEPTH: usize = 128;
/// Maximum number of attributes supplied to a single commit
pub const DEFAULT_MAX_ATTRIBUTES: usize = 1_000;

/// Limits and validation applied when committing nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Maximum depth of a committed node (root is depth 0)
    pub max_depth: usize,
    /// Maximum attributes per commit
    pub max_attributes: usize,
    /// Reject element and attribute names that are not markup names
    pub validate_names: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_attributes: DEFAULT_MAX_ATTRIBUTES,
            validate_names: true,
        }
    }
}

impl fmt::Display for BuilderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BuilderConfig {{ max_depth: {}, max_attributes: {}, validate_names: {} }}",
            self.max_depth, self.max_attributes, self.validate_names
        )
    }
}

impl BuilderConfig {
    pub fn validate_name(&self, name: &str) -> Result<()> {
        if self.validate_names && !is_valid_name(name) {
            return Err(Error::invalid_name(name));
        }
        Ok(())
    }

    pub fn validate_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::new(ErrorKind::MaxDepthExceeded {
                max: self.max_depth,
            }));
        }
        Ok(())
    }

    pub fn validate_attribute_count(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            return Err(Error::new(ErrorKind::MaxAttributesExceeded {
                max: self.max_attributes,
            }));
        }
        Ok(())
    }
}

/// Simplified markup name check without namespace prefixes
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
