//! Deny list handling
//!
//! Each non-empty line of a deny list is a regular expression that must
//! match a whole normalized path. A path matching any rule is never packed,
//! even when something else asks for it.

use regex::Regex;

use crate::error::{ResolveError, Result};

/// Compiled exclusion rules
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    patterns: Vec<Regex>,
}

impl ExclusionRules {
    /// No exclusions
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the lines of a deny list
    pub fn parse(text: &str) -> Result<Self> {
        let mut rules = Self::new();
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            rules.add(line)?;
        }
        Ok(rules)
    }

    /// Add one pattern, anchored at both ends
    pub fn add(&mut self, pattern: &str) -> Result<()> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            ResolveError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        self.patterns.push(regex);
        Ok(())
    }

    /// Whether a normalized path is excluded
    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether there are no rules
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
