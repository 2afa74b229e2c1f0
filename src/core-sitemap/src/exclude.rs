//! Exclusion pattern matching for route paths and manual locations.

use regex::Regex;

use crate::errors::Result;

/// A single compiled exclusion pattern.
#[derive(Debug, Clone)]
struct ExcludePattern {
    raw: String,
    /// Present only for patterns containing `*`.
    wildcard: Option<Regex>,
    /// The pattern minus a trailing `/*`, if it had one.
    subtree: Option<String>,
}

impl ExcludePattern {
    fn compile(raw: &str) -> Result<Self> {
        let wildcard = if raw.contains('*') {
            Some(Regex::new(&wildcard_to_regex(raw))?)
        } else {
            None
        };
        let subtree = raw.strip_suffix("/*").map(str::to_string);
        Ok(Self {
            raw: raw.to_string(),
            wildcard,
            subtree,
        })
    }

    fn matches(&self, path: &str) -> bool {
        if self.raw == path {
            return true;
        }
        if let Some(regex) = &self.wildcard
            && regex.is_match(path)
        {
            return true;
        }
        match &self.subtree {
            Some(prefix) => {
                path == prefix || path.strip_prefix(prefix.as_str()).is_some_and(|rest| rest.starts_with('/'))
            }
            None => false,
        }
    }
}

/// Translates `*` to "any sequence" and `?` to "any single character"; everything else is literal.
fn wildcard_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                regex.push_str(&regex::escape(&literal));
                literal.clear();
                regex.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    regex.push_str(&regex::escape(&literal));
    regex.push('$');
    regex
}

/// The compiled set of exclusion patterns of a configuration.
#[derive(Debug, Clone, Default)]
pub struct ExcludeMatcher {
    patterns: Vec<ExcludePattern>,
}

impl ExcludeMatcher {
    /// Compiles every pattern once, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a wildcard pattern cannot be turned into a regex.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| ExcludePattern::compile(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// True if any pattern matches the path.
    ///
    /// # Examples
    ///
    /// ```
    /// # use core_sitemap::ExcludeMatcher;
    /// let matcher = ExcludeMatcher::new(&["/admin/*".to_string()]).unwrap();
    /// assert!(matcher.is_excluded("/admin"));
    /// assert!(matcher.is_excluded("/admin/users"));
    /// assert!(!matcher.is_excluded("/administrator"));
    /// ```
    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    /// The patterns as they were configured.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.raw.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
