use std::fmt;

use crate::error::{StoreError, StoreResult};

/// A validated dotted path into the world document.
///
/// Segments are separated by `.`; a path must have at least one segment and
/// no segment may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    /// Parse a dotted path such as `cities.rio.gm.clocks.alert`.
    pub fn parse(raw: &str) -> StoreResult<Self> {
        if raw.is_empty() {
            return Err(StoreError::InvalidPath(raw.to_string()));
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(StoreError::InvalidPath(raw.to_string()));
        }
        Ok(Self { segments })
    }

    /// All segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Every segment but the last.
    pub fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The terminal segment.
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Whether the rendered path starts with the given prefix.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.to_string().starts_with(prefix)
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl std::str::FromStr for DocPath {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_segments() {
        let p = DocPath::parse("cities.rio.gm.clocks.alert").unwrap();
        assert_eq!(p.segments().len(), 5);
        assert_eq!(p.leaf(), "alert");
        assert_eq!(p.parents(), ["cities", "rio", "gm", "clocks"]);
        assert_eq!(p.to_string(), "cities.rio.gm.clocks.alert");
    }

    #[test]
    fn single_segment() {
        let p = DocPath::parse("meta").unwrap();
        assert!(p.parents().is_empty());
        assert_eq!(p.leaf(), "meta");
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(DocPath::parse("").is_err());
        assert!(DocPath::parse("a..b").is_err());
        assert!(DocPath::parse(".a").is_err());
        assert!(DocPath::parse("a.").is_err());
    }

    #[test]
    fn prefix_check() {
        let p = DocPath::parse("extensions.stats.kit").unwrap();
        assert!(p.starts_with("extensions."));
        assert!(!DocPath::parse("extensions").unwrap().starts_with("extensions."));
    }
}
