//! Identifiers and qualified names.

use core::fmt;

use crate::lexer::Keyword;
use crate::parser::is_non_reserved;

/// A single identifier, as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Identifier {
    /// The identifier text, with quotes removed and escapes resolved.
    pub value: String,
    /// Whether the identifier was delimited (double- or back-quoted).
    pub quoted: bool,
}

impl Identifier {
    /// Creates an unquoted identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }

    /// Creates a delimited identifier.
    #[must_use]
    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: true,
        }
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted || !can_be_bare(&self.value) {
            write_quoted(f, &self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

/// Whether `text` lexes back as a single identifier token that the parser
/// accepts without quotes.
pub(crate) fn can_be_bare(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest_ok = text
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | ':'));
    if !rest_ok {
        return false;
    }
    if first.is_ascii_digit() {
        // Digit-led identifiers must not read as a number.
        return text.chars().any(|c| !c.is_ascii_digit()) && text.parse::<f64>().is_err();
    }
    match Keyword::from_str(text) {
        Some(keyword) => is_non_reserved(keyword),
        None => true,
    }
}

pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    write!(f, "\"{}\"", text.replace('"', "\"\""))
}

/// A dotted name such as `catalog.schema.table`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QualifiedName {
    parts: Vec<Identifier>,
}

impl QualifiedName {
    /// Creates a one-part name.
    #[must_use]
    pub fn single(part: Identifier) -> Self {
        Self { parts: vec![part] }
    }

    /// Creates a name from its parts, or `None` if `parts` is empty.
    #[must_use]
    pub fn from_parts(parts: Vec<Identifier>) -> Option<Self> {
        if parts.is_empty() {
            None
        } else {
            Some(Self { parts })
        }
    }

    /// Appends a trailing part.
    pub fn push(&mut self, part: Identifier) {
        self.parts.push(part);
    }

    /// Returns all parts, outermost first.
    #[must_use]
    pub fn parts(&self) -> &[Identifier] {
        &self.parts
    }

    /// Returns the last (innermost) part.
    #[must_use]
    pub fn last(&self) -> &Identifier {
        // `parts` is never empty
        &self.parts[self.parts.len() - 1]
    }

    /// Returns the leading parts, without the last one.
    #[must_use]
    pub fn prefix(&self) -> &[Identifier] {
        &self.parts[..self.parts.len() - 1]
    }
}

impl From<Identifier> for QualifiedName {
    fn from(part: Identifier) -> Self {
        Self::single(part)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifier_displays_bare() {
        assert_eq!(Identifier::new("orders").to_string(), "orders");
        assert_eq!(Identifier::new("format").to_string(), "format");
        assert_eq!(Identifier::new("1st").to_string(), "1st");
    }

    #[test]
    fn test_identifier_quoting() {
        assert_eq!(Identifier::quoted("Orders").to_string(), "\"Orders\"");
        assert_eq!(Identifier::new("select").to_string(), "\"select\"");
        assert_eq!(Identifier::new("two words").to_string(), "\"two words\"");
        assert_eq!(Identifier::new("a\"b").to_string(), "\"a\"\"b\"");
        assert_eq!(Identifier::new("123").to_string(), "\"123\"");
        assert_eq!(Identifier::new("1e5").to_string(), "\"1e5\"");
    }

    #[test]
    fn test_qualified_name() {
        let mut name = QualifiedName::single(Identifier::new("hive"));
        name.push(Identifier::new("web"));
        name.push(Identifier::quoted("Page Views"));
        assert_eq!(name.to_string(), "hive.web.\"Page Views\"");
        assert_eq!(name.last().value, "Page Views");
        assert_eq!(name.prefix().len(), 2);
    }

    #[test]
    fn test_qualified_name_rejects_empty() {
        assert!(QualifiedName::from_parts(Vec::new()).is_none());
    }
}
