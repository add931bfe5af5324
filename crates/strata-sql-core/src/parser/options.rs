//! Parser configuration.

/// What a decimal literal such as `1.5` turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalLiteralTreatment {
    /// Parse as a double precision literal.
    AsDouble,
    /// Keep the exact text as a decimal literal.
    #[default]
    AsDecimal,
    /// Refuse decimal literals altogether.
    Reject,
}

/// Options controlling a [`crate::Parser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting of expressions, queries, relations and types.
    pub max_depth: usize,
    /// Handling of decimal literals.
    pub decimal_literal: DecimalLiteralTreatment,
}

impl ParserOptions {
    /// Default nesting limit, low enough for a debug build on a 2 MiB
    /// thread stack.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets how decimal literals are treated.
    #[must_use]
    pub const fn with_decimal_literal(mut self, treatment: DecimalLiteralTreatment) -> Self {
        self.decimal_literal = treatment;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            decimal_literal: DecimalLiteralTreatment::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert_eq!(options.max_depth, ParserOptions::DEFAULT_MAX_DEPTH);
        assert_eq!(options.max_depth, 32);
        assert_eq!(options.decimal_literal, DecimalLiteralTreatment::AsDecimal);
    }

    #[test]
    fn test_builder() {
        let options = ParserOptions::new()
            .with_max_depth(8)
            .with_decimal_literal(DecimalLiteralTreatment::Reject);
        assert_eq!(options.max_depth, 8);
        assert_eq!(options.decimal_literal, DecimalLiteralTreatment::Reject);
    }
}
