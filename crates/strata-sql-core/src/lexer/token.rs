//! Token types for the SQL lexer.

use super::{Position, Span};

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// SQL keywords.
        ///
        /// Whether a keyword may double as an identifier is decided by the
        /// parser, see [`crate::parser::is_non_reserved`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub enum Keyword {
            $(
                #[doc = $text]
                $variant,
            )*
        }

        impl Keyword {
            /// Every keyword, in alphabetical order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Looks up a word, ignoring ASCII case.
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Canonical upper-case spelling.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }

            /// Returns the keyword wrapped in single quotes, as shown in
            /// "expected" lists of parse errors.
            #[must_use]
            pub const fn quoted(&self) -> &'static str {
                match self {
                    $(Self::$variant => concat!("'", $text, "'"),)*
                }
            }
        }
    };
}

keywords! {
    Add => "ADD",
    All => "ALL",
    Alter => "ALTER",
    Analyze => "ANALYZE",
    And => "AND",
    Any => "ANY",
    Array => "ARRAY",
    As => "AS",
    Asc => "ASC",
    At => "AT",
    Bernoulli => "BERNOULLI",
    Between => "BETWEEN",
    By => "BY",
    Call => "CALL",
    Cascade => "CASCADE",
    Case => "CASE",
    Cast => "CAST",
    Catalogs => "CATALOGS",
    Coalesce => "COALESCE",
    Column => "COLUMN",
    Columns => "COLUMNS",
    Comment => "COMMENT",
    Commit => "COMMIT",
    Committed => "COMMITTED",
    Create => "CREATE",
    Cross => "CROSS",
    Cube => "CUBE",
    Current => "CURRENT",
    CurrentDate => "CURRENT_DATE",
    CurrentTime => "CURRENT_TIME",
    CurrentTimestamp => "CURRENT_TIMESTAMP",
    Data => "DATA",
    Date => "DATE",
    Day => "DAY",
    Deallocate => "DEALLOCATE",
    Delete => "DELETE",
    Desc => "DESC",
    Describe => "DESCRIBE",
    Distinct => "DISTINCT",
    Distributed => "DISTRIBUTED",
    Drop => "DROP",
    Else => "ELSE",
    End => "END",
    Escape => "ESCAPE",
    Except => "EXCEPT",
    Excluding => "EXCLUDING",
    Execute => "EXECUTE",
    Exists => "EXISTS",
    Explain => "EXPLAIN",
    Extract => "EXTRACT",
    False => "FALSE",
    Filter => "FILTER",
    First => "FIRST",
    Following => "FOLLOWING",
    For => "FOR",
    Format => "FORMAT",
    From => "FROM",
    Full => "FULL",
    Functions => "FUNCTIONS",
    Grant => "GRANT",
    Grants => "GRANTS",
    Graphviz => "GRAPHVIZ",
    Group => "GROUP",
    Grouping => "GROUPING",
    Having => "HAVING",
    Hour => "HOUR",
    If => "IF",
    In => "IN",
    Including => "INCLUDING",
    Inner => "INNER",
    Input => "INPUT",
    Insert => "INSERT",
    Integer => "INTEGER",
    Intersect => "INTERSECT",
    Interval => "INTERVAL",
    Into => "INTO",
    Is => "IS",
    Isolation => "ISOLATION",
    Join => "JOIN",
    Json => "JSON",
    Last => "LAST",
    Left => "LEFT",
    Level => "LEVEL",
    Like => "LIKE",
    Limit => "LIMIT",
    Localtime => "LOCALTIME",
    Localtimestamp => "LOCALTIMESTAMP",
    Logical => "LOGICAL",
    Map => "MAP",
    Minute => "MINUTE",
    Month => "MONTH",
    Natural => "NATURAL",
    Nfc => "NFC",
    Nfd => "NFD",
    Nfkc => "NFKC",
    Nfkd => "NFKD",
    No => "NO",
    Normalize => "NORMALIZE",
    Not => "NOT",
    Null => "NULL",
    Nullif => "NULLIF",
    Nulls => "NULLS",
    On => "ON",
    Only => "ONLY",
    Option => "OPTION",
    Or => "OR",
    Order => "ORDER",
    Ordinality => "ORDINALITY",
    Outer => "OUTER",
    Output => "OUTPUT",
    Over => "OVER",
    Partition => "PARTITION",
    Partitions => "PARTITIONS",
    Poissonized => "POISSONIZED",
    Position => "POSITION",
    Preceding => "PRECEDING",
    Prepare => "PREPARE",
    Privileges => "PRIVILEGES",
    Properties => "PROPERTIES",
    Public => "PUBLIC",
    Range => "RANGE",
    Read => "READ",
    Recursive => "RECURSIVE",
    Rename => "RENAME",
    Repeatable => "REPEATABLE",
    Replace => "REPLACE",
    Reset => "RESET",
    Restrict => "RESTRICT",
    Revoke => "REVOKE",
    Right => "RIGHT",
    Rollback => "ROLLBACK",
    Rollup => "ROLLUP",
    Row => "ROW",
    Rows => "ROWS",
    Schema => "SCHEMA",
    Schemas => "SCHEMAS",
    Second => "SECOND",
    Select => "SELECT",
    Serializable => "SERIALIZABLE",
    Session => "SESSION",
    Set => "SET",
    Sets => "SETS",
    Show => "SHOW",
    Smallint => "SMALLINT",
    Some => "SOME",
    Start => "START",
    Stats => "STATS",
    Substring => "SUBSTRING",
    System => "SYSTEM",
    Table => "TABLE",
    Tables => "TABLES",
    Tablesample => "TABLESAMPLE",
    Text => "TEXT",
    Then => "THEN",
    Time => "TIME",
    Timestamp => "TIMESTAMP",
    Tinyint => "TINYINT",
    To => "TO",
    Transaction => "TRANSACTION",
    True => "TRUE",
    TryCast => "TRY_CAST",
    Type => "TYPE",
    Unbounded => "UNBOUNDED",
    Uncommitted => "UNCOMMITTED",
    Union => "UNION",
    Unnest => "UNNEST",
    Use => "USE",
    Using => "USING",
    Validate => "VALIDATE",
    Values => "VALUES",
    View => "VIEW",
    When => "WHEN",
    Where => "WHERE",
    With => "WITH",
    Work => "WORK",
    Write => "WRITE",
    Year => "YEAR",
    Zone => "ZONE",
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Decimal literal, kept as written (e.g., 3.14, .5, 1.)
    Decimal(String),
    /// Double literal with an exponent (e.g., 1e10)
    Double(f64),
    /// String literal with quotes removed and `''` unescaped
    String(String),
    /// Binary literal (e.g., X'CAFE')
    Binary(Vec<u8>),

    // Identifiers and keywords
    /// Plain identifier (e.g., column_name)
    Identifier(String),
    /// Double-quoted identifier, case preserved
    QuotedIdentifier(String),
    /// Back-quoted identifier
    BackquotedIdentifier(String),
    /// Identifier starting with a digit (e.g., 1st_value)
    DigitIdentifier(String),
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// ->
    Arrow,
    /// =>
    FatArrow,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// ?
    Question,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

impl TokenKind {
    /// Describes the token kind the way parse errors list expected tokens.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Integer(_) => "<integer>",
            Self::Decimal(_) | Self::Double(_) => "<number>",
            Self::String(_) => "<string>",
            Self::Binary(_) => "<binary>",
            Self::Identifier(_)
            | Self::QuotedIdentifier(_)
            | Self::BackquotedIdentifier(_)
            | Self::DigitIdentifier(_) => "<identifier>",
            Self::Keyword(kw) => kw.quoted(),
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Eq => "'='",
            Self::NotEq => "'<>'",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::Concat => "'||'",
            Self::Arrow => "'->'",
            Self::FatArrow => "'=>'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Question => "'?'",
            Self::Eof => "<EOF>",
            Self::Error(_) => "<error>",
        }
    }
}

/// A token with its location in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The raw source text of the token, exactly as written.
    pub text: String,
    /// The byte range in the source code.
    pub span: Span,
    /// Line and column of the first character.
    pub position: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            position,
        }
    }

    /// Creates an end-of-input token at the given location.
    #[must_use]
    pub fn eof(offset: usize, position: Position) -> Self {
        Self::new(TokenKind::Eof, "", Span::new(offset, offset), position)
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// The keyword, if this token is one.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Text used for this token in error messages.
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.is_eof() {
            "<EOF>"
        } else {
            &self.text
        }
    }
}
