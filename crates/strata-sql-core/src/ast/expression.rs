//! Expression AST types.

use super::{DataType, Identifier, QualifiedName, Query, SortItem};

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Literal {
    /// NULL literal.
    Null,
    /// TRUE or FALSE.
    Boolean(bool),
    /// Integer literal.
    Long(i64),
    /// Double literal.
    Double(f64),
    /// Decimal literal, kept as written.
    Decimal(String),
    /// String literal.
    String(String),
    /// Binary literal (`X'..'`).
    Binary(Vec<u8>),
    /// Interval literal.
    Interval(IntervalLiteral),
    /// Type constructor such as `DATE '2001-08-22'`.
    Typed {
        /// Name of the type.
        type_name: Identifier,
        /// The literal text.
        value: String,
    },
}

/// `INTERVAL [+|-] 'value' start [TO end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntervalLiteral {
    /// The quoted interval value.
    pub value: String,
    /// Sign written before the value.
    pub sign: IntervalSign,
    /// Leading field.
    pub start: IntervalField,
    /// Trailing field of a `start TO end` interval.
    pub end: Option<IntervalField>,
}

/// Sign of an interval literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IntervalSign {
    /// No sign or `+`.
    #[default]
    Positive,
    /// `-`.
    Negative,
}

/// Date-time field of an interval literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IntervalField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl IntervalField {
    /// Returns the SQL keyword of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // String
    Concat,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => "||",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns true for the six comparison operators.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOp {
    /// Identity (+)
    Plus,
    /// Negation (-)
    Minus,
    /// Logical NOT
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "NOT",
        }
    }
}

/// `DISTINCT` or `ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetQuantifier {
    Distinct,
    All,
}

impl SetQuantifier {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
        }
    }
}

/// Quantifier of a subquery comparison (`= ANY (...)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ComparisonQuantifier {
    All,
    Any,
    Some,
}

impl ComparisonQuantifier {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Any => "ANY",
            Self::Some => "SOME",
        }
    }
}

/// Arguments of a function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FunctionArgs {
    /// `f(*)`.
    Wildcard,
    /// `f([DISTINCT|ALL] a, b, ...)`, possibly empty.
    Exprs {
        /// Optional set quantifier.
        quantifier: Option<SetQuantifier>,
        /// Argument expressions.
        args: Vec<Expr>,
    },
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionCall {
    /// The function name.
    pub name: QualifiedName,
    /// The arguments.
    pub args: FunctionArgs,
    /// `FILTER (WHERE ...)` predicate.
    pub filter: Option<Box<Expr>>,
    /// `OVER (...)` window.
    pub window: Option<Window>,
}

/// A window specification.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Window {
    /// `PARTITION BY` expressions.
    pub partition_by: Vec<Expr>,
    /// `ORDER BY` items.
    pub order_by: Vec<SortItem>,
    /// Frame clause.
    pub frame: Option<WindowFrame>,
}

/// `ROWS` or `RANGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameUnits {
    Rows,
    Range,
}

/// A window frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowFrame {
    /// Frame units.
    pub units: FrameUnits,
    /// Start bound.
    pub start: FrameBound,
    /// End bound, present for `BETWEEN start AND end`.
    pub end: Option<FrameBound>,
}

/// A window frame bound.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameBound {
    UnboundedPreceding,
    UnboundedFollowing,
    CurrentRow,
    Preceding(Box<Expr>),
    Following(Box<Expr>),
}

/// A `WHEN ... THEN ...` arm of a `CASE` expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WhenClause {
    /// Condition (searched CASE) or comparand (simple CASE).
    pub condition: Expr,
    /// Result.
    pub result: Expr,
}

/// Special date-time functions that take no argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CurrentTimeFunction {
    Date,
    Time,
    Timestamp,
    LocalTime,
    LocalTimestamp,
}

impl CurrentTimeFunction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "CURRENT_DATE",
            Self::Time => "CURRENT_TIME",
            Self::Timestamp => "CURRENT_TIMESTAMP",
            Self::LocalTime => "LOCALTIME",
            Self::LocalTimestamp => "LOCALTIMESTAMP",
        }
    }
}

/// Unicode normal form of `NORMALIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NormalForm {
    Nfd,
    Nfc,
    Nfkd,
    Nfkc,
}

impl NormalForm {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nfd => "NFD",
            Self::Nfc => "NFC",
            Self::Nfkd => "NFKD",
            Self::Nfkc => "NFKC",
        }
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A bare column reference.
    Column(Identifier),

    /// Field access: `base.field`.
    Dereference {
        /// Expression being accessed.
        base: Box<Expr>,
        /// Field name.
        field: Identifier,
    },

    /// Subscript: `base[index]`.
    Subscript {
        /// Expression being indexed.
        base: Box<Expr>,
        /// Index expression.
        index: Box<Expr>,
    },

    /// A function call.
    Function(FunctionCall),

    /// Lambda: `x -> body` or `(x, y) -> body`.
    Lambda {
        /// Parameter names.
        params: Vec<Identifier>,
        /// Lambda body.
        body: Box<Expr>,
    },

    /// CASE expression.
    Case {
        /// The operand of a simple CASE.
        operand: Option<Box<Expr>>,
        /// WHEN/THEN clauses.
        when_clauses: Vec<WhenClause>,
        /// ELSE clause.
        else_result: Option<Box<Expr>>,
    },

    /// `CAST(expr AS type)`, or `TRY_CAST` when `safe` is set.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type.
        data_type: DataType,
        /// Whether this is TRY_CAST.
        safe: bool,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A binary expression: arithmetic, concatenation, comparison, AND, OR.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// `expr AT TIME ZONE zone`.
    AtTimeZone {
        /// The date-time value.
        expr: Box<Expr>,
        /// Interval or string literal naming the zone.
        zone: Box<Expr>,
    },

    /// BETWEEN expression.
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
    },

    /// IN with a value list.
    InList {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
        /// The values.
        list: Vec<Expr>,
    },

    /// IN with a subquery.
    InSubquery {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
        /// The subquery.
        subquery: Box<Query>,
    },

    /// LIKE expression.
    Like {
        /// The expression to match.
        expr: Box<Expr>,
        /// Whether this is NOT LIKE.
        negated: bool,
        /// Pattern.
        pattern: Box<Expr>,
        /// ESCAPE character expression.
        escape: Option<Box<Expr>>,
    },

    /// IS NULL expression.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// IS [NOT] DISTINCT FROM expression.
    IsDistinctFrom {
        /// Left operand.
        left: Box<Expr>,
        /// Whether this is IS NOT DISTINCT FROM.
        negated: bool,
        /// Right operand.
        right: Box<Expr>,
    },

    /// `left op ANY|SOME|ALL (subquery)`.
    QuantifiedComparison {
        /// Left operand.
        left: Box<Expr>,
        /// Comparison operator.
        op: BinaryOp,
        /// Quantifier.
        quantifier: ComparisonQuantifier,
        /// The subquery.
        subquery: Box<Query>,
    },

    /// `EXISTS (subquery)`.
    Exists(Box<Query>),

    /// A scalar subquery.
    Subquery(Box<Query>),

    /// `ARRAY[...]`.
    Array(Vec<Expr>),

    /// Row constructor: `(a, b, ...)` or `ROW(a, ...)`.
    Row(Vec<Expr>),

    /// `EXTRACT(field FROM expr)`.
    Extract {
        /// The field being extracted.
        field: Identifier,
        /// Source value.
        expr: Box<Expr>,
    },

    /// `POSITION(needle IN haystack)`.
    Position {
        /// Value searched for.
        needle: Box<Expr>,
        /// Value searched in.
        haystack: Box<Expr>,
    },

    /// `SUBSTRING(expr FROM start [FOR length])`.
    Substring {
        /// Source value.
        expr: Box<Expr>,
        /// Start position.
        start: Box<Expr>,
        /// Length.
        length: Option<Box<Expr>>,
    },

    /// `NORMALIZE(expr [, form])`.
    Normalize {
        /// Source value.
        expr: Box<Expr>,
        /// Normal form, if given.
        form: Option<NormalForm>,
    },

    /// CURRENT_DATE, CURRENT_TIME(p) and friends.
    CurrentTime {
        /// Which function.
        function: CurrentTimeFunction,
        /// Fractional seconds precision.
        precision: Option<u32>,
    },

    /// A `?` parameter placeholder, numbered from 1 in order of appearance.
    Parameter {
        /// 1-based position.
        position: usize,
    },
}

impl Expr {
    /// Creates a new column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(Identifier::new(name))
    }

    /// Creates a new integer literal.
    #[must_use]
    pub const fn long(value: i64) -> Self {
        Self::Literal(Literal::Long(value))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a new boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Literal(Literal::Boolean(value))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a unary expression.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Creates a field access on this expression.
    #[must_use]
    pub fn field(self, name: impl Into<String>) -> Self {
        Self::Dereference {
            base: Box::new(self),
            field: Identifier::new(name),
        }
    }

    /// Returns true if printing this expression as an operand needs
    /// parentheses to keep its shape.
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(
            self,
            Self::Unary { .. }
                | Self::Binary { .. }
                | Self::AtTimeZone { .. }
                | Self::Between { .. }
                | Self::InList { .. }
                | Self::InSubquery { .. }
                | Self::Like { .. }
                | Self::IsNull { .. }
                | Self::IsDistinctFrom { .. }
                | Self::QuantifiedComparison { .. }
                | Self::Lambda { .. }
        )
    }
}
