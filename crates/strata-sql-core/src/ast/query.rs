//! Query, select and relation AST types.

use super::{Expr, Identifier, QualifiedName, SetQuantifier};

/// A complete query: optional WITH prologue, body, ORDER BY and LIMIT.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Query {
    /// WITH clause.
    pub with: Option<With>,
    /// Query body.
    pub body: QueryBody,
    /// ORDER BY items.
    pub order_by: Vec<SortItem>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
}

impl Query {
    /// Creates a query with just a body.
    #[must_use]
    pub const fn from_body(body: QueryBody) -> Self {
        Self {
            with: None,
            body,
            order_by: Vec::new(),
            limit: None,
        }
    }
}

/// `WITH [RECURSIVE] name AS (query), ...`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct With {
    /// Whether RECURSIVE was given.
    pub recursive: bool,
    /// The named queries.
    pub queries: Vec<WithQuery>,
}

/// One named query of a WITH clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WithQuery {
    /// Name of the query.
    pub name: Identifier,
    /// Optional column aliases.
    pub columns: Vec<Identifier>,
    /// The query.
    pub query: Box<Query>,
}

/// The set-operation tree of a query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum QueryBody {
    /// `SELECT ...`.
    Select(Box<Select>),
    /// `TABLE name`.
    Table(QualifiedName),
    /// `VALUES row, ...`.
    Values(Vec<Expr>),
    /// `left UNION|INTERSECT|EXCEPT [quantifier] right`.
    SetOperation {
        /// Operator.
        op: SetOperator,
        /// DISTINCT or ALL.
        quantifier: Option<SetQuantifier>,
        /// Left operand.
        left: Box<QueryBody>,
        /// Right operand.
        right: Box<QueryBody>,
    },
    /// `( query )` without a WITH clause.
    Nested(Box<Query>),
}

/// A set operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

impl SetOperator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// A `SELECT` query specification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Select {
    /// DISTINCT or ALL.
    pub quantifier: Option<SetQuantifier>,
    /// Select list.
    pub items: Vec<SelectItem>,
    /// FROM relations, comma separated.
    pub from: Vec<Relation>,
    /// WHERE predicate.
    pub where_clause: Option<Expr>,
    /// GROUP BY clause.
    pub group_by: Option<GroupBy>,
    /// HAVING predicate.
    pub having: Option<Expr>,
}

/// An item of the select list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SelectItem {
    /// `expr [[AS] alias]`.
    Expr {
        /// The expression.
        expr: Expr,
        /// Alias.
        alias: Option<Identifier>,
    },
    /// `name.*`.
    QualifiedWildcard(QualifiedName),
    /// `*`.
    Wildcard,
}

/// `GROUP BY [quantifier] element, ...`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupBy {
    /// DISTINCT or ALL.
    pub quantifier: Option<SetQuantifier>,
    /// Grouping elements.
    pub elements: Vec<GroupingElement>,
}

/// One term of a GROUP BY clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GroupingElement {
    /// A plain expression or a parenthesised expression list.
    Expressions(Vec<Expr>),
    /// `ROLLUP (a, b, ...)`.
    Rollup(Vec<QualifiedName>),
    /// `CUBE (a, b, ...)`.
    Cube(Vec<QualifiedName>),
    /// `GROUPING SETS ((a, b), c, ...)`.
    GroupingSets(Vec<Vec<QualifiedName>>),
}

/// `expr [ASC|DESC] [NULLS FIRST|LAST]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortItem {
    /// Sort key.
    pub expr: Expr,
    /// Direction, if given.
    pub ordering: Option<Ordering>,
    /// Null placement, if given.
    pub null_ordering: Option<NullOrdering>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Ordering {
    Asc,
    Desc,
}

/// Placement of nulls in a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NullOrdering {
    First,
    Last,
}

/// `LIMIT n` or `LIMIT ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Limit {
    All,
    Count(u64),
}

/// A relation in a FROM clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Relation {
    /// A table or view name.
    Table(QualifiedName),
    /// `( query )`.
    Subquery(Box<Query>),
    /// `UNNEST(expr, ...) [WITH ORDINALITY]`.
    Unnest {
        /// Unnested expressions.
        exprs: Vec<Expr>,
        /// Whether WITH ORDINALITY was given.
        with_ordinality: bool,
    },
    /// `( relation )`.
    Parenthesized(Box<Relation>),
    /// `relation [AS] alias [(col, ...)]`.
    Aliased {
        /// The aliased relation.
        relation: Box<Relation>,
        /// Alias.
        alias: Identifier,
        /// Column aliases.
        columns: Vec<Identifier>,
    },
    /// `relation TABLESAMPLE method (percentage)`.
    Sampled {
        /// The sampled relation.
        relation: Box<Relation>,
        /// Sampling method.
        method: SampleMethod,
        /// Sample percentage.
        percentage: Box<Expr>,
    },
    /// A join of two relations.
    Join {
        /// Join kind.
        kind: JoinKind,
        /// Left side.
        left: Box<Relation>,
        /// Right side.
        right: Box<Relation>,
        /// ON, USING or NATURAL; absent for CROSS joins and bare joins.
        criteria: Option<JoinCriteria>,
    },
}

/// Sampling method of TABLESAMPLE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SampleMethod {
    Bernoulli,
    System,
    Poissonized,
}

impl SampleMethod {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bernoulli => "BERNOULLI",
            Self::System => "SYSTEM",
            Self::Poissonized => "POISSONIZED",
        }
    }
}

/// Join types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinKind {
    Cross,
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    /// Returns the SQL keywords introducing the join.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cross => "CROSS JOIN",
            Self::Inner => "JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
        }
    }
}

/// Join criteria.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinCriteria {
    /// `ON predicate`.
    On(Expr),
    /// `USING (col, ...)`.
    Using(Vec<Identifier>),
    /// `NATURAL` join.
    Natural,
}
