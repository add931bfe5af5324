//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node is a plain owned value; operator precedence is encoded in the
//! shape of the tree. `Display` renders any node back to SQL.

mod display;
mod expression;
mod identifier;
mod query;
mod statement;
mod types;
pub mod visit;

pub use expression::{
    BinaryOp, ComparisonQuantifier, CurrentTimeFunction, Expr, FrameBound, FrameUnits,
    FunctionArgs, FunctionCall, IntervalField, IntervalLiteral, IntervalSign, Literal, NormalForm,
    SetQuantifier, UnaryOp, WhenClause, Window, WindowFrame,
};
pub use identifier::{Identifier, QualifiedName};
pub use query::{
    GroupBy, GroupingElement, JoinCriteria, JoinKind, Limit, NullOrdering, Ordering, Query,
    QueryBody, Relation, SampleMethod, Select, SelectItem, SetOperator, SortItem, With, WithQuery,
};
pub use statement::{
    CallArgument, ColumnDefinition, ExplainFormat, ExplainOption, ExplainType, IsolationLevel,
    LikeProperties, Privilege, Property, Statement, TableElement, TransactionMode,
};
pub use types::{DataType, RowField, TypeParameter};
