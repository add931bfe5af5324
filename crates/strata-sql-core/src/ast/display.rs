//! Canonical SQL rendering of the AST.
//!
//! The output of every `Display` impl here parses back into an equal tree.

use core::fmt;

use super::identifier::{can_be_bare, write_quoted};
use super::types::MULTI_WORD_TYPES;
use super::{
    CallArgument, ColumnDefinition, DataType, ExplainFormat, ExplainOption, ExplainType, Expr,
    FrameBound, FrameUnits, FunctionArgs, FunctionCall, GroupBy, GroupingElement, IntervalLiteral,
    IntervalSign, JoinCriteria, JoinKind, LikeProperties, Limit, Literal, NullOrdering, Ordering,
    Privilege, Property, Query, QueryBody, Relation, RowField, Select, SelectItem, SortItem,
    Statement, TableElement, TransactionMode, TypeParameter, UnaryOp, Window, WindowFrame, With,
    WithQuery,
};

/// Writes items separated by `", "`.
struct Commas<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for Commas<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Writes an expression, parenthesised when it is an operator expression.
struct Operand<'a>(&'a Expr);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_compound() {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Writes the base of a dereference or subscript. Forms that close their
/// own delimiters are written bare.
struct Base<'a>(&'a Expr);

impl fmt::Display for Base<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Column(_)
            | Expr::Dereference { .. }
            | Expr::Subscript { .. }
            | Expr::Function(_)
            | Expr::Subquery(_)
            | Expr::Exists(_)
            | Expr::Cast { .. }
            | Expr::Case { .. }
            | Expr::Array(_)
            | Expr::Row(_)
            | Expr::Extract { .. }
            | Expr::Position { .. }
            | Expr::Substring { .. }
            | Expr::Normalize { .. }
            | Expr::CurrentTime { .. } => write!(f, "{}", self.0),
            other => write!(f, "({other})"),
        }
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    write!(f, "'{}'", value.replace('\'', "''"))
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Long(value) => write!(f, "{value}"),
            Self::Double(value) => write!(f, "{value:E}"),
            Self::Decimal(text) => f.write_str(text),
            Self::String(value) => write_string(f, value),
            Self::Binary(bytes) => {
                f.write_str("X'")?;
                for byte in bytes {
                    write!(f, "{byte:02X}")?;
                }
                f.write_str("'")
            }
            Self::Interval(interval) => write!(f, "{interval}"),
            Self::Typed { type_name, value } => {
                write!(f, "{type_name} ")?;
                write_string(f, value)
            }
        }
    }
}

impl fmt::Display for IntervalLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("INTERVAL ")?;
        if self.sign == IntervalSign::Negative {
            f.write_str("-")?;
        }
        write_string(f, &self.value)?;
        write!(f, " {}", self.start.as_str())?;
        if let Some(end) = &self.end {
            write!(f, " TO {}", end.as_str())?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Column(name) => write!(f, "{name}"),
            Self::Dereference { base, field } => write!(f, "{}.{field}", Base(base)),
            Self::Subscript { base, index } => write!(f, "{}[{index}]", Base(base)),
            Self::Function(call) => write!(f, "{call}"),
            Self::Lambda { params, body } => {
                if params.len() == 1 {
                    write!(f, "{} -> {body}", params[0])
                } else {
                    write!(f, "({}) -> {body}", Commas(params))
                }
            }
            Self::Case {
                operand,
                when_clauses,
                else_result,
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {}", Operand(operand))?;
                }
                for clause in when_clauses {
                    write!(f, " WHEN {} THEN {}", clause.condition, clause.result)?;
                }
                if let Some(else_result) = else_result {
                    write!(f, " ELSE {else_result}")?;
                }
                f.write_str(" END")
            }
            Self::Cast {
                expr,
                data_type,
                safe,
            } => {
                let name = if *safe { "TRY_CAST" } else { "CAST" };
                write!(f, "{name}({expr} AS {data_type})")
            }
            Self::Unary { op, operand } => match op {
                UnaryOp::Not => write!(f, "NOT {}", Operand(operand)),
                _ => write!(f, "{}{}", op.as_str(), Operand(operand)),
            },
            Self::Binary { left, op, right } => {
                write!(f, "{} {} {}", Operand(left), op.as_str(), Operand(right))
            }
            Self::AtTimeZone { expr, zone } => {
                write!(f, "{} AT TIME ZONE {zone}", Operand(expr))
            }
            Self::Between {
                expr,
                negated,
                low,
                high,
            } => write!(
                f,
                "{}{} BETWEEN {} AND {}",
                Operand(expr),
                not(*negated),
                Operand(low),
                Operand(high)
            ),
            Self::InList {
                expr,
                negated,
                list,
            } => write!(f, "{}{} IN ({})", Operand(expr), not(*negated), Commas(list)),
            Self::InSubquery {
                expr,
                negated,
                subquery,
            } => write!(f, "{}{} IN ({subquery})", Operand(expr), not(*negated)),
            Self::Like {
                expr,
                negated,
                pattern,
                escape,
            } => {
                write!(f, "{}{} LIKE {}", Operand(expr), not(*negated), Operand(pattern))?;
                if let Some(escape) = escape {
                    write!(f, " ESCAPE {}", Operand(escape))?;
                }
                Ok(())
            }
            Self::IsNull { expr, negated } => {
                let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
                write!(f, "{} {keyword}", Operand(expr))
            }
            Self::IsDistinctFrom {
                left,
                negated,
                right,
            } => {
                let keyword = if *negated {
                    "IS NOT DISTINCT FROM"
                } else {
                    "IS DISTINCT FROM"
                };
                write!(f, "{} {keyword} {}", Operand(left), Operand(right))
            }
            Self::QuantifiedComparison {
                left,
                op,
                quantifier,
                subquery,
            } => write!(
                f,
                "{} {} {} ({subquery})",
                Operand(left),
                op.as_str(),
                quantifier.as_str()
            ),
            Self::Exists(query) => write!(f, "EXISTS ({query})"),
            Self::Subquery(query) => write!(f, "({query})"),
            Self::Array(items) => write!(f, "ARRAY[{}]", Commas(items)),
            Self::Row(items) => write!(f, "ROW ({})", Commas(items)),
            Self::Extract { field, expr } => {
                write!(f, "EXTRACT({field} FROM {})", Operand(expr))
            }
            Self::Position { needle, haystack } => {
                write!(f, "POSITION({} IN {})", Operand(needle), Operand(haystack))
            }
            Self::Substring {
                expr,
                start,
                length,
            } => {
                write!(f, "SUBSTRING({} FROM {}", Operand(expr), Operand(start))?;
                if let Some(length) = length {
                    write!(f, " FOR {}", Operand(length))?;
                }
                f.write_str(")")
            }
            Self::Normalize { expr, form } => {
                write!(f, "NORMALIZE({}", Operand(expr))?;
                if let Some(form) = form {
                    write!(f, ", {}", form.as_str())?;
                }
                f.write_str(")")
            }
            Self::CurrentTime {
                function,
                precision,
            } => {
                f.write_str(function.as_str())?;
                if let Some(precision) = precision {
                    write!(f, "({precision})")?;
                }
                Ok(())
            }
            Self::Parameter { .. } => f.write_str("?"),
        }
    }
}

const fn not(negated: bool) -> &'static str {
    if negated {
        " NOT"
    } else {
        ""
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        match &self.args {
            FunctionArgs::Wildcard => f.write_str("*")?,
            FunctionArgs::Exprs { quantifier, args } => {
                if let Some(quantifier) = quantifier {
                    write!(f, "{} ", quantifier.as_str())?;
                }
                write!(f, "{}", Commas(args))?;
            }
        }
        f.write_str(")")?;
        if let Some(filter) = &self.filter {
            write!(f, " FILTER (WHERE {filter})")?;
        }
        if let Some(window) = &self.window {
            write!(f, " OVER ({window})")?;
        }
        Ok(())
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.partition_by.is_empty() {
            parts.push(format!("PARTITION BY {}", Commas(&self.partition_by)));
        }
        if !self.order_by.is_empty() {
            parts.push(format!("ORDER BY {}", Commas(&self.order_by)));
        }
        if let Some(frame) = &self.frame {
            parts.push(frame.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = match self.units {
            FrameUnits::Rows => "ROWS",
            FrameUnits::Range => "RANGE",
        };
        match &self.end {
            Some(end) => write!(f, "{units} BETWEEN {} AND {end}", self.start),
            None => write!(f, "{units} {}", self.start),
        }
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Preceding(expr) => write!(f, "{} PRECEDING", Operand(expr)),
            Self::Following(expr) => write!(f, "{} FOLLOWING", Operand(expr)),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(element) => write!(f, "ARRAY<{element}>"),
            Self::Map(key, value) => write!(f, "MAP<{key}, {value}>"),
            Self::Row(fields) => write!(f, "ROW({})", Commas(fields)),
            Self::Base { name, parameters } => {
                let bare = MULTI_WORD_TYPES.contains(&name.as_str())
                    || (*name == name.to_ascii_uppercase() && can_be_bare(name));
                if bare {
                    f.write_str(name)?;
                } else {
                    write_quoted(f, name)?;
                }
                if !parameters.is_empty() {
                    write!(f, "({})", Commas(parameters))?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)
    }
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Type(data_type) => write!(f, "{data_type}"),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        write!(f, "{}", self.body)?;
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", Commas(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        Ok(())
    }
}

impl fmt::Display for With {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        if self.recursive {
            f.write_str("RECURSIVE ")?;
        }
        write!(f, "{}", Commas(&self.queries))
    }
}

impl fmt::Display for WithQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", Commas(&self.columns))?;
        }
        write!(f, " AS ({})", self.query)
    }
}

impl fmt::Display for QueryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(select) => write!(f, "{select}"),
            Self::Table(name) => write!(f, "TABLE {name}"),
            Self::Values(rows) => write!(f, "VALUES {}", Commas(rows)),
            Self::SetOperation {
                op,
                quantifier,
                left,
                right,
            } => {
                write!(f, "{left} {}", op.as_str())?;
                if let Some(quantifier) = quantifier {
                    write!(f, " {}", quantifier.as_str())?;
                }
                write!(f, " {right}")
            }
            Self::Nested(query) => write!(f, "({query})"),
        }
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if let Some(quantifier) = &self.quantifier {
            write!(f, "{} ", quantifier.as_str())?;
        }
        write!(f, "{}", Commas(&self.items))?;
        if !self.from.is_empty() {
            write!(f, " FROM {}", Commas(&self.from))?;
        }
        if let Some(predicate) = &self.where_clause {
            write!(f, " WHERE {predicate}")?;
        }
        if let Some(group_by) = &self.group_by {
            write!(f, " GROUP BY {group_by}")?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr { expr, alias } => {
                write!(f, "{expr}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            Self::QualifiedWildcard(name) => write!(f, "{name}.*"),
            Self::Wildcard => f.write_str("*"),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(quantifier) = &self.quantifier {
            write!(f, "{} ", quantifier.as_str())?;
        }
        write!(f, "{}", Commas(&self.elements))
    }
}

impl fmt::Display for GroupingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expressions(exprs) => write!(f, "({})", Commas(exprs)),
            Self::Rollup(names) => write!(f, "ROLLUP ({})", Commas(names)),
            Self::Cube(names) => write!(f, "CUBE ({})", Commas(names)),
            Self::GroupingSets(sets) => {
                f.write_str("GROUPING SETS (")?;
                for (i, set) in sets.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "({})", Commas(set))?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for SortItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.ordering {
            Some(Ordering::Asc) => f.write_str(" ASC")?,
            Some(Ordering::Desc) => f.write_str(" DESC")?,
            None => {}
        }
        match self.null_ordering {
            Some(NullOrdering::First) => f.write_str(" NULLS FIRST")?,
            Some(NullOrdering::Last) => f.write_str(" NULLS LAST")?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(name) => write!(f, "{name}"),
            Self::Subquery(query) => write!(f, "({query})"),
            Self::Unnest {
                exprs,
                with_ordinality,
            } => {
                write!(f, "UNNEST({})", Commas(exprs))?;
                if *with_ordinality {
                    f.write_str(" WITH ORDINALITY")?;
                }
                Ok(())
            }
            Self::Parenthesized(relation) => write!(f, "({relation})"),
            Self::Aliased {
                relation,
                alias,
                columns,
            } => {
                write!(f, "{relation} AS {alias}")?;
                if !columns.is_empty() {
                    write!(f, " ({})", Commas(columns))?;
                }
                Ok(())
            }
            Self::Sampled {
                relation,
                method,
                percentage,
            } => write!(
                f,
                "{relation} TABLESAMPLE {} ({percentage})",
                method.as_str()
            ),
            Self::Join {
                kind,
                left,
                right,
                criteria,
            } => match criteria {
                Some(JoinCriteria::Natural) => {
                    write!(f, "{left} NATURAL {} {right}", kind.as_str())
                }
                Some(JoinCriteria::On(predicate)) => {
                    write!(f, "{left} {} {right} ON {predicate}", kind.as_str())
                }
                Some(JoinCriteria::Using(columns)) => write!(
                    f,
                    "{left} {} {right} USING ({})",
                    kind.as_str(),
                    Commas(columns)
                ),
                None => write!(f, "{left} {} {right}", kind.as_str()),
            },
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if let Some(comment) = &self.comment {
            f.write_str(" COMMENT ")?;
            write_string(f, comment)?;
        }
        Ok(())
    }
}

impl fmt::Display for TableElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => write!(f, "{column}"),
            Self::Like { table, properties } => {
                write!(f, "LIKE {table}")?;
                match properties {
                    Some(LikeProperties::Including) => f.write_str(" INCLUDING PROPERTIES"),
                    Some(LikeProperties::Excluding) => f.write_str(" EXCLUDING PROPERTIES"),
                    None => Ok(()),
                }
            }
        }
    }
}

impl fmt::Display for CallArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name} => ")?;
        }
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => f.write_str("SELECT"),
            Self::Delete => f.write_str("DELETE"),
            Self::Insert => f.write_str("INSERT"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for ExplainOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(format) => f.write_str(match format {
                ExplainFormat::Text => "FORMAT TEXT",
                ExplainFormat::Graphviz => "FORMAT GRAPHVIZ",
                ExplainFormat::Json => "FORMAT JSON",
            }),
            Self::Type(kind) => f.write_str(match kind {
                ExplainType::Logical => "TYPE LOGICAL",
                ExplainType::Distributed => "TYPE DISTRIBUTED",
                ExplainType::Validate => "TYPE VALIDATE",
            }),
        }
    }
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isolation(level) => write!(f, "ISOLATION LEVEL {}", level.as_str()),
            Self::ReadOnly => f.write_str("READ ONLY"),
            Self::ReadWrite => f.write_str("READ WRITE"),
        }
    }
}

struct Privileges<'a>(Option<&'a [Privilege]>);

impl fmt::Display for Privileges<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(privileges) => write!(f, "{}", Commas(privileges)),
            None => f.write_str("ALL PRIVILEGES"),
        }
    }
}

fn write_properties(f: &mut fmt::Formatter<'_>, properties: &[Property]) -> fmt::Result {
    if properties.is_empty() {
        Ok(())
    } else {
        write!(f, " WITH ({})", Commas(properties))
    }
}

fn write_like(f: &mut fmt::Formatter<'_>, pattern: Option<&str>) -> fmt::Result {
    if let Some(pattern) = pattern {
        f.write_str(" LIKE ")?;
        write_string(f, pattern)?;
    }
    Ok(())
}

const fn if_exists(flag: bool) -> &'static str {
    if flag {
        " IF EXISTS"
    } else {
        ""
    }
}

const fn if_not_exists(flag: bool) -> &'static str {
    if flag {
        " IF NOT EXISTS"
    } else {
        ""
    }
}

const fn table_keyword(flag: bool) -> &'static str {
    if flag {
        " TABLE"
    } else {
        ""
    }
}

impl fmt::Display for Statement {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(query) => write!(f, "{query}"),
            Self::Use { catalog, schema } => match catalog {
                Some(catalog) => write!(f, "USE {catalog}.{schema}"),
                None => write!(f, "USE {schema}"),
            },
            Self::CreateSchema {
                name,
                if_not_exists: flag,
                properties,
            } => {
                write!(f, "CREATE SCHEMA{} {name}", if_not_exists(*flag))?;
                write_properties(f, properties)
            }
            Self::DropSchema {
                name,
                if_exists: flag,
                cascade,
            } => {
                write!(f, "DROP SCHEMA{} {name}", if_exists(*flag))?;
                if *cascade {
                    f.write_str(" CASCADE")?;
                }
                Ok(())
            }
            Self::RenameSchema { name, new_name } => {
                write!(f, "ALTER SCHEMA {name} RENAME TO {new_name}")
            }
            Self::CreateTableAsSelect {
                name,
                if_not_exists: flag,
                properties,
                query,
                with_data,
            } => {
                write!(f, "CREATE TABLE{} {name}", if_not_exists(*flag))?;
                write_properties(f, properties)?;
                write!(f, " AS {query}")?;
                if !with_data {
                    f.write_str(" WITH NO DATA")?;
                }
                Ok(())
            }
            Self::CreateTable {
                name,
                if_not_exists: flag,
                elements,
                properties,
            } => {
                write!(
                    f,
                    "CREATE TABLE{} {name} ({})",
                    if_not_exists(*flag),
                    Commas(elements)
                )?;
                write_properties(f, properties)
            }
            Self::DropTable {
                name,
                if_exists: flag,
            } => write!(f, "DROP TABLE{} {name}", if_exists(*flag)),
            Self::Insert {
                table,
                columns,
                query,
            } => {
                write!(f, "INSERT INTO {table}")?;
                if !columns.is_empty() {
                    write!(f, " ({})", Commas(columns))?;
                }
                write!(f, " {query}")
            }
            Self::Delete {
                table,
                where_clause,
            } => {
                write!(f, "DELETE FROM {table}")?;
                if let Some(predicate) = where_clause {
                    write!(f, " WHERE {predicate}")?;
                }
                Ok(())
            }
            Self::RenameTable { source, target } => {
                write!(f, "ALTER TABLE {source} RENAME TO {target}")
            }
            Self::RenameColumn {
                table,
                source,
                target,
            } => write!(f, "ALTER TABLE {table} RENAME COLUMN {source} TO {target}"),
            Self::AddColumn { table, column } => {
                write!(f, "ALTER TABLE {table} ADD COLUMN {column}")
            }
            Self::DropColumn { table, column } => {
                write!(f, "ALTER TABLE {table} DROP COLUMN {column}")
            }
            Self::CreateView {
                name,
                replace,
                query,
            } => {
                let replace = if *replace { " OR REPLACE" } else { "" };
                write!(f, "CREATE{replace} VIEW {name} AS {query}")
            }
            Self::DropView {
                name,
                if_exists: flag,
            } => write!(f, "DROP VIEW{} {name}", if_exists(*flag)),
            Self::Call { name, arguments } => write!(f, "CALL {name}({})", Commas(arguments)),
            Self::Grant {
                privileges,
                table_keyword: flag,
                name,
                grantee,
                with_grant_option,
            } => {
                write!(
                    f,
                    "GRANT {} ON{} {name} TO {grantee}",
                    Privileges(privileges.as_deref()),
                    table_keyword(*flag)
                )?;
                if *with_grant_option {
                    f.write_str(" WITH GRANT OPTION")?;
                }
                Ok(())
            }
            Self::Revoke {
                grant_option_for,
                privileges,
                table_keyword: flag,
                name,
                grantee,
            } => {
                f.write_str("REVOKE ")?;
                if *grant_option_for {
                    f.write_str("GRANT OPTION FOR ")?;
                }
                write!(
                    f,
                    "{} ON{} {name} FROM {grantee}",
                    Privileges(privileges.as_deref()),
                    table_keyword(*flag)
                )
            }
            Self::Explain {
                analyze,
                options,
                statement,
            } => {
                f.write_str("EXPLAIN ")?;
                if *analyze {
                    f.write_str("ANALYZE ")?;
                }
                if !options.is_empty() {
                    write!(f, "({}) ", Commas(options))?;
                }
                write!(f, "{statement}")
            }
            Self::ShowCreateTable(name) => write!(f, "SHOW CREATE TABLE {name}"),
            Self::ShowCreateView(name) => write!(f, "SHOW CREATE VIEW {name}"),
            Self::ShowTables {
                schema,
                like_pattern,
            } => {
                f.write_str("SHOW TABLES")?;
                if let Some(schema) = schema {
                    write!(f, " FROM {schema}")?;
                }
                write_like(f, like_pattern.as_deref())
            }
            Self::ShowSchemas {
                catalog,
                like_pattern,
            } => {
                f.write_str("SHOW SCHEMAS")?;
                if let Some(catalog) = catalog {
                    write!(f, " FROM {catalog}")?;
                }
                write_like(f, like_pattern.as_deref())
            }
            Self::ShowCatalogs { like_pattern } => {
                f.write_str("SHOW CATALOGS")?;
                write_like(f, like_pattern.as_deref())
            }
            Self::ShowColumns(name) => write!(f, "SHOW COLUMNS FROM {name}"),
            Self::ShowStats(name) => write!(f, "SHOW STATS FOR {name}"),
            Self::ShowFunctions => f.write_str("SHOW FUNCTIONS"),
            Self::ShowSession => f.write_str("SHOW SESSION"),
            Self::ShowPartitions {
                table,
                where_clause,
                order_by,
                limit,
            } => {
                write!(f, "SHOW PARTITIONS FROM {table}")?;
                if let Some(predicate) = where_clause {
                    write!(f, " WHERE {predicate}")?;
                }
                if !order_by.is_empty() {
                    write!(f, " ORDER BY {}", Commas(order_by))?;
                }
                if let Some(limit) = limit {
                    write!(f, " LIMIT {limit}")?;
                }
                Ok(())
            }
            Self::ShowGrants { table } => match table {
                Some(table) => write!(f, "SHOW GRANTS ON TABLE {table}"),
                None => f.write_str("SHOW GRANTS"),
            },
            Self::SetSession { name, value } => write!(f, "SET SESSION {name} = {value}"),
            Self::ResetSession(name) => write!(f, "RESET SESSION {name}"),
            Self::StartTransaction(modes) => {
                f.write_str("START TRANSACTION")?;
                if !modes.is_empty() {
                    write!(f, " {}", Commas(modes))?;
                }
                Ok(())
            }
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback => f.write_str("ROLLBACK"),
            Self::Prepare { name, statement } => write!(f, "PREPARE {name} FROM {statement}"),
            Self::Deallocate(name) => write!(f, "DEALLOCATE PREPARE {name}"),
            Self::Execute { name, parameters } => {
                write!(f, "EXECUTE {name}")?;
                if !parameters.is_empty() {
                    write!(f, " USING {}", Commas(parameters))?;
                }
                Ok(())
            }
            Self::DescribeInput(name) => write!(f, "DESCRIBE INPUT {name}"),
            Self::DescribeOutput(name) => write!(f, "DESCRIBE OUTPUT {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Identifier, QualifiedName};

    #[test]
    fn test_literals() {
        assert_eq!(Literal::Null.to_string(), "NULL");
        assert_eq!(Literal::Double(1.5).to_string(), "1.5E0");
        assert_eq!(Literal::String(String::from("it's")).to_string(), "'it''s'");
        assert_eq!(Literal::Binary(vec![0xCA, 0xFE]).to_string(), "X'CAFE'");
    }

    #[test]
    fn test_nested_operators_are_parenthesised() {
        let sum = Expr::column("a").binary(BinaryOp::Add, Expr::column("b"));
        let product = sum.binary(BinaryOp::Mul, Expr::column("c"));
        assert_eq!(product.to_string(), "(a + b) * c");

        let negated = Expr::unary(UnaryOp::Minus, Expr::unary(UnaryOp::Minus, Expr::long(1)));
        assert_eq!(negated.to_string(), "-(-1)");
    }

    #[test]
    fn test_base_types() {
        let varchar = DataType::Base {
            name: String::from("VARCHAR"),
            parameters: vec![TypeParameter::Integer(10)],
        };
        assert_eq!(varchar.to_string(), "VARCHAR(10)");
        assert_eq!(DataType::named("bigint").to_string(), "\"bigint\"");
        assert_eq!(
            DataType::named("TIMESTAMP WITH TIME ZONE").to_string(),
            "TIMESTAMP WITH TIME ZONE"
        );
        assert_eq!(
            DataType::named("INTEGER").array_of().array_of().to_string(),
            "ARRAY<ARRAY<INTEGER>>"
        );
    }

    #[test]
    fn test_statement_rendering() {
        let statement = Statement::DropTable {
            name: QualifiedName::single(Identifier::new("orders")),
            if_exists: true,
        };
        assert_eq!(statement.to_string(), "DROP TABLE IF EXISTS orders");
        assert_eq!(
            Statement::Deallocate(Identifier::new("q1")).to_string(),
            "DEALLOCATE PREPARE q1"
        );
    }

    #[test]
    fn test_query_rendering() {
        let table = QueryBody::Table(QualifiedName::single(Identifier::new("t")));
        let mut query = Query::from_body(table);
        assert_eq!(query.to_string(), "TABLE t");
        query.limit = Some(Limit::All);
        assert_eq!(query.to_string(), "TABLE t LIMIT ALL");
    }
}
