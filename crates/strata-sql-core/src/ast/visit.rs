//! Read-only traversal of the AST.
//!
//! Implement [`Visitor`] and override the methods for the nodes of interest.
//! Every method defaults to the matching `walk_*` function, which visits the
//! node's children in source order. An override that still wants the
//! children visited calls the `walk_*` function itself.
//!
//! ```
//! use strata_sql_core::ast::visit::{self, Visitor};
//! use strata_sql_core::ast::{Expr, QualifiedName};
//!
//! #[derive(Default)]
//! struct Tables(Vec<String>);
//!
//! impl<'ast> Visitor<'ast> for Tables {
//!     fn visit_table_name(&mut self, name: &'ast QualifiedName) {
//!         self.0.push(name.to_string());
//!     }
//! }
//!
//! let statement = strata_sql_core::parse_statement(
//!     "SELECT * FROM a JOIN b ON a.id = b.id WHERE a.x IN (SELECT y FROM c)",
//! )
//! .unwrap();
//! let mut tables = Tables::default();
//! tables.visit_statement(&statement);
//! assert_eq!(tables.0, ["a", "b", "c"]);
//! ```

use super::{
    DataType, Expr, FrameBound, FunctionArgs, FunctionCall, GroupingElement, Identifier,
    JoinCriteria, QualifiedName, Query, QueryBody, Relation, Select, SelectItem, SortItem,
    Statement, TableElement, TypeParameter, Window,
};

/// A visitor over borrowed AST nodes.
pub trait Visitor<'ast> {
    fn visit_statement(&mut self, statement: &'ast Statement) {
        walk_statement(self, statement);
    }

    fn visit_query(&mut self, query: &'ast Query) {
        walk_query(self, query);
    }

    fn visit_query_body(&mut self, body: &'ast QueryBody) {
        walk_query_body(self, body);
    }

    fn visit_select(&mut self, select: &'ast Select) {
        walk_select(self, select);
    }

    fn visit_select_item(&mut self, item: &'ast SelectItem) {
        walk_select_item(self, item);
    }

    fn visit_relation(&mut self, relation: &'ast Relation) {
        walk_relation(self, relation);
    }

    /// Called for names that denote a table or view in a FROM clause,
    /// `TABLE name`, or a statement target.
    fn visit_table_name(&mut self, name: &'ast QualifiedName) {
        self.visit_qualified_name(name);
    }

    fn visit_join_criteria(&mut self, criteria: &'ast JoinCriteria) {
        walk_join_criteria(self, criteria);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    fn visit_function_call(&mut self, call: &'ast FunctionCall) {
        walk_function_call(self, call);
    }

    fn visit_window(&mut self, window: &'ast Window) {
        walk_window(self, window);
    }

    fn visit_sort_item(&mut self, item: &'ast SortItem) {
        self.visit_expr(&item.expr);
    }

    fn visit_data_type(&mut self, data_type: &'ast DataType) {
        walk_data_type(self, data_type);
    }

    fn visit_identifier(&mut self, _identifier: &'ast Identifier) {}

    fn visit_qualified_name(&mut self, name: &'ast QualifiedName) {
        for part in name.parts() {
            self.visit_identifier(part);
        }
    }
}

#[allow(clippy::too_many_lines)]
pub fn walk_statement<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, statement: &'ast Statement) {
    match statement {
        Statement::Query(query) => v.visit_query(query),
        Statement::Use { catalog, schema } => {
            if let Some(catalog) = catalog {
                v.visit_identifier(catalog);
            }
            v.visit_identifier(schema);
        }
        Statement::CreateSchema {
            name, properties, ..
        } => {
            v.visit_qualified_name(name);
            for property in properties {
                v.visit_identifier(&property.name);
                v.visit_expr(&property.value);
            }
        }
        Statement::DropSchema { name, .. } => v.visit_qualified_name(name),
        Statement::RenameSchema { name, new_name } => {
            v.visit_qualified_name(name);
            v.visit_identifier(new_name);
        }
        Statement::CreateTableAsSelect {
            name,
            properties,
            query,
            ..
        } => {
            v.visit_table_name(name);
            for property in properties {
                v.visit_identifier(&property.name);
                v.visit_expr(&property.value);
            }
            v.visit_query(query);
        }
        Statement::CreateTable {
            name,
            elements,
            properties,
            ..
        } => {
            v.visit_table_name(name);
            for element in elements {
                match element {
                    TableElement::Column(column) => {
                        v.visit_identifier(&column.name);
                        v.visit_data_type(&column.data_type);
                    }
                    TableElement::Like { table, .. } => v.visit_table_name(table),
                }
            }
            for property in properties {
                v.visit_identifier(&property.name);
                v.visit_expr(&property.value);
            }
        }
        Statement::DropTable { name, .. }
        | Statement::DropView { name, .. }
        | Statement::ShowCreateTable(name)
        | Statement::ShowCreateView(name)
        | Statement::ShowColumns(name)
        | Statement::ShowStats(name) => v.visit_table_name(name),
        Statement::Insert {
            table,
            columns,
            query,
        } => {
            v.visit_table_name(table);
            for column in columns {
                v.visit_identifier(column);
            }
            v.visit_query(query);
        }
        Statement::Delete {
            table,
            where_clause,
        } => {
            v.visit_table_name(table);
            if let Some(predicate) = where_clause {
                v.visit_expr(predicate);
            }
        }
        Statement::RenameTable { source, target } => {
            v.visit_table_name(source);
            v.visit_table_name(target);
        }
        Statement::RenameColumn {
            table,
            source,
            target,
        } => {
            v.visit_table_name(table);
            v.visit_identifier(source);
            v.visit_identifier(target);
        }
        Statement::AddColumn { table, column } => {
            v.visit_table_name(table);
            v.visit_identifier(&column.name);
            v.visit_data_type(&column.data_type);
        }
        Statement::DropColumn { table, column } => {
            v.visit_table_name(table);
            v.visit_identifier(column);
        }
        Statement::CreateView { name, query, .. } => {
            v.visit_table_name(name);
            v.visit_query(query);
        }
        Statement::Call { name, arguments } => {
            v.visit_qualified_name(name);
            for argument in arguments {
                if let Some(name) = &argument.name {
                    v.visit_identifier(name);
                }
                v.visit_expr(&argument.value);
            }
        }
        Statement::Grant { name, grantee, .. } | Statement::Revoke { name, grantee, .. } => {
            v.visit_table_name(name);
            v.visit_identifier(grantee);
        }
        Statement::Explain { statement, .. } | Statement::Prepare { statement, .. } => {
            v.visit_statement(statement);
        }
        Statement::ShowTables { schema, .. } => {
            if let Some(schema) = schema {
                v.visit_qualified_name(schema);
            }
        }
        Statement::ShowSchemas { catalog, .. } => {
            if let Some(catalog) = catalog {
                v.visit_identifier(catalog);
            }
        }
        Statement::ShowPartitions {
            table,
            where_clause,
            order_by,
            ..
        } => {
            v.visit_table_name(table);
            if let Some(predicate) = where_clause {
                v.visit_expr(predicate);
            }
            for item in order_by {
                v.visit_sort_item(item);
            }
        }
        Statement::ShowGrants { table } => {
            if let Some(table) = table {
                v.visit_table_name(table);
            }
        }
        Statement::SetSession { name, value } => {
            v.visit_qualified_name(name);
            v.visit_expr(value);
        }
        Statement::ResetSession(name) => v.visit_qualified_name(name),
        Statement::Execute { name, parameters } => {
            v.visit_identifier(name);
            for parameter in parameters {
                v.visit_expr(parameter);
            }
        }
        Statement::Deallocate(name)
        | Statement::DescribeInput(name)
        | Statement::DescribeOutput(name) => v.visit_identifier(name),
        Statement::ShowCatalogs { .. }
        | Statement::ShowFunctions
        | Statement::ShowSession
        | Statement::StartTransaction(_)
        | Statement::Commit
        | Statement::Rollback => {}
    }
}

pub fn walk_query<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, query: &'ast Query) {
    if let Some(with) = &query.with {
        for named in &with.queries {
            v.visit_identifier(&named.name);
            for column in &named.columns {
                v.visit_identifier(column);
            }
            v.visit_query(&named.query);
        }
    }
    v.visit_query_body(&query.body);
    for item in &query.order_by {
        v.visit_sort_item(item);
    }
}

pub fn walk_query_body<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, body: &'ast QueryBody) {
    match body {
        QueryBody::Select(select) => v.visit_select(select),
        QueryBody::Table(name) => v.visit_table_name(name),
        QueryBody::Values(rows) => {
            for row in rows {
                v.visit_expr(row);
            }
        }
        QueryBody::SetOperation { left, right, .. } => {
            v.visit_query_body(left);
            v.visit_query_body(right);
        }
        QueryBody::Nested(query) => v.visit_query(query),
    }
}

pub fn walk_select<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, select: &'ast Select) {
    for item in &select.items {
        v.visit_select_item(item);
    }
    for relation in &select.from {
        v.visit_relation(relation);
    }
    if let Some(predicate) = &select.where_clause {
        v.visit_expr(predicate);
    }
    if let Some(group_by) = &select.group_by {
        for element in &group_by.elements {
            match element {
                GroupingElement::Expressions(exprs) => {
                    for expr in exprs {
                        v.visit_expr(expr);
                    }
                }
                GroupingElement::Rollup(names) | GroupingElement::Cube(names) => {
                    for name in names {
                        v.visit_qualified_name(name);
                    }
                }
                GroupingElement::GroupingSets(sets) => {
                    for name in sets.iter().flatten() {
                        v.visit_qualified_name(name);
                    }
                }
            }
        }
    }
    if let Some(having) = &select.having {
        v.visit_expr(having);
    }
}

pub fn walk_select_item<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, item: &'ast SelectItem) {
    match item {
        SelectItem::Expr { expr, alias } => {
            v.visit_expr(expr);
            if let Some(alias) = alias {
                v.visit_identifier(alias);
            }
        }
        SelectItem::QualifiedWildcard(name) => v.visit_qualified_name(name),
        SelectItem::Wildcard => {}
    }
}

pub fn walk_relation<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, relation: &'ast Relation) {
    match relation {
        Relation::Table(name) => v.visit_table_name(name),
        Relation::Subquery(query) => v.visit_query(query),
        Relation::Unnest { exprs, .. } => {
            for expr in exprs {
                v.visit_expr(expr);
            }
        }
        Relation::Parenthesized(inner) => v.visit_relation(inner),
        Relation::Aliased {
            relation,
            alias,
            columns,
        } => {
            v.visit_relation(relation);
            v.visit_identifier(alias);
            for column in columns {
                v.visit_identifier(column);
            }
        }
        Relation::Sampled {
            relation,
            percentage,
            ..
        } => {
            v.visit_relation(relation);
            v.visit_expr(percentage);
        }
        Relation::Join {
            left,
            right,
            criteria,
            ..
        } => {
            v.visit_relation(left);
            v.visit_relation(right);
            if let Some(criteria) = criteria {
                v.visit_join_criteria(criteria);
            }
        }
    }
}

pub fn walk_join_criteria<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, criteria: &'ast JoinCriteria) {
    match criteria {
        JoinCriteria::On(predicate) => v.visit_expr(predicate),
        JoinCriteria::Using(columns) => {
            for column in columns {
                v.visit_identifier(column);
            }
        }
        JoinCriteria::Natural => {}
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, expr: &'ast Expr) {
    match expr {
        Expr::Literal(_) | Expr::CurrentTime { .. } | Expr::Parameter { .. } => {}
        Expr::Column(name) => v.visit_identifier(name),
        Expr::Dereference { base, field } => {
            v.visit_expr(base);
            v.visit_identifier(field);
        }
        Expr::Subscript { base, index } => {
            v.visit_expr(base);
            v.visit_expr(index);
        }
        Expr::Function(call) => v.visit_function_call(call),
        Expr::Lambda { params, body } => {
            for param in params {
                v.visit_identifier(param);
            }
            v.visit_expr(body);
        }
        Expr::Case {
            operand,
            when_clauses,
            else_result,
        } => {
            if let Some(operand) = operand {
                v.visit_expr(operand);
            }
            for clause in when_clauses {
                v.visit_expr(&clause.condition);
                v.visit_expr(&clause.result);
            }
            if let Some(else_result) = else_result {
                v.visit_expr(else_result);
            }
        }
        Expr::Cast {
            expr, data_type, ..
        } => {
            v.visit_expr(expr);
            v.visit_data_type(data_type);
        }
        Expr::Unary { operand, .. } => v.visit_expr(operand),
        Expr::Binary { left, right, .. } | Expr::IsDistinctFrom { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        Expr::AtTimeZone { expr, zone } => {
            v.visit_expr(expr);
            v.visit_expr(zone);
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            v.visit_expr(expr);
            v.visit_expr(low);
            v.visit_expr(high);
        }
        Expr::InList { expr, list, .. } => {
            v.visit_expr(expr);
            for item in list {
                v.visit_expr(item);
            }
        }
        Expr::InSubquery { expr, subquery, .. } => {
            v.visit_expr(expr);
            v.visit_query(subquery);
        }
        Expr::Like {
            expr,
            pattern,
            escape,
            ..
        } => {
            v.visit_expr(expr);
            v.visit_expr(pattern);
            if let Some(escape) = escape {
                v.visit_expr(escape);
            }
        }
        Expr::IsNull { expr, .. } | Expr::Normalize { expr, .. } => v.visit_expr(expr),
        Expr::QuantifiedComparison { left, subquery, .. } => {
            v.visit_expr(left);
            v.visit_query(subquery);
        }
        Expr::Exists(query) | Expr::Subquery(query) => v.visit_query(query),
        Expr::Array(items) | Expr::Row(items) => {
            for item in items {
                v.visit_expr(item);
            }
        }
        Expr::Extract { field, expr } => {
            v.visit_identifier(field);
            v.visit_expr(expr);
        }
        Expr::Position { needle, haystack } => {
            v.visit_expr(needle);
            v.visit_expr(haystack);
        }
        Expr::Substring {
            expr,
            start,
            length,
        } => {
            v.visit_expr(expr);
            v.visit_expr(start);
            if let Some(length) = length {
                v.visit_expr(length);
            }
        }
    }
}

pub fn walk_function_call<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, call: &'ast FunctionCall) {
    v.visit_qualified_name(&call.name);
    if let FunctionArgs::Exprs { args, .. } = &call.args {
        for arg in args {
            v.visit_expr(arg);
        }
    }
    if let Some(filter) = &call.filter {
        v.visit_expr(filter);
    }
    if let Some(window) = &call.window {
        v.visit_window(window);
    }
}

pub fn walk_window<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, window: &'ast Window) {
    for expr in &window.partition_by {
        v.visit_expr(expr);
    }
    for item in &window.order_by {
        v.visit_sort_item(item);
    }
    if let Some(frame) = &window.frame {
        for bound in std::iter::once(&frame.start).chain(frame.end.as_ref()) {
            if let FrameBound::Preceding(expr) | FrameBound::Following(expr) = bound {
                v.visit_expr(expr);
            }
        }
    }
}

pub fn walk_data_type<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, data_type: &'ast DataType) {
    match data_type {
        DataType::Array(element) => v.visit_data_type(element),
        DataType::Map(key, value) => {
            v.visit_data_type(key);
            v.visit_data_type(value);
        }
        DataType::Row(fields) => {
            for field in fields {
                v.visit_identifier(&field.name);
                v.visit_data_type(&field.data_type);
            }
        }
        DataType::Base { parameters, .. } => {
            for parameter in parameters {
                if let TypeParameter::Type(inner) = parameter {
                    v.visit_data_type(inner);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_statement;

    #[derive(Default)]
    struct Counter {
        functions: Vec<String>,
        columns: usize,
        types: usize,
    }

    impl<'ast> Visitor<'ast> for Counter {
        fn visit_function_call(&mut self, call: &'ast FunctionCall) {
            self.functions.push(call.name.to_string());
            walk_function_call(self, call);
        }

        fn visit_expr(&mut self, expr: &'ast Expr) {
            if matches!(expr, Expr::Column(_)) {
                self.columns += 1;
            }
            walk_expr(self, expr);
        }

        fn visit_data_type(&mut self, data_type: &'ast DataType) {
            self.types += 1;
            walk_data_type(self, data_type);
        }
    }

    #[test]
    fn test_visits_nested_functions_and_columns() {
        let statement = parse_statement(
            "SELECT sum(x) FILTER (WHERE y > 0) OVER (PARTITION BY z), \
             CAST(w AS ARRAY<BIGINT>) FROM t",
        )
        .unwrap();
        let mut counter = Counter::default();
        counter.visit_statement(&statement);
        assert_eq!(counter.functions, ["sum"]);
        assert_eq!(counter.columns, 4);
        assert_eq!(counter.types, 2);
    }

    #[test]
    fn test_visits_explained_statement() {
        let statement = parse_statement("EXPLAIN INSERT INTO t SELECT f(a) FROM s").unwrap();
        let mut counter = Counter::default();
        counter.visit_statement(&statement);
        assert_eq!(counter.functions, ["f"]);
        assert_eq!(counter.columns, 1);
    }
}
