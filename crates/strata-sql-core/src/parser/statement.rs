//! Statement dispatcher.
//!
//! Statements are tried in a fixed order, each from the same saved
//! position and each required to reach the end of input. Several forms
//! share long prefixes (`CREATE TABLE t ...` vs `CREATE TABLE t AS ...`,
//! `DESCRIBE t` vs `DESCRIBE INPUT x`), so the first alternative that
//! consumes the whole input wins.

use tracing::trace;

use super::parser::{PResult, Parser};
use crate::ast::{
    CallArgument, ColumnDefinition, ExplainFormat, ExplainOption, ExplainType, Identifier,
    IsolationLevel, LikeProperties, Privilege, Property, QualifiedName, Statement, TableElement,
    TransactionMode,
};
use crate::lexer::{Keyword, TokenKind};

type Alternative = fn(&mut Parser) -> PResult<Statement>;

const STATEMENTS: &[(&str, Alternative)] = &[
    ("Query", Parser::parse_query_statement),
    ("Use", Parser::parse_use),
    ("CreateSchema", Parser::parse_create_schema),
    ("DropSchema", Parser::parse_drop_schema),
    ("RenameSchema", Parser::parse_rename_schema),
    ("CreateTableAsSelect", Parser::parse_create_table_as_select),
    ("CreateTable", Parser::parse_create_table),
    ("DropTable", Parser::parse_drop_table),
    ("Insert", Parser::parse_insert),
    ("Delete", Parser::parse_delete),
    ("RenameTable", Parser::parse_rename_table),
    ("RenameColumn", Parser::parse_rename_column),
    ("DropColumn", Parser::parse_drop_column),
    ("AddColumn", Parser::parse_add_column),
    ("CreateView", Parser::parse_create_view),
    ("DropView", Parser::parse_drop_view),
    ("Call", Parser::parse_call),
    ("Grant", Parser::parse_grant),
    ("Revoke", Parser::parse_revoke),
    ("ShowGrants", Parser::parse_show_grants),
    ("Explain", Parser::parse_explain),
    ("ShowCreateTable", Parser::parse_show_create_table),
    ("ShowCreateView", Parser::parse_show_create_view),
    ("ShowTables", Parser::parse_show_tables),
    ("ShowSchemas", Parser::parse_show_schemas),
    ("ShowCatalogs", Parser::parse_show_catalogs),
    ("ShowColumns", Parser::parse_show_columns),
    ("ShowStats", Parser::parse_show_stats),
    ("ShowFunctions", Parser::parse_show_functions),
    ("ShowSession", Parser::parse_show_session),
    ("SetSession", Parser::parse_set_session),
    ("ResetSession", Parser::parse_reset_session),
    ("StartTransaction", Parser::parse_start_transaction),
    ("Commit", Parser::parse_commit),
    ("Rollback", Parser::parse_rollback),
    ("ShowPartitions", Parser::parse_show_partitions),
    ("Prepare", Parser::parse_prepare),
    ("Deallocate", Parser::parse_deallocate),
    ("Execute", Parser::parse_execute),
    ("DescribeInput", Parser::parse_describe_input),
    ("DescribeOutput", Parser::parse_describe_output),
];

impl Parser {
    /// Parses one statement that must extend to the end of input.
    pub(super) fn parse_statement_to_eof(&mut self) -> PResult<Statement> {
        self.recurse(|p| {
            for (name, alternative) in STATEMENTS {
                let parsed = p.attempt(|p| {
                    let statement = alternative(p)?;
                    p.expect_eof()?;
                    Ok(statement)
                })?;
                if let Some(statement) = parsed {
                    return Ok(statement);
                }
                trace!(alternative = *name, "statement alternative rejected");
            }
            Err(p.mismatch())
        })
    }

    // ===== Shared clauses =====

    fn parse_if_exists(&mut self) -> PResult<bool> {
        if self.at_keyword(Keyword::If) && self.nth_is_keyword(1, Keyword::Exists) {
            self.expect_keywords(&[Keyword::If, Keyword::Exists])?;
            return Ok(true);
        }
        Ok(false)
    }

    fn parse_if_not_exists(&mut self) -> PResult<bool> {
        if self.at_keyword(Keyword::If) && self.nth_is_keyword(1, Keyword::Not) {
            self.expect_keywords(&[Keyword::If, Keyword::Not, Keyword::Exists])?;
            return Ok(true);
        }
        Ok(false)
    }

    /// `[WITH ( name = expr, ... )]`
    fn parse_optional_properties(&mut self) -> PResult<Vec<Property>> {
        if !self.at_keyword(Keyword::With) || !self.nth_is(1, &TokenKind::LeftParen) {
            self.note(Keyword::With.quoted());
            return Ok(Vec::new());
        }
        self.advance();
        self.advance();
        let mut properties = vec![self.parse_property()?];
        while self.eat(&TokenKind::Comma) {
            properties.push(self.parse_property()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(properties)
    }

    fn parse_property(&mut self) -> PResult<Property> {
        let name = self.parse_identifier()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(Property { name, value })
    }

    /// `(FROM | IN) name`, when present.
    fn parse_optional_source(&mut self) -> PResult<Option<QualifiedName>> {
        if self.eat_keyword(Keyword::From) || self.eat_keyword(Keyword::In) {
            return Ok(Some(self.parse_qualified_name()?));
        }
        Ok(None)
    }

    fn parse_optional_like_pattern(&mut self) -> PResult<Option<String>> {
        if self.eat_keyword(Keyword::Like) {
            return Ok(Some(self.parse_string()?));
        }
        Ok(None)
    }

    fn parse_column_definition(&mut self) -> PResult<ColumnDefinition> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_type()?;
        let comment = if self.eat_keyword(Keyword::Comment) {
            Some(self.parse_string()?)
        } else {
            None
        };
        Ok(ColumnDefinition {
            name,
            data_type,
            comment,
        })
    }

    // ===== Queries and schemas =====

    fn parse_query_statement(&mut self) -> PResult<Statement> {
        Ok(Statement::Query(Box::new(self.parse_query()?)))
    }

    fn parse_use(&mut self) -> PResult<Statement> {
        self.expect_keyword(Keyword::Use)?;
        let first = self.parse_identifier()?;
        if self.eat(&TokenKind::Dot) {
            let schema = self.parse_identifier()?;
            return Ok(Statement::Use {
                catalog: Some(first),
                schema,
            });
        }
        Ok(Statement::Use {
            catalog: None,
            schema: first,
        })
    }

    fn parse_create_schema(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Create, Keyword::Schema])?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name()?;
        let properties = self.parse_optional_properties()?;
        Ok(Statement::CreateSchema {
            name,
            if_not_exists,
            properties,
        })
    }

    fn parse_drop_schema(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Drop, Keyword::Schema])?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_qualified_name()?;
        let cascade = if self.eat_keyword(Keyword::Cascade) {
            true
        } else {
            self.eat_keyword(Keyword::Restrict);
            false
        };
        Ok(Statement::DropSchema {
            name,
            if_exists,
            cascade,
        })
    }

    fn parse_rename_schema(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Alter, Keyword::Schema])?;
        let name = self.parse_qualified_name()?;
        self.expect_keywords(&[Keyword::Rename, Keyword::To])?;
        let new_name = self.parse_identifier()?;
        Ok(Statement::RenameSchema { name, new_name })
    }

    // ===== Tables =====

    fn parse_create_table_as_select(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Create, Keyword::Table])?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name()?;
        let properties = self.parse_optional_properties()?;
        self.expect_keyword(Keyword::As)?;
        let query = self.parse_query()?;
        let with_data = if self.eat_keyword(Keyword::With) {
            let no = self.eat_keyword(Keyword::No);
            self.expect_keyword(Keyword::Data)?;
            !no
        } else {
            true
        };
        Ok(Statement::CreateTableAsSelect {
            name,
            if_not_exists,
            properties,
            query: Box::new(query),
            with_data,
        })
    }

    fn parse_create_table(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Create, Keyword::Table])?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name()?;
        self.expect(&TokenKind::LeftParen)?;
        let mut elements = vec![self.parse_table_element()?];
        while self.eat(&TokenKind::Comma) {
            elements.push(self.parse_table_element()?);
        }
        self.expect(&TokenKind::RightParen)?;
        let properties = self.parse_optional_properties()?;
        Ok(Statement::CreateTable {
            name,
            if_not_exists,
            elements,
            properties,
        })
    }

    fn parse_table_element(&mut self) -> PResult<TableElement> {
        if !self.eat_keyword(Keyword::Like) {
            return Ok(TableElement::Column(self.parse_column_definition()?));
        }
        let table = self.parse_qualified_name()?;
        let properties = if self.eat_keyword(Keyword::Including) {
            self.expect_keyword(Keyword::Properties)?;
            Some(LikeProperties::Including)
        } else if self.eat_keyword(Keyword::Excluding) {
            self.expect_keyword(Keyword::Properties)?;
            Some(LikeProperties::Excluding)
        } else {
            None
        };
        Ok(TableElement::Like { table, properties })
    }

    fn parse_drop_table(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Drop, Keyword::Table])?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_qualified_name()?;
        Ok(Statement::DropTable { name, if_exists })
    }

    fn parse_insert(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Insert, Keyword::Into])?;
        let table = self.parse_qualified_name()?;
        // A parenthesized identifier list is a column list, anything else
        // in parentheses is the query
        let columns = if self.at(&TokenKind::LeftParen)
            && self.nth_is_identifier(1)
            && (self.nth_is(2, &TokenKind::Comma) || self.nth_is(2, &TokenKind::RightParen))
        {
            self.parse_column_aliases()?
        } else {
            Vec::new()
        };
        let query = self.parse_query()?;
        Ok(Statement::Insert {
            table,
            columns,
            query: Box::new(query),
        })
    }

    fn parse_delete(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Delete, Keyword::From])?;
        let table = self.parse_qualified_name()?;
        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Delete {
            table,
            where_clause,
        })
    }

    fn parse_rename_table(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Alter, Keyword::Table])?;
        let source = self.parse_qualified_name()?;
        self.expect_keywords(&[Keyword::Rename, Keyword::To])?;
        let target = self.parse_qualified_name()?;
        Ok(Statement::RenameTable { source, target })
    }

    fn parse_rename_column(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Alter, Keyword::Table])?;
        let table = self.parse_qualified_name()?;
        self.expect_keywords(&[Keyword::Rename, Keyword::Column])?;
        let source = self.parse_identifier()?;
        self.expect_keyword(Keyword::To)?;
        let target = self.parse_identifier()?;
        Ok(Statement::RenameColumn {
            table,
            source,
            target,
        })
    }

    fn parse_drop_column(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Alter, Keyword::Table])?;
        let table = self.parse_qualified_name()?;
        self.expect_keywords(&[Keyword::Drop, Keyword::Column])?;
        let column = self.parse_identifier()?;
        Ok(Statement::DropColumn { table, column })
    }

    fn parse_add_column(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Alter, Keyword::Table])?;
        let table = self.parse_qualified_name()?;
        self.expect_keywords(&[Keyword::Add, Keyword::Column])?;
        let column = self.parse_column_definition()?;
        Ok(Statement::AddColumn { table, column })
    }

    // ===== Views and procedures =====

    fn parse_create_view(&mut self) -> PResult<Statement> {
        self.expect_keyword(Keyword::Create)?;
        let replace = if self.eat_keyword(Keyword::Or) {
            self.expect_keyword(Keyword::Replace)?;
            true
        } else {
            false
        };
        self.expect_keyword(Keyword::View)?;
        let name = self.parse_qualified_name()?;
        self.expect_keyword(Keyword::As)?;
        let query = self.parse_query()?;
        Ok(Statement::CreateView {
            name,
            replace,
            query: Box::new(query),
        })
    }

    fn parse_drop_view(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Drop, Keyword::View])?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_qualified_name()?;
        Ok(Statement::DropView { name, if_exists })
    }

    fn parse_call(&mut self) -> PResult<Statement> {
        self.expect_keyword(Keyword::Call)?;
        let name = self.parse_qualified_name()?;
        self.expect(&TokenKind::LeftParen)?;
        let mut arguments = Vec::new();
        if !self.at(&TokenKind::RightParen) {
            arguments.push(self.parse_call_argument()?);
            while self.eat(&TokenKind::Comma) {
                arguments.push(self.parse_call_argument()?);
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(Statement::Call { name, arguments })
    }

    fn parse_call_argument(&mut self) -> PResult<CallArgument> {
        let name = if self.at_identifier() && self.nth_is(1, &TokenKind::FatArrow) {
            let name = self.parse_identifier()?;
            self.advance();
            Some(name)
        } else {
            None
        };
        let value = self.parse_expr()?;
        Ok(CallArgument { name, value })
    }

    // ===== Privileges =====

    /// `priv, ...` or `ALL PRIVILEGES` (`None`).
    fn parse_privileges(&mut self) -> PResult<Option<Vec<Privilege>>> {
        if self.eat_keyword(Keyword::All) {
            self.expect_keyword(Keyword::Privileges)?;
            return Ok(None);
        }
        let mut privileges = vec![self.parse_privilege()?];
        while self.eat(&TokenKind::Comma) {
            privileges.push(self.parse_privilege()?);
        }
        Ok(Some(privileges))
    }

    fn parse_privilege(&mut self) -> PResult<Privilege> {
        if self.eat_keyword(Keyword::Select) {
            Ok(Privilege::Select)
        } else if self.eat_keyword(Keyword::Delete) {
            Ok(Privilege::Delete)
        } else if self.eat_keyword(Keyword::Insert) {
            Ok(Privilege::Insert)
        } else {
            Ok(Privilege::Other(self.parse_identifier()?))
        }
    }

    /// `ON [TABLE] name`, returning whether `TABLE` was written.
    fn parse_privilege_target(&mut self) -> PResult<(bool, QualifiedName)> {
        self.expect_keyword(Keyword::On)?;
        let table_keyword = self.eat_keyword(Keyword::Table);
        Ok((table_keyword, self.parse_qualified_name()?))
    }

    fn parse_grant(&mut self) -> PResult<Statement> {
        self.expect_keyword(Keyword::Grant)?;
        let privileges = self.parse_privileges()?;
        let (table_keyword, name) = self.parse_privilege_target()?;
        self.expect_keyword(Keyword::To)?;
        let grantee = self.parse_identifier()?;
        let with_grant_option = if self.eat_keyword(Keyword::With) {
            self.expect_keywords(&[Keyword::Grant, Keyword::Option])?;
            true
        } else {
            false
        };
        Ok(Statement::Grant {
            privileges,
            table_keyword,
            name,
            grantee,
            with_grant_option,
        })
    }

    fn parse_revoke(&mut self) -> PResult<Statement> {
        self.expect_keyword(Keyword::Revoke)?;
        let grant_option_for = self.at_keyword(Keyword::Grant)
            && self.nth_is_keyword(1, Keyword::Option)
            && self.nth_is_keyword(2, Keyword::For);
        if grant_option_for {
            self.expect_keywords(&[Keyword::Grant, Keyword::Option, Keyword::For])?;
        }
        let privileges = self.parse_privileges()?;
        let (table_keyword, name) = self.parse_privilege_target()?;
        self.expect_keyword(Keyword::From)?;
        let grantee = self.parse_identifier()?;
        Ok(Statement::Revoke {
            grant_option_for,
            privileges,
            table_keyword,
            name,
            grantee,
        })
    }

    fn parse_show_grants(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Show, Keyword::Grants])?;
        let table = if self.eat_keyword(Keyword::On) {
            self.eat_keyword(Keyword::Table);
            Some(self.parse_qualified_name()?)
        } else {
            None
        };
        Ok(Statement::ShowGrants { table })
    }

    // ===== EXPLAIN =====

    fn parse_explain(&mut self) -> PResult<Statement> {
        self.expect_keyword(Keyword::Explain)?;
        let analyze = self.eat_keyword(Keyword::Analyze);

        let options = if self.at(&TokenKind::LeftParen) {
            self.attempt(|p| {
                p.advance();
                let mut options = vec![p.parse_explain_option()?];
                while p.eat(&TokenKind::Comma) {
                    options.push(p.parse_explain_option()?);
                }
                p.expect(&TokenKind::RightParen)?;
                Ok(options)
            })?
            .unwrap_or_default()
        } else {
            Vec::new()
        };

        let statement = self.parse_statement_to_eof()?;
        Ok(Statement::Explain {
            analyze,
            options,
            statement: Box::new(statement),
        })
    }

    fn parse_explain_option(&mut self) -> PResult<ExplainOption> {
        if self.eat_keyword(Keyword::Format) {
            let format = if self.eat_keyword(Keyword::Text) {
                ExplainFormat::Text
            } else if self.eat_keyword(Keyword::Graphviz) {
                ExplainFormat::Graphviz
            } else if self.eat_keyword(Keyword::Json) {
                ExplainFormat::Json
            } else {
                return Err(self.mismatch());
            };
            return Ok(ExplainOption::Format(format));
        }
        if self.eat_keyword(Keyword::Type) {
            let kind = if self.eat_keyword(Keyword::Logical) {
                ExplainType::Logical
            } else if self.eat_keyword(Keyword::Distributed) {
                ExplainType::Distributed
            } else if self.eat_keyword(Keyword::Validate) {
                ExplainType::Validate
            } else {
                return Err(self.mismatch());
            };
            return Ok(ExplainOption::Type(kind));
        }
        Err(self.mismatch())
    }

    // ===== SHOW and DESCRIBE =====

    fn parse_show_create_table(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Show, Keyword::Create, Keyword::Table])?;
        Ok(Statement::ShowCreateTable(self.parse_qualified_name()?))
    }

    fn parse_show_create_view(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Show, Keyword::Create, Keyword::View])?;
        Ok(Statement::ShowCreateView(self.parse_qualified_name()?))
    }

    fn parse_show_tables(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Show, Keyword::Tables])?;
        let schema = self.parse_optional_source()?;
        let like_pattern = self.parse_optional_like_pattern()?;
        Ok(Statement::ShowTables {
            schema,
            like_pattern,
        })
    }

    fn parse_show_schemas(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Show, Keyword::Schemas])?;
        let catalog = if self.eat_keyword(Keyword::From) || self.eat_keyword(Keyword::In) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let like_pattern = self.parse_optional_like_pattern()?;
        Ok(Statement::ShowSchemas {
            catalog,
            like_pattern,
        })
    }

    fn parse_show_catalogs(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Show, Keyword::Catalogs])?;
        let like_pattern = self.parse_optional_like_pattern()?;
        Ok(Statement::ShowCatalogs { like_pattern })
    }

    /// `SHOW COLUMNS (FROM|IN) name`, `DESCRIBE name` or `DESC name`.
    fn parse_show_columns(&mut self) -> PResult<Statement> {
        if self.eat_keyword(Keyword::Describe) || self.eat_keyword(Keyword::Desc) {
            return Ok(Statement::ShowColumns(self.parse_qualified_name()?));
        }
        self.expect_keywords(&[Keyword::Show, Keyword::Columns])?;
        match self.parse_optional_source()? {
            Some(table) => Ok(Statement::ShowColumns(table)),
            None => Err(self.mismatch()),
        }
    }

    fn parse_show_stats(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Show, Keyword::Stats, Keyword::For])?;
        Ok(Statement::ShowStats(self.parse_qualified_name()?))
    }

    fn parse_show_functions(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Show, Keyword::Functions])?;
        Ok(Statement::ShowFunctions)
    }

    fn parse_show_session(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Show, Keyword::Session])?;
        Ok(Statement::ShowSession)
    }

    fn parse_show_partitions(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Show, Keyword::Partitions])?;
        let Some(table) = self.parse_optional_source()? else {
            return Err(self.mismatch());
        };
        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let order_by = if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_sort_items()?
        } else {
            Vec::new()
        };
        let limit = if self.eat_keyword(Keyword::Limit) {
            Some(self.parse_limit()?)
        } else {
            None
        };
        Ok(Statement::ShowPartitions {
            table,
            where_clause,
            order_by,
            limit,
        })
    }

    // ===== Session and transactions =====

    fn parse_set_session(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Set, Keyword::Session])?;
        let name = self.parse_qualified_name()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(Statement::SetSession { name, value })
    }

    fn parse_reset_session(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Reset, Keyword::Session])?;
        Ok(Statement::ResetSession(self.parse_qualified_name()?))
    }

    fn parse_start_transaction(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Start, Keyword::Transaction])?;
        let mut modes = Vec::new();
        if self.at_keyword(Keyword::Isolation) || self.at_keyword(Keyword::Read) {
            modes.push(self.parse_transaction_mode()?);
            while self.eat(&TokenKind::Comma) {
                modes.push(self.parse_transaction_mode()?);
            }
        } else {
            self.note(Keyword::Isolation.quoted());
            self.note(Keyword::Read.quoted());
        }
        Ok(Statement::StartTransaction(modes))
    }

    fn parse_transaction_mode(&mut self) -> PResult<TransactionMode> {
        if self.eat_keyword(Keyword::Isolation) {
            self.expect_keyword(Keyword::Level)?;
            return Ok(TransactionMode::Isolation(self.parse_isolation_level()?));
        }
        self.expect_keyword(Keyword::Read)?;
        if self.eat_keyword(Keyword::Only) {
            Ok(TransactionMode::ReadOnly)
        } else if self.eat_keyword(Keyword::Write) {
            Ok(TransactionMode::ReadWrite)
        } else {
            Err(self.mismatch())
        }
    }

    fn parse_isolation_level(&mut self) -> PResult<IsolationLevel> {
        if self.eat_keyword(Keyword::Serializable) {
            return Ok(IsolationLevel::Serializable);
        }
        if self.eat_keyword(Keyword::Repeatable) {
            self.expect_keyword(Keyword::Read)?;
            return Ok(IsolationLevel::RepeatableRead);
        }
        self.expect_keyword(Keyword::Read)?;
        if self.eat_keyword(Keyword::Uncommitted) {
            Ok(IsolationLevel::ReadUncommitted)
        } else if self.eat_keyword(Keyword::Committed) {
            Ok(IsolationLevel::ReadCommitted)
        } else {
            Err(self.mismatch())
        }
    }

    fn parse_commit(&mut self) -> PResult<Statement> {
        self.expect_keyword(Keyword::Commit)?;
        self.eat_keyword(Keyword::Work);
        Ok(Statement::Commit)
    }

    fn parse_rollback(&mut self) -> PResult<Statement> {
        self.expect_keyword(Keyword::Rollback)?;
        self.eat_keyword(Keyword::Work);
        Ok(Statement::Rollback)
    }

    // ===== Prepared statements =====

    fn parse_prepare(&mut self) -> PResult<Statement> {
        self.expect_keyword(Keyword::Prepare)?;
        let name = self.parse_identifier()?;
        self.expect_keyword(Keyword::From)?;
        let statement = self.parse_statement_to_eof()?;
        Ok(Statement::Prepare {
            name,
            statement: Box::new(statement),
        })
    }

    fn parse_deallocate(&mut self) -> PResult<Statement> {
        self.expect_keywords(&[Keyword::Deallocate, Keyword::Prepare])?;
        Ok(Statement::Deallocate(self.parse_identifier()?))
    }

    fn parse_execute(&mut self) -> PResult<Statement> {
        self.expect_keyword(Keyword::Execute)?;
        let name = self.parse_identifier()?;
        let parameters = if self.eat_keyword(Keyword::Using) {
            self.parse_expr_list()?
        } else {
            Vec::new()
        };
        Ok(Statement::Execute { name, parameters })
    }

    fn parse_describe_input(&mut self) -> PResult<Statement> {
        Ok(Statement::DescribeInput(self.parse_describe(Keyword::Input)?))
    }

    fn parse_describe_output(&mut self) -> PResult<Statement> {
        Ok(Statement::DescribeOutput(self.parse_describe(Keyword::Output)?))
    }

    fn parse_describe(&mut self, direction: Keyword) -> PResult<Identifier> {
        self.expect_keywords(&[Keyword::Describe, direction])?;
        self.parse_identifier()
    }
}
