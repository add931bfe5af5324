//! Statement AST types.

use super::{DataType, Expr, Identifier, Limit, QualifiedName, Query, SortItem};

/// A top-level SQL statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    /// A query.
    Query(Box<Query>),
    /// `USE [catalog.]schema`.
    Use {
        /// Catalog, if given.
        catalog: Option<Identifier>,
        /// Schema.
        schema: Identifier,
    },
    /// `CREATE SCHEMA [IF NOT EXISTS] name [WITH (props)]`.
    CreateSchema {
        /// Schema name.
        name: QualifiedName,
        /// IF NOT EXISTS.
        if_not_exists: bool,
        /// Schema properties.
        properties: Vec<Property>,
    },
    /// `DROP SCHEMA [IF EXISTS] name [CASCADE|RESTRICT]`.
    DropSchema {
        /// Schema name.
        name: QualifiedName,
        /// IF EXISTS.
        if_exists: bool,
        /// CASCADE (true) or RESTRICT/default (false).
        cascade: bool,
    },
    /// `ALTER SCHEMA name RENAME TO new_name`.
    RenameSchema {
        /// Current name.
        name: QualifiedName,
        /// New name.
        new_name: Identifier,
    },
    /// `CREATE TABLE name [WITH (props)] AS query [WITH [NO] DATA]`.
    CreateTableAsSelect {
        /// Table name.
        name: QualifiedName,
        /// IF NOT EXISTS.
        if_not_exists: bool,
        /// Table properties.
        properties: Vec<Property>,
        /// Source query.
        query: Box<Query>,
        /// False for `WITH NO DATA`.
        with_data: bool,
    },
    /// `CREATE TABLE name (elements) [WITH (props)]`.
    CreateTable {
        /// Table name.
        name: QualifiedName,
        /// IF NOT EXISTS.
        if_not_exists: bool,
        /// Columns and LIKE clauses.
        elements: Vec<TableElement>,
        /// Table properties.
        properties: Vec<Property>,
    },
    /// `DROP TABLE [IF EXISTS] name`.
    DropTable {
        /// Table name.
        name: QualifiedName,
        /// IF EXISTS.
        if_exists: bool,
    },
    /// `INSERT INTO name [(columns)] query`.
    Insert {
        /// Target table.
        table: QualifiedName,
        /// Target columns.
        columns: Vec<Identifier>,
        /// Source query.
        query: Box<Query>,
    },
    /// `DELETE FROM name [WHERE predicate]`.
    Delete {
        /// Target table.
        table: QualifiedName,
        /// WHERE predicate.
        where_clause: Option<Expr>,
    },
    /// `ALTER TABLE name RENAME TO new_name`.
    RenameTable {
        /// Current name.
        source: QualifiedName,
        /// New name.
        target: QualifiedName,
    },
    /// `ALTER TABLE name RENAME COLUMN a TO b`.
    RenameColumn {
        /// Table name.
        table: QualifiedName,
        /// Current column name.
        source: Identifier,
        /// New column name.
        target: Identifier,
    },
    /// `ALTER TABLE name ADD COLUMN column`.
    AddColumn {
        /// Table name.
        table: QualifiedName,
        /// New column.
        column: ColumnDefinition,
    },
    /// `ALTER TABLE name DROP COLUMN column`.
    DropColumn {
        /// Table name.
        table: QualifiedName,
        /// Column to drop.
        column: Identifier,
    },
    /// `CREATE [OR REPLACE] VIEW name AS query`.
    CreateView {
        /// View name.
        name: QualifiedName,
        /// OR REPLACE.
        replace: bool,
        /// View query.
        query: Box<Query>,
    },
    /// `DROP VIEW [IF EXISTS] name`.
    DropView {
        /// View name.
        name: QualifiedName,
        /// IF EXISTS.
        if_exists: bool,
    },
    /// `CALL name(arguments)`.
    Call {
        /// Procedure name.
        name: QualifiedName,
        /// Arguments.
        arguments: Vec<CallArgument>,
    },
    /// `GRANT privileges ON [TABLE] name TO grantee [WITH GRANT OPTION]`.
    Grant {
        /// Privileges; `None` means ALL PRIVILEGES.
        privileges: Option<Vec<Privilege>>,
        /// Whether the TABLE keyword was written.
        table_keyword: bool,
        /// Table name.
        name: QualifiedName,
        /// Receiving principal.
        grantee: Identifier,
        /// WITH GRANT OPTION.
        with_grant_option: bool,
    },
    /// `REVOKE [GRANT OPTION FOR] privileges ON [TABLE] name FROM grantee`.
    Revoke {
        /// GRANT OPTION FOR.
        grant_option_for: bool,
        /// Privileges; `None` means ALL PRIVILEGES.
        privileges: Option<Vec<Privilege>>,
        /// Whether the TABLE keyword was written.
        table_keyword: bool,
        /// Table name.
        name: QualifiedName,
        /// Principal losing the privileges.
        grantee: Identifier,
    },
    /// `EXPLAIN [ANALYZE] [(options)] statement`.
    Explain {
        /// EXPLAIN ANALYZE.
        analyze: bool,
        /// Options.
        options: Vec<ExplainOption>,
        /// Explained statement.
        statement: Box<Statement>,
    },
    /// `SHOW CREATE TABLE name`.
    ShowCreateTable(QualifiedName),
    /// `SHOW CREATE VIEW name`.
    ShowCreateView(QualifiedName),
    /// `SHOW TABLES [FROM schema] [LIKE pattern]`.
    ShowTables {
        /// Schema.
        schema: Option<QualifiedName>,
        /// LIKE pattern.
        like_pattern: Option<String>,
    },
    /// `SHOW SCHEMAS [FROM catalog] [LIKE pattern]`.
    ShowSchemas {
        /// Catalog.
        catalog: Option<Identifier>,
        /// LIKE pattern.
        like_pattern: Option<String>,
    },
    /// `SHOW CATALOGS [LIKE pattern]`.
    ShowCatalogs {
        /// LIKE pattern.
        like_pattern: Option<String>,
    },
    /// `SHOW COLUMNS FROM name`, `DESCRIBE name` or `DESC name`.
    ShowColumns(QualifiedName),
    /// `SHOW STATS FOR name`.
    ShowStats(QualifiedName),
    /// `SHOW FUNCTIONS`.
    ShowFunctions,
    /// `SHOW SESSION`.
    ShowSession,
    /// `SHOW PARTITIONS FROM name [WHERE ...] [ORDER BY ...] [LIMIT ...]`.
    ShowPartitions {
        /// Table name.
        table: QualifiedName,
        /// WHERE predicate.
        where_clause: Option<Expr>,
        /// ORDER BY items.
        order_by: Vec<SortItem>,
        /// LIMIT clause.
        limit: Option<Limit>,
    },
    /// `SHOW GRANTS [ON [TABLE] name]`.
    ShowGrants {
        /// Table name.
        table: Option<QualifiedName>,
    },
    /// `SET SESSION name = value`.
    SetSession {
        /// Property name.
        name: QualifiedName,
        /// New value.
        value: Expr,
    },
    /// `RESET SESSION name`.
    ResetSession(QualifiedName),
    /// `START TRANSACTION [mode, ...]`.
    StartTransaction(Vec<TransactionMode>),
    /// `COMMIT [WORK]`.
    Commit,
    /// `ROLLBACK [WORK]`.
    Rollback,
    /// `PREPARE name FROM statement`.
    Prepare {
        /// Statement name.
        name: Identifier,
        /// Prepared statement.
        statement: Box<Statement>,
    },
    /// `DEALLOCATE PREPARE name`.
    Deallocate(Identifier),
    /// `EXECUTE name [USING expr, ...]`.
    Execute {
        /// Statement name.
        name: Identifier,
        /// Parameter values.
        parameters: Vec<Expr>,
    },
    /// `DESCRIBE INPUT name`.
    DescribeInput(Identifier),
    /// `DESCRIBE OUTPUT name`.
    DescribeOutput(Identifier),
}

/// `name = value` in a WITH property list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Property {
    /// Property name.
    pub name: Identifier,
    /// Property value.
    pub value: Expr,
}

/// An element of a CREATE TABLE column list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableElement {
    /// A column definition.
    Column(ColumnDefinition),
    /// `LIKE name [INCLUDING|EXCLUDING PROPERTIES]`.
    Like {
        /// Source table.
        table: QualifiedName,
        /// Whether properties are copied.
        properties: Option<LikeProperties>,
    },
}

/// `INCLUDING PROPERTIES` or `EXCLUDING PROPERTIES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LikeProperties {
    Including,
    Excluding,
}

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnDefinition {
    /// Column name.
    pub name: Identifier,
    /// Column type.
    pub data_type: DataType,
    /// COMMENT text.
    pub comment: Option<String>,
}

/// An argument of CALL, optionally named with `name => value`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CallArgument {
    /// Argument name.
    pub name: Option<Identifier>,
    /// Argument value.
    pub value: Expr,
}

/// A privilege of GRANT or REVOKE.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Privilege {
    Select,
    Delete,
    Insert,
    /// Any other privilege name.
    Other(Identifier),
}

/// An option of EXPLAIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExplainOption {
    /// `FORMAT TEXT|GRAPHVIZ|JSON`.
    Format(ExplainFormat),
    /// `TYPE LOGICAL|DISTRIBUTED|VALIDATE`.
    Type(ExplainType),
}

/// EXPLAIN output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExplainFormat {
    Text,
    Graphviz,
    Json,
}

/// EXPLAIN plan type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExplainType {
    Logical,
    Distributed,
    Validate,
}

/// A mode of START TRANSACTION.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TransactionMode {
    /// `ISOLATION LEVEL level`.
    Isolation(IsolationLevel),
    /// `READ ONLY`.
    ReadOnly,
    /// `READ WRITE`.
    ReadWrite,
}

/// Transaction isolation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl IsolationLevel {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadUncommitted => "READ UNCOMMITTED",
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Serializable => "SERIALIZABLE",
        }
    }
}

impl Statement {
    /// Short name of the statement kind, e.g. `CreateTable`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Query(_) => "Query",
            Self::Use { .. } => "Use",
            Self::CreateSchema { .. } => "CreateSchema",
            Self::DropSchema { .. } => "DropSchema",
            Self::RenameSchema { .. } => "RenameSchema",
            Self::CreateTableAsSelect { .. } => "CreateTableAsSelect",
            Self::CreateTable { .. } => "CreateTable",
            Self::DropTable { .. } => "DropTable",
            Self::Insert { .. } => "Insert",
            Self::Delete { .. } => "Delete",
            Self::RenameTable { .. } => "RenameTable",
            Self::RenameColumn { .. } => "RenameColumn",
            Self::AddColumn { .. } => "AddColumn",
            Self::DropColumn { .. } => "DropColumn",
            Self::CreateView { .. } => "CreateView",
            Self::DropView { .. } => "DropView",
            Self::Call { .. } => "Call",
            Self::Grant { .. } => "Grant",
            Self::Revoke { .. } => "Revoke",
            Self::Explain { .. } => "Explain",
            Self::ShowCreateTable(_) => "ShowCreateTable",
            Self::ShowCreateView(_) => "ShowCreateView",
            Self::ShowTables { .. } => "ShowTables",
            Self::ShowSchemas { .. } => "ShowSchemas",
            Self::ShowCatalogs { .. } => "ShowCatalogs",
            Self::ShowColumns(_) => "ShowColumns",
            Self::ShowStats(_) => "ShowStats",
            Self::ShowFunctions => "ShowFunctions",
            Self::ShowSession => "ShowSession",
            Self::ShowPartitions { .. } => "ShowPartitions",
            Self::ShowGrants { .. } => "ShowGrants",
            Self::SetSession { .. } => "SetSession",
            Self::ResetSession(_) => "ResetSession",
            Self::StartTransaction(_) => "StartTransaction",
            Self::Commit => "Commit",
            Self::Rollback => "Rollback",
            Self::Prepare { .. } => "Prepare",
            Self::Deallocate(_) => "Deallocate",
            Self::Execute { .. } => "Execute",
            Self::DescribeInput(_) => "DescribeInput",
            Self::DescribeOutput(_) => "DescribeOutput",
        }
    }
}
