//! strata-sql CLI
//!
//! Command-line tool for parsing, formatting and checking SQL.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser as ClapParser, Subcommand, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use strata_sql_core::{DecimalLiteralTreatment, ParseError, Parser, ParserOptions, Statement};

/// Parser and formatter for analytic SQL.
#[derive(ClapParser)]
#[command(name = "strata-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Maximum nesting depth of expressions, queries and types.
    #[arg(long, env = "STRATA_SQL_MAX_DEPTH", global = true)]
    max_depth: Option<usize>,

    /// How decimal literals such as `1.5` are read.
    #[arg(long, value_enum, default_value_t = Decimal::Decimal, global = true)]
    decimal: Decimal,

    /// Enable verbose output (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse SQL and print the syntax tree.
    Parse {
        /// Parse a standalone expression instead of a statement.
        #[arg(short, long)]
        expression: bool,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Debug)]
        format: Format,

        #[command(flatten)]
        input: Input,
    },

    /// Print the canonical rendering of a statement.
    Format {
        /// Format a standalone expression instead of a statement.
        #[arg(short, long)]
        expression: bool,

        #[command(flatten)]
        input: Input,
    },

    /// Check that a statement parses and that its rendering parses back
    /// to the same tree.
    Check {
        #[command(flatten)]
        input: Input,
    },
}

/// Where the SQL text comes from.
#[derive(Args)]
struct Input {
    /// Read SQL from a file.
    #[arg(long, conflicts_with = "sql")]
    file: Option<PathBuf>,

    /// SQL text (read from stdin when neither this nor --file is given).
    sql: Option<String>,
}

impl Input {
    fn read(self) -> anyhow::Result<String> {
        if let Some(sql) = self.sql {
            return Ok(sql);
        }
        if let Some(path) = self.file {
            return std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        let mut sql = String::new();
        std::io::stdin()
            .read_to_string(&mut sql)
            .context("failed to read stdin")?;
        Ok(sql)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Decimal {
    Double,
    Decimal,
    Reject,
}

impl From<Decimal> for DecimalLiteralTreatment {
    fn from(decimal: Decimal) -> Self {
        match decimal {
            Decimal::Double => Self::AsDouble,
            Decimal::Decimal => Self::AsDecimal,
            Decimal::Reject => Self::Reject,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Debug,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut options = ParserOptions::new().with_decimal_literal(cli.decimal.into());
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth(max_depth);
    }
    debug!(?options, "parser options");

    match cli.command {
        Commands::Parse {
            expression,
            format,
            input,
        } => {
            let sql = input.read()?;
            let mut parser = Parser::with_options(&sql, options);
            if expression {
                let expr = parser.parse_expression().map_err(|e| report(&sql, e))?;
                match format {
                    Format::Debug => println!("{expr:#?}"),
                    Format::Json => println!("{}", serde_json::to_string_pretty(&expr)?),
                }
            } else {
                let statement = parser.parse_statement().map_err(|e| report(&sql, e))?;
                match format {
                    Format::Debug => println!("{statement:#?}"),
                    Format::Json => println!("{}", serde_json::to_string_pretty(&statement)?),
                }
            }
        }

        Commands::Format { expression, input } => {
            let sql = input.read()?;
            let mut parser = Parser::with_options(&sql, options);
            if expression {
                let expr = parser.parse_expression().map_err(|e| report(&sql, e))?;
                println!("{expr}");
            } else {
                let statement = parser.parse_statement().map_err(|e| report(&sql, e))?;
                println!("{statement}");
            }
        }

        Commands::Check { input } => {
            let sql = input.read()?;
            let statement = Parser::with_options(&sql, options.clone())
                .parse_statement()
                .map_err(|e| report(&sql, e))?;
            let rendered = statement.to_string();
            let reparsed: Statement = Parser::with_options(&rendered, options)
                .parse_statement()
                .map_err(|e| report(&rendered, e))
                .context("canonical rendering does not parse")?;
            if reparsed != statement {
                bail!("canonical rendering parses to a different tree:\n{rendered}");
            }
            info!("{}: ok", statement.kind());
        }
    }

    Ok(())
}

/// Prints the offending source line with a caret under the error column.
fn report(sql: &str, error: ParseError) -> anyhow::Error {
    if let Some(line) = sql.lines().nth(error.line.saturating_sub(1)) {
        eprintln!("{line}");
        eprintln!("{}^", " ".repeat(error.column.saturating_sub(1)));
    }
    error.into()
}
