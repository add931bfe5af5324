//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! Statements are dispatched by ordered trial: each alternative starts
//! from the same position and must consume the whole input.

mod error;
mod expression;
mod identifier;
mod options;
mod parser;
mod pratt;
mod query;
mod statement;
mod types;

pub use error::ParseError;
pub use identifier::{identifier_of, is_non_reserved};
pub use options::{DecimalLiteralTreatment, ParserOptions};
pub use parser::Parser;
