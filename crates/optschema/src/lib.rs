//! Declarative command-line option parsing.
//!
//! A [`Definition`] names the options (string or boolean, short/long, required,
//! multi-valued) and the positional slots a program accepts. [`Parser::new`]
//! compiles it into an immutable [`Schema`], and [`Parser::parse`] turns raw
//! arguments into a [`ParseResult`]:
//!
//! ```rust
//! use optschema::{Definition, OptionDef, Parser};
//!
//! let parser = Parser::new(
//!     Definition::new()
//!         .option("name", OptionDef::string().required())
//!         .option("verbose", OptionDef::boolean())
//!         .positional("input"),
//! )
//! .unwrap();
//!
//! let result = parser.parse_args(["-vn", "ferris", "in.txt"]);
//! assert!(result.is_ok());
//! assert_eq!(result.text("name"), Some("ferris"));
//! assert_eq!(result.flag("verbose"), Some(true));
//! assert_eq!(result.text("input"), Some("in.txt"));
//! ```
//!
//! Parsing never fails: usage problems are collected in
//! [`ParseResult::errors`] and the caller decides how to report them. The
//! crate does no I/O and never exits the process.

mod bind;
mod definition;
mod error;
mod schema;
mod token;
mod usage;

pub use bind::{ParseResult, Value, bind};
pub use definition::{Definition, OptionDef};
pub use error::{SchemaError, UsageError};
pub use schema::{OptionKind, OptionSpec, PositionalSpec, Schema};
pub use token::{Token, TokenKind, tokenize};

/// A compiled schema with the parse/usage/version operations on top.
#[derive(Debug, Clone)]
pub struct Parser {
    schema: Schema,
}

impl Parser {
    /// Compile `definition`, failing on an invalid schema.
    pub fn new(definition: Definition) -> Result<Self, SchemaError> {
        Schema::build(definition).map(|schema| Self { schema })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Parse a full `argv`, skipping the interpreter and script path in the
    /// first two positions.
    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> ParseResult {
        let args = argv.get(2..).unwrap_or_default();
        self.parse_args(args)
    }

    /// Parse arguments that have already had the program name stripped.
    pub fn parse_args<I, S>(&self, args: I) -> ParseResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let tokens = tokenize(&args);
        bind(tokens, &self.schema)
    }

    /// Render the help text. `program` may be a path; only its file name is used.
    pub fn usage(&self, program: Option<&str>) -> String {
        usage::usage(&self.schema, program)
    }

    /// `"<program> <version>"`, or just the program name without a version.
    pub fn version(&self, program: Option<&str>) -> String {
        usage::version(&self.schema, program)
    }
}

impl From<Schema> for Parser {
    fn from(schema: Schema) -> Self {
        Self { schema }
    }
}
