use serde::Serialize;
use thiserror::Error;

/// An invalid schema definition. These are mistakes of the program author,
/// so they are reported once, when the schema is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("argument type for {name} must be one of: string, boolean (got `{kind}`)")]
    UnknownType { name: String, kind: String },

    #[error("option {name} cannot be multi-valued: only string options support multi")]
    MultiNotString { name: String },

    #[error("short option `{short}` for {name} must be a single non-dash character")]
    InvalidShort { name: String, short: String },

    #[error("short option -{short} specified twice ({first} and {second})")]
    DuplicateShort {
        short: char,
        first: String,
        second: String,
    },

    #[error("option name `{0}` is not usable on a command line")]
    InvalidName(String),

    #[error("name {0} specified twice")]
    DuplicateName(String),
}

/// A problem with the arguments given to a parse. Several can be reported
/// from one invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "argument", rename_all = "kebab-case")]
pub enum UsageError {
    #[error("Unrecognized argument: {0}")]
    Unrecognized(String),

    #[error("Argument {0} requires a string value")]
    RequiresValue(String),

    #[error("Argument {0} is boolean and does not take a value")]
    UnexpectedValue(String),

    #[error("Unexpected extra argument: {0}")]
    ExtraArgument(String),

    /// Carries the option's long form, including the leading dashes.
    #[error("Missing required option: {0}")]
    MissingRequired(String),
}

impl UsageError {
    /// The argument text the error refers to.
    pub fn argument(&self) -> &str {
        match self {
            Self::Unrecognized(arg)
            | Self::RequiresValue(arg)
            | Self::UnexpectedValue(arg)
            | Self::ExtraArgument(arg)
            | Self::MissingRequired(arg) => arg.as_str(),
        }
    }
}
