use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The declarative, unvalidated form of a schema.
///
/// Options keep their declaration order, both when built in code and when
/// deserialized from JSON, since that order drives short-flag assignment and
/// the usage listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    /// Program name used by usage/version when the caller passes none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form description printed above the usage line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    /// Enables the `--version` pseudo-option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub options: IndexMap<String, OptionDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positional: Vec<String>,
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Declare an option. Re-declaring a name replaces the earlier entry in place.
    pub fn option(mut self, name: impl Into<String>, def: OptionDef) -> Self {
        self.options.insert(name.into(), def);
        self
    }

    pub fn positional(mut self, name: impl Into<String>) -> Self {
        self.positional.push(name.into());
        self
    }
}

/// One option as written by the schema author.
///
/// `kind` is kept as free text so that unsupported types are reported by the
/// schema builder rather than by the deserializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDef {
    /// `"string"` or `"boolean"`; absent means boolean.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multi: bool,
}

impl OptionDef {
    pub fn boolean() -> Self {
        Self::of_type("boolean")
    }

    pub fn string() -> Self {
        Self::of_type("string")
    }

    pub fn of_type(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
