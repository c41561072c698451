use std::collections::HashMap;

use crate::definition::{Definition, OptionDef};
use crate::error::SchemaError;

const HELP_NAME: &str = "help";
const HELP_DESCRIPTION: &str = "Show this help";
const VERSION_NAME: &str = "version";
const VERSION_DESCRIPTION: &str = "Show version information";

/// How an option consumes arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Toggles on every occurrence.
    Boolean,
    /// Takes the next value; `multi` collects every occurrence.
    String { multi: bool },
    /// Injected `--help`.
    Help,
    /// Injected `--version`, present only when a version is configured.
    Version,
}

impl OptionKind {
    pub fn is_multi(self) -> bool {
        matches!(self, Self::String { multi: true })
    }

    pub fn takes_value(self) -> bool {
        matches!(self, Self::String { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub kind: OptionKind,
    pub long: String,
    pub short: Option<char>,
    pub required: bool,
    pub description: Option<String>,
}

impl OptionSpec {
    fn pseudo(name: &str, kind: OptionKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            long: name.to_string(),
            short: None,
            required: false,
            description: Some(description.to_string()),
        }
    }

    /// Only string options can be required; the flag is ignored elsewhere.
    pub fn is_required(&self) -> bool {
        self.required && self.kind.takes_value()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalSpec {
    pub name: String,
}

/// A validated, immutable schema.
#[derive(Debug, Clone)]
pub struct Schema {
    name: Option<String>,
    info: Option<String>,
    version: Option<String>,
    options: Vec<OptionSpec>,
    positional: Vec<PositionalSpec>,
    long_map: HashMap<String, usize>,
    short_map: HashMap<char, usize>,
}

impl Schema {
    /// Validate `definition` and compile it.
    ///
    /// Options are kept in declaration order followed by the injected `help`
    /// and `version` entries. Options without an explicit short form get the
    /// first character of their long name, unless some option already claims
    /// it.
    pub fn build(definition: Definition) -> Result<Self, SchemaError> {
        let Definition {
            name,
            info,
            version,
            options: defs,
            positional: positional_names,
        } = definition;
        let version = version.filter(|v| !v.trim().is_empty());

        let mut options: Vec<OptionSpec> = Vec::with_capacity(defs.len() + 2);
        for (option_name, def) in defs {
            let spec = compile_option(option_name, def)?;
            if let Some(short) = spec.short {
                if let Some(prev) = options.iter().find(|o| o.short == Some(short)) {
                    return Err(SchemaError::DuplicateShort {
                        short,
                        first: prev.name.clone(),
                        second: spec.name,
                    });
                }
            }
            options.push(spec);
        }

        if !options.iter().any(|o| o.name == HELP_NAME) {
            options.push(OptionSpec::pseudo(
                HELP_NAME,
                OptionKind::Help,
                HELP_DESCRIPTION,
            ));
        }
        if version.is_some() && !options.iter().any(|o| o.name == VERSION_NAME) {
            options.push(OptionSpec::pseudo(
                VERSION_NAME,
                OptionKind::Version,
                VERSION_DESCRIPTION,
            ));
        }

        let mut positional: Vec<PositionalSpec> = Vec::with_capacity(positional_names.len());
        for pos in positional_names {
            let taken = options.iter().any(|o| o.name == pos)
                || positional.iter().any(|p| p.name == pos);
            if taken {
                return Err(SchemaError::DuplicateName(pos));
            }
            positional.push(PositionalSpec { name: pos });
        }

        assign_auto_shorts(&mut options);

        let mut long_map = HashMap::with_capacity(options.len());
        let mut short_map = HashMap::with_capacity(options.len());
        for (idx, spec) in options.iter().enumerate() {
            long_map.insert(spec.long.clone(), idx);
            if let Some(short) = spec.short {
                short_map.insert(short, idx);
            }
        }

        tracing::debug!(
            options = options.len(),
            positional = positional.len(),
            "built option schema"
        );

        Ok(Self {
            name,
            info,
            version,
            options,
            positional,
            long_map,
            short_map,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn positional(&self) -> &[PositionalSpec] {
        &self.positional
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn find_long(&self, long: &str) -> Option<&OptionSpec> {
        self.long_map.get(long).map(|&idx| &self.options[idx])
    }

    pub fn find_short(&self, short: char) -> Option<&OptionSpec> {
        self.short_map.get(&short).map(|&idx| &self.options[idx])
    }
}

fn compile_option(name: String, def: OptionDef) -> Result<OptionSpec, SchemaError> {
    let usable = !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace);
    if !usable {
        return Err(SchemaError::InvalidName(name));
    }

    let kind = match def.kind.as_deref().unwrap_or("boolean") {
        "boolean" if def.multi => return Err(SchemaError::MultiNotString { name }),
        "boolean" => OptionKind::Boolean,
        "string" => OptionKind::String { multi: def.multi },
        other => {
            return Err(SchemaError::UnknownType {
                kind: other.to_string(),
                name,
            });
        }
    };

    let short = match def.short {
        None => None,
        Some(short) => {
            let mut chars = short.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c != '-' && !c.is_whitespace() => Some(c),
                _ => return Err(SchemaError::InvalidShort { name, short }),
            }
        }
    };

    Ok(OptionSpec {
        long: name.clone(),
        name,
        kind,
        short,
        required: def.required,
        description: def.description,
    })
}

// First come, first served: no second pass tries other characters.
fn assign_auto_shorts(options: &mut [OptionSpec]) {
    for idx in 0..options.len() {
        if options[idx].short.is_some() {
            continue;
        }
        let Some(candidate) = options[idx].long.chars().next() else {
            continue;
        };
        if options.iter().any(|o| o.short == Some(candidate)) {
            continue;
        }
        options[idx].short = Some(candidate);
    }
}
