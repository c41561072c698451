use std::collections::VecDeque;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::UsageError;
use crate::schema::{OptionKind, OptionSpec, Schema};
use crate::token::{Token, TokenKind};

/// A bound value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl Value {
    /// Whether the value satisfies a `required` constraint.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => !text.is_empty(),
            Self::List(list) => !list.is_empty(),
        }
    }
}

/// The outcome of binding one argument list.
///
/// `values` follows schema declaration order (options, then positionals).
/// Booleans and multi-valued options are always present; single strings and
/// positionals only when given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub values: IndexMap<String, Value>,
    pub help: bool,
    pub version: bool,
    pub errors: Vec<UsageError>,
}

impl ParseResult {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.get(name)? {
            Value::List(list) => Some(list.as_slice()),
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error messages in the order they were found.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    fn toggle(&mut self, name: &str) {
        match self.values.get_mut(name) {
            Some(Value::Flag(flag)) => *flag = !*flag,
            _ => {
                self.values.insert(name.to_string(), Value::Flag(true));
            }
        }
    }

    fn set_text(&mut self, name: &str, text: &str) {
        self.values
            .insert(name.to_string(), Value::Text(text.to_string()));
    }

    fn push_list(&mut self, name: &str, text: &str) {
        match self.values.get_mut(name) {
            Some(Value::List(list)) => list.push(text.to_string()),
            _ => {
                self.values
                    .insert(name.to_string(), Value::List(vec![text.to_string()]));
            }
        }
    }
}

/// Bind `tokens` against `schema`.
///
/// Tokens are consumed front to back with at most one token of lookahead.
/// Usage errors are recorded and binding carries on, so one call can report
/// several independent problems.
pub fn bind(tokens: Vec<Token<'_>>, schema: &Schema) -> ParseResult {
    let mut queue: VecDeque<Token<'_>> = tokens.into();
    let mut slots = schema.positional().iter();
    let mut result = ParseResult::default();

    while let Some(token) = queue.pop_front() {
        tracing::trace!(kind = ?token.kind, raw = %token.raw, "binding token");

        let spec = match token.kind {
            TokenKind::Value => {
                match slots.next() {
                    Some(slot) => result.set_text(&slot.name, token.text),
                    None => result
                        .errors
                        .push(UsageError::ExtraArgument(token.text.to_string())),
                }
                continue;
            }
            TokenKind::Long => schema.find_long(token.text),
            TokenKind::Short => token.short_char().and_then(|c| schema.find_short(c)),
        };

        let Some(spec) = spec else {
            // `--unknown=value` loses its value too, rather than filling a positional.
            take_attached(&mut queue);
            result
                .errors
                .push(UsageError::Unrecognized(token.raw.into_owned()));
            continue;
        };

        bind_option(spec, &token, &mut queue, &mut result);
    }

    finish(schema, &mut result);

    tracing::debug!(
        values = result.values.len(),
        errors = result.errors.len(),
        help = result.help,
        version = result.version,
        "bound arguments"
    );
    result
}

fn bind_option<'a>(
    spec: &OptionSpec,
    token: &Token<'a>,
    queue: &mut VecDeque<Token<'a>>,
    result: &mut ParseResult,
) {
    match spec.kind {
        OptionKind::String { multi } => {
            let Some(value) = take_value(queue) else {
                result
                    .errors
                    .push(UsageError::RequiresValue(option_spelling(token)));
                return;
            };
            if multi {
                result.push_list(&spec.name, value.text);
            } else {
                result.set_text(&spec.name, value.text);
            }
        }
        OptionKind::Boolean | OptionKind::Help | OptionKind::Version => {
            if take_attached(queue).is_some() {
                result
                    .errors
                    .push(UsageError::UnexpectedValue(option_spelling(token)));
            }
            match spec.kind {
                OptionKind::Help => result.help = true,
                OptionKind::Version => result.version = true,
                _ => result.toggle(&spec.name),
            }
        }
    }
}

/// How an option token is quoted in errors: `--name` without any attached
/// value, or the `-x` spelling of a short.
fn option_spelling(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::Long => format!("--{}", token.text),
        _ => token.raw.to_string(),
    }
}

fn take_value<'a>(queue: &mut VecDeque<Token<'a>>) -> Option<Token<'a>> {
    if queue.front().is_some_and(|t| t.kind == TokenKind::Value) {
        queue.pop_front()
    } else {
        None
    }
}

fn take_attached<'a>(queue: &mut VecDeque<Token<'a>>) -> Option<Token<'a>> {
    if queue.front().is_some_and(|t| t.attached) {
        queue.pop_front()
    } else {
        None
    }
}

fn finish(schema: &Schema, result: &mut ParseResult) {
    for spec in schema.options() {
        match spec.kind {
            OptionKind::Boolean => {
                result
                    .values
                    .entry(spec.name.clone())
                    .or_insert(Value::Flag(false));
            }
            OptionKind::String { multi: true } => {
                result
                    .values
                    .entry(spec.name.clone())
                    .or_insert_with(|| Value::List(Vec::new()));
            }
            _ => {}
        }

        if spec.is_required() && !result.get(&spec.name).is_some_and(Value::is_present) {
            result
                .errors
                .push(UsageError::MissingRequired(format!("--{}", spec.long)));
        }
    }

    let names = schema
        .options()
        .iter()
        .map(|o| &o.name)
        .chain(schema.positional().iter().map(|p| &p.name));
    let mut ordered = IndexMap::with_capacity(result.values.len());
    for name in names {
        if let Some(value) = result.values.swap_remove(name) {
            ordered.insert(name.clone(), value);
        }
    }
    result.values = ordered;
}
