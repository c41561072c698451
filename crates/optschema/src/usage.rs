use std::path::Path;

use crate::schema::{OptionSpec, Schema};

const FALLBACK_PROGRAM: &str = "program";

fn program_name<'a>(schema: &'a Schema, program: Option<&'a str>) -> &'a str {
    program
        .and_then(|p| Path::new(p).file_name())
        .and_then(|s| s.to_str())
        .filter(|p| !p.is_empty())
        .or(schema.name())
        .unwrap_or(FALLBACK_PROGRAM)
}

fn format_option_left(spec: &OptionSpec) -> String {
    match spec.short {
        Some(short) => format!("-{short}, --{}", spec.long),
        None => format!("    --{}", spec.long),
    }
}

fn format_option_help(spec: &OptionSpec) -> String {
    let mut out = spec.description.as_deref().unwrap_or_default().trim().to_string();
    if spec.is_required() {
        if out.is_empty() {
            out.push_str("(required)");
        } else {
            out.push_str(" (required)");
        }
    }
    out
}

/// Render the help text for `schema`.
pub(crate) fn usage(schema: &Schema, program: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(info) = schema.info().map(str::trim).filter(|s| !s.is_empty()) {
        out.push_str(info);
        out.push_str("\n\n");
    }

    out.push_str(&format!("Usage: {} [options]", program_name(schema, program)));
    for pos in schema.positional() {
        out.push_str(&format!(" <{}>", pos.name));
    }
    out.push('\n');

    let rows: Vec<(String, String)> = schema
        .options()
        .iter()
        .map(|spec| (format_option_left(spec), format_option_help(spec)))
        .collect();
    if !rows.is_empty() {
        out.push_str("\nOptions:\n");
        let width = rows
            .iter()
            .map(|(left, _)| left.chars().count())
            .max()
            .unwrap_or(0);
        for (left, help) in rows {
            if help.is_empty() {
                out.push_str(&format!("  {left}\n"));
            } else {
                out.push_str(&format!("  {left:width$}  {help}\n"));
            }
        }
    }

    out
}

pub(crate) fn version(schema: &Schema, program: Option<&str>) -> String {
    let program = program_name(schema, program);
    match schema.version().map(str::trim).filter(|v| !v.is_empty()) {
        Some(version) => format!("{program} {version}"),
        None => program.to_string(),
    }
}
