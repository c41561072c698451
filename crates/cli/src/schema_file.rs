use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use optschema::{Definition, OptionDef};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SCHEMA_NAME: &str = "optschema.json";

pub fn load_definition(path: &Path) -> Result<Definition> {
    if !path.exists() {
        bail!("schema file not found: {}", path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file: {}", path.display()))?;
    let definition: Definition = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse schema JSON: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        options = definition.options.len(),
        positional = definition.positional.len(),
        "loaded schema definition"
    );
    Ok(definition)
}

/// A starter definition covering every option shape.
pub fn starter_definition(name: &str) -> Definition {
    let options: IndexMap<String, OptionDef> = [
        (
            "first-name",
            OptionDef::string()
                .short('f')
                .description("User's first name"),
        ),
        (
            "last-name",
            OptionDef::string()
                .required()
                .description("User's last name"),
        ),
        ("dog-lover", OptionDef::boolean().description("User loves dogs")),
        ("cat-lover", OptionDef::boolean().description("User loves cats")),
        (
            "tag",
            OptionDef::string().multi().description("Tag to attach, repeatable"),
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    Definition {
        name: Some(name.to_string()),
        info: Some(format!("Demonstrates how {name} parses its arguments")),
        version: Some("0.1.0".to_string()),
        options,
        positional: vec!["input-file".to_string(), "output-file".to_string()],
    }
}

pub fn write_starter_definition(dir: &Path, overwrite: bool) -> Result<PathBuf> {
    let dest = dir.join(DEFAULT_SCHEMA_NAME);
    if dest.exists() && !overwrite {
        bail!("{} already exists in {}", DEFAULT_SCHEMA_NAME, dir.display());
    }

    let name = guess_program_name(dir).unwrap_or_else(|| "my-cli".to_string());
    let definition = starter_definition(&name);

    let mut out =
        serde_json::to_string_pretty(&definition).context("failed to serialize schema")?;
    out.push('\n');

    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    if overwrite && dest.exists() {
        fs::remove_file(&dest).with_context(|| format!("failed to remove {}", dest.display()))?;
    }
    fs::rename(&tmp, &dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest)
}

fn guess_program_name(dir: &Path) -> Option<String> {
    // `.` and friends have no useful file name; fall back to the cwd.
    let file_name = dir.file_name().and_then(|s| s.to_str());
    let direct = file_name.filter(|s| !s.is_empty() && *s != "." && *s != "..");
    if let Some(name) = direct {
        return Some(name.to_string());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .map(|s| s.to_string())
}
