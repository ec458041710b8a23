//! Read-only config commands: `show`, `get`, and `paths`.

use crate::config::{ConfigMap, ConfigStore, ConfigValue};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::io::Write;

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowFormat {
    /// YAML document, same shape as the config file (default)
    #[default]
    Yaml,
    /// Pretty-printed JSON object
    Json,
}

/// Arguments for the show command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ShowFormat::Yaml)]
    pub format: ShowFormat,
}

/// Arguments for the get command.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Key to look up (e.g. api_key, model, scopes)
    pub key: String,
}

/// Render the merged map.
pub fn render_map(map: &ConfigMap, format: ShowFormat) -> Result<String> {
    match format {
        ShowFormat::Yaml => serde_yaml::to_string(map).context("Failed to render YAML"),
        ShowFormat::Json => {
            let mut json = serde_json::to_string_pretty(map).context("Failed to render JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Render one value: strings verbatim, lists one item per line, null as nothing.
pub fn render_value(value: &ConfigValue) -> Result<String> {
    Ok(match value {
        ConfigValue::Null => String::new(),
        ConfigValue::String(s) => format!("{}\n", s),
        ConfigValue::List(items) => items.iter().map(|item| format!("{}\n", item)).collect(),
        ConfigValue::Other(other) => {
            serde_yaml::to_string(other).context("Failed to render value")?
        }
    })
}

/// Run the show command.
pub fn run_show(store: &ConfigStore, args: &ShowArgs, out: &mut impl Write) -> Result<()> {
    let map = store.as_mapping()?;
    out.write_all(render_map(&map, args.format)?.as_bytes())?;
    Ok(())
}

/// Run the get command. An unknown key prints nothing.
pub fn run_get(store: &ConfigStore, args: &GetArgs, out: &mut impl Write) -> Result<()> {
    if let Some(value) = store.get(&args.key)? {
        out.write_all(render_value(&value)?.as_bytes())?;
    }
    Ok(())
}

/// Run the paths command.
pub fn run_paths(store: &ConfigStore, out: &mut impl Write) -> Result<()> {
    let paths = store.paths();
    writeln!(out, "user:       {}", paths.user_config_path().display())?;
    match paths.repository_config_path() {
        Some(path) => writeln!(out, "repository: {}", path.display())?,
        None => writeln!(out, "repository: (not in a repository)")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{ConfigPaths, RepositoryLookup};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn store_with_user(temp: &TempDir, content: &str) -> ConfigStore {
        let dir = temp.path().join(".committer");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), content).unwrap();
        ConfigStore::new(ConfigPaths::with_resolver(dir, || RepositoryLookup::NotFound))
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&ConfigValue::Null).unwrap(), "");
        assert_eq!(render_value(&"m1".into()).unwrap(), "m1\n");
        assert_eq!(
            render_value(&vec!["a".to_string(), "b".to_string()].into()).unwrap(),
            "a\nb\n"
        );
    }

    #[test]
    fn test_show_json() {
        let temp = TempDir::new().unwrap();
        let store = store_with_user(&temp, "api_key: abc\nscopes: [ui]\n");
        let mut out = Vec::new();

        run_show(
            &store,
            &ShowArgs {
                format: ShowFormat::Json,
            },
            &mut out,
        )
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({"api_key": "abc", "scopes": ["ui"]})
        );
    }

    #[test]
    fn test_show_yaml_round_trips_through_loader() {
        let temp = TempDir::new().unwrap();
        let store = store_with_user(&temp, "api_key: abc\nmodel: m1\n");
        let mut out = Vec::new();

        run_show(&store, &ShowArgs { format: ShowFormat::Yaml }, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let reparsed =
            crate::config::parse_document(&text, &PathBuf::from("<stdout>")).unwrap();
        assert_eq!(reparsed, store.as_mapping().unwrap());
    }

    #[test]
    fn test_get_unknown_key_prints_nothing() {
        let temp = TempDir::new().unwrap();
        let store = store_with_user(&temp, "api_key: abc\n");
        let mut out = Vec::new();

        run_get(&store, &GetArgs { key: "nope".into() }, &mut out).unwrap();
        assert!(out.is_empty());

        run_get(&store, &GetArgs { key: ":api_key".into() }, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "abc\n");
    }

    #[test]
    fn test_paths_outside_repository() {
        let temp = TempDir::new().unwrap();
        let store = store_with_user(&temp, "api_key: abc\n");
        let mut out = Vec::new();

        run_paths(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("config.yml"));
        assert!(text.contains("(not in a repository)"));
    }
}
