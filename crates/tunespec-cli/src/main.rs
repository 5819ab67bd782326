#![deny(unsafe_code)]

//! tunespec CLI: validate, inspect, and export spec documents.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tunespec_config::AppConfig;
use tunespec_core::{Control, DirectoryResolver, TunableSpec, Value, document};

/// tunespec: live-tunable values backed by JSON spec documents.
#[derive(Parser)]
#[command(name = "tunespec", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "tunespec.toml")]
    config: PathBuf,

    /// Directory holding spec documents (overrides `resources.dir`).
    #[arg(short, long)]
    resources: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a spec loads cleanly.
    Validate {
        /// Spec name (resolved as `<resources>/<name>.json`).
        name: String,
    },

    /// List a spec's entries.
    Show {
        name: String,

        /// Print the key → value mapping as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print a single value.
    Get { name: String, key: String },

    /// Apply overrides and write the resulting spec document.
    Export {
        name: String,

        /// Override a value before exporting (repeatable). Numbers are
        /// clamped into the slider range.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .await
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let resources = cli.resources.unwrap_or_else(|| config.resources.dir.clone());
    let resolver = DirectoryResolver::new(resources);

    match cli.command {
        Commands::Validate { name } => cmd_validate(&resolver, &name),
        Commands::Show { name, json } => cmd_show(&resolver, &name, json),
        Commands::Get { name, key } => cmd_get(&resolver, &name, &key),
        Commands::Export {
            name,
            overrides,
            output,
        } => cmd_export(&resolver, &config, &name, &overrides, output.as_deref()).await,
    }
}

fn load_spec(resolver: &DirectoryResolver, name: &str) -> Result<TunableSpec> {
    TunableSpec::load(name, resolver).with_context(|| {
        format!(
            "failed to load spec {name:?} from {}",
            resolver.root().display()
        )
    })
}

fn cmd_validate(resolver: &DirectoryResolver, name: &str) -> Result<()> {
    let spec = load_spec(resolver, name)?;
    println!(
        "Spec '{}' at '{}' is valid ({} entries).",
        name,
        resolver.path_for(name).display(),
        spec.len()
    );
    Ok(())
}

fn cmd_show(resolver: &DirectoryResolver, name: &str, json: bool) -> Result<()> {
    let spec = load_spec(resolver, name)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&spec.to_map())?);
        return Ok(());
    }
    for line in entry_table(&spec) {
        println!("{line}");
    }
    Ok(())
}

fn cmd_get(resolver: &DirectoryResolver, name: &str, key: &str) -> Result<()> {
    let spec = load_spec(resolver, name)?;
    println!("{}", spec.value(key)?);
    Ok(())
}

async fn cmd_export(
    resolver: &DirectoryResolver,
    config: &AppConfig,
    name: &str,
    overrides: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let mut spec = load_spec(resolver, name)?;
    for raw in overrides {
        let (key, value) = parse_override(raw)?;
        let stored = spec.set(key, value)?;
        info!(key, %stored, "Applied override");
    }

    let document = if config.export.pretty {
        spec.export()?
    } else {
        document::serialize_compact(spec.entries())?
    };

    match output {
        Some(path) => {
            tokio::fs::write(path, format!("{document}\n"))
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Exported '{}' to '{}'.", name, path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}

/// Parse `KEY=VALUE`; `true`/`false` become switches, anything else must
/// be a number.
fn parse_override(raw: &str) -> Result<(&str, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("override {raw:?} must look like KEY=VALUE");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("override {raw:?} has an empty key");
    }
    let value = match value.trim() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::Number(
            other
                .parse::<f64>()
                .with_context(|| format!("override {raw:?}: {other:?} is not a number or bool"))?,
        ),
    };
    Ok((key, value))
}

/// One aligned line per entry: key, label, control, value.
fn entry_table(spec: &TunableSpec) -> Vec<String> {
    let key_width = spec.keys().map(str::len).max().unwrap_or(0).max(3);
    let label_width = spec
        .entries()
        .iter()
        .map(|e| e.label().len())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut lines = vec![format!(
        "{:key_width$}  {:label_width$}  {:6}  VALUE",
        "KEY", "LABEL", "KIND"
    )];
    for entry in spec.entries() {
        let (kind, value) = match *entry.control() {
            Control::Slider { value, min, max } => ("slider", format!("{value} [{min}, {max}]")),
            Control::Switch { value } => ("switch", if value { "on" } else { "off" }.to_string()),
        };
        lines.push(format!(
            "{:key_width$}  {:label_width$}  {:6}  {}",
            entry.key(),
            entry.label(),
            kind,
            value
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tunespec_test_utils::document::scenario_document;
    use tunespec_test_utils::resources::TestResources;
    use tunespec_test_utils::tracing_setup::init_test_tracing;

    #[test]
    fn test_cli_parses_export_overrides() {
        let cli = Cli::try_parse_from([
            "tunespec", "export", "MainSpec", "--set", "Spacing=20", "--set", "Enabled=true", "-o",
            "out.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Export {
                name,
                overrides,
                output,
            } => {
                assert_eq!(name, "MainSpec");
                assert_eq!(overrides, vec!["Spacing=20", "Enabled=true"]);
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(
            parse_override("Spacing=12.5").unwrap(),
            ("Spacing", Value::Number(12.5))
        );
        assert_eq!(
            parse_override(" Enabled = false").unwrap(),
            ("Enabled", Value::Bool(false))
        );
        assert!(parse_override("Spacing").is_err());
        assert!(parse_override("=1").is_err());
        assert!(parse_override("Spacing=wide").is_err());
    }

    #[test]
    fn test_entry_table() {
        let spec = TunableSpec::from_document("MainSpec", scenario_document().as_bytes()).unwrap();
        let lines = entry_table(&spec);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("KEY"));
        assert!(lines[1].contains("slider") && lines[1].contains("175 [10, 300]"));
        assert!(lines[2].contains("switch") && lines[2].ends_with("off"));
    }

    #[tokio::test]
    async fn test_export_applies_overrides() {
        init_test_tracing();
        let resources = TestResources::new();
        resources.write_spec("MainSpec", &scenario_document());
        let config_path = resources.write_config("[logging]\nlevel = \"debug\"\n");
        let config = AppConfig::load(&config_path).await.unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.export.dir, resources.path());

        let output = resources.path().join("out.json");
        let overrides = vec!["Spacing=1000".to_string(), "Enabled=true".to_string()];
        cmd_export(
            &resources.resolver(),
            &config,
            "MainSpec",
            &overrides,
            Some(&output),
        )
        .await
        .unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.lines().count() > 1);
        let spec = TunableSpec::from_document("MainSpec", written.as_bytes()).unwrap();
        assert_eq!(spec.get::<f64>("Spacing").unwrap(), 300.0);
        assert!(spec.get::<bool>("Enabled").unwrap());
    }

    #[tokio::test]
    async fn test_export_rejects_mismatched_override() {
        let resources = TestResources::new();
        resources.write_spec("MainSpec", &scenario_document());
        let overrides = vec!["Enabled=0.5".to_string()];
        let err = cmd_export(
            &resources.resolver(),
            &AppConfig::default(),
            "MainSpec",
            &overrides,
            None,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Enabled"));
    }
}
