use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sbb_mapper::{EntityKind, MapperConfig, MappingSettings, Record, RecordMapper};

/// Map SBB DAO records between storage rows and application objects
#[derive(Parser)]
#[command(name = "sbb-map", version)]
struct Cli {
    /// YAML file overriding built-in fields and entity profiles
    #[arg(long, global = true, env = "SBB_MAPPING_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Map storage rows (snake_case) to application objects (camelCase)
    ToApplication(MapArgs),
    /// Map application objects (camelCase) to storage rows (snake_case)
    ToStorage(MapArgs),
    /// Write a settings file with a profile for every known entity
    InitSettings {
        path: PathBuf,
    },
    /// List the entities that have mappers and their declared fields
    Entities,
}

#[derive(Args)]
struct MapArgs {
    /// JSON file holding an object or an array of objects (stdin when omitted)
    input: Option<PathBuf>,

    /// Take field declarations from this entity's profile
    #[arg(long)]
    entity: Option<String>,

    /// Extra application-side date field (repeatable)
    #[arg(long = "date-field")]
    date_fields: Vec<String>,

    /// Extra application-side JSON field (repeatable)
    #[arg(long = "json-field")]
    json_fields: Vec<String>,

    /// Only honour explicitly declared fields
    #[arg(long)]
    no_builtins: bool,
}

#[derive(Clone, Copy, Debug)]
enum Direction {
    ToApplication,
    ToStorage,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = MappingSettings::resolve(cli.settings.as_deref())?;

    match cli.command {
        Command::ToApplication(args) => run_mapping(&settings, &args, Direction::ToApplication),
        Command::ToStorage(args) => run_mapping(&settings, &args, Direction::ToStorage),
        Command::InitSettings { path } => {
            MappingSettings::with_entity_defaults().save(&path)?;
            info!("Wrote mapping settings to {:?}", path);
            Ok(())
        }
        Command::Entities => list_entities(),
    }
}

/// Pick the mapper and config for a run.
///
/// A known entity starts from its own mapper and custom mappings; a settings
/// profile for it adds date and JSON fields on top. An entity known only to
/// the settings file uses the settings mapper. Command-line fields are added
/// last.
fn build_plan(
    settings: &MappingSettings,
    args: &MapArgs,
    direction: Direction,
) -> Result<(RecordMapper, MapperConfig)> {
    let (mut mapper, mut config) = (settings.record_mapper(), MapperConfig::new());

    if let Some(entity) = args.entity.as_deref() {
        match (EntityKind::from_name(entity), settings.entity_config(entity)) {
            (Some(kind), overrides) => {
                let profile = kind.profile();
                debug!("Using built-in mapper for entity '{}'", kind);
                mapper = profile.record_mapper;
                config = match direction {
                    Direction::ToApplication => profile.read_config,
                    Direction::ToStorage => profile.write_config,
                };
                if let Some(overrides) = overrides {
                    debug!("Adding settings profile fields for entity '{}'", kind);
                    config = config.merge(overrides);
                }
            }
            (None, Some(overrides)) => {
                debug!("Using settings profile for entity '{}'", entity);
                config = overrides;
            }
            (None, None) => {
                // Fails with the list of known entities.
                entity.parse::<EntityKind>().map_err(anyhow::Error::msg)?;
            }
        }
    }

    if args.no_builtins {
        mapper = RecordMapper::without_builtins();
    }

    let config = config
        .with_date_fields(args.date_fields.iter().cloned())
        .with_json_fields(args.json_fields.iter().cloned());

    Ok((mapper, config))
}

fn run_mapping(settings: &MappingSettings, args: &MapArgs, direction: Direction) -> Result<()> {
    let (mapper, config) = build_plan(settings, args, direction)?;
    let input = read_input(args.input.as_deref())?;

    let map_one = |value: Value| -> Result<Value> {
        let record = Record::from_json(value)?;
        let mapped = match direction {
            Direction::ToApplication => mapper.to_application(&record, &config)?,
            Direction::ToStorage => mapper.to_storage(&record, &config)?,
        };
        Ok(mapped.to_json())
    };

    let output = match input {
        Value::Array(items) => {
            let count = items.len();
            let mapped = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    map_one(item).with_context(|| format!("Failed to map record {}", index))
                })
                .collect::<Result<Vec<_>>>()?;
            info!("Mapped {} records ({:?})", count, direction);
            Value::Array(mapped)
        }
        single => {
            let mapped = map_one(single).context("Failed to map record")?;
            info!("Mapped 1 record ({:?})", direction);
            mapped
        }
    };

    let rendered = serde_json::to_string_pretty(&output)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered)?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input from {:?}", path))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            buffer
        }
    };

    if text.trim().is_empty() {
        bail!("Input is empty, expected a JSON object or array");
    }

    serde_json::from_str(&text).context("Input is not valid JSON")
}

fn list_entities() -> Result<()> {
    let mut stdout = io::stdout().lock();
    for kind in EntityKind::ALL {
        let profile = kind.profile();
        let dates: Vec<&str> = profile.read_config.date_fields.iter().map(String::as_str).collect();
        let json: Vec<&str> = profile.read_config.json_fields.iter().map(String::as_str).collect();
        writeln!(
            stdout,
            "{:<22} dates: [{}]  json: [{}]",
            kind.name(),
            dates.join(", "),
            json.join(", ")
        )?;
    }
    Ok(())
}
