mod logging;
mod overrides;
mod settings;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;

use fixtura_catalog::{CatalogOptions, PostgresCatalog, SchemaCatalog, SnapshotCatalog};
use fixtura_core::{Error as CoreError, SchemaSnapshot};
use fixtura_generate::{
    FixtureEngine, FixtureError, GeneratorRegistry, InMemoryStore, Locale, ModelRegistry,
};
use logging::init_logging;
use settings::{Settings, load_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "fixtura", version, about = "Schema-driven test fixtures")]
struct Cli {
    /// Path to fixtura.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Emit logs as JSON on stderr.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build fixtures in memory and print their attributes.
    Make(BuildArgs),
    /// Build and persist fixtures into an in-memory store, then print every saved row.
    Create(BuildArgs),
    /// Print the attributes `make` would produce for one fixture.
    Attributes(FixtureArgs),
    /// List registered field and type generators.
    Generators,
    /// Print the normalized columns of a live Postgres table.
    Introspect(IntrospectArgs),
    /// Print the JSON Schema of the schema snapshot format.
    SchemaJson,
}

#[derive(Args, Debug)]
struct FixtureArgs {
    /// Model identifier, e.g. `post` or `blog::post`.
    model: String,
    /// Schema snapshot (JSON). Falls back to `schema` in fixtura.toml.
    #[arg(long)]
    schema: Option<PathBuf>,
    /// Attribute override, repeatable. Values are parsed as JSON when possible.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
    /// Seed for reproducible values.
    #[arg(long)]
    seed: Option<u64>,
    /// Locale for semantic fields (en_US, pt_BR).
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Args, Debug)]
struct BuildArgs {
    #[command(flatten)]
    fixture: FixtureArgs,
    /// Number of top-level fixtures to build.
    #[arg(long, default_value_t = 1)]
    count: usize,
}

#[derive(Args, Debug)]
struct IntrospectArgs {
    /// Database connection string.
    #[arg(value_name = "CONNECTION_STRING")]
    conn: String,
    /// Table to describe.
    #[arg(long)]
    table: String,
    /// Schema the table lives in.
    #[arg(long, default_value = "public")]
    schema: String,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Make(args) => run_make(&settings, args),
        Command::Create(args) => run_create(&settings, args),
        Command::Attributes(args) => run_attributes(&settings, args),
        Command::Generators => run_generators(),
        Command::Introspect(args) => run_introspect(args),
        Command::SchemaJson => run_schema_json(),
    }
}

fn run_make(settings: &Settings, args: BuildArgs) -> Result<(), CliError> {
    let mut engine = build_engine(settings, &args.fixture, InMemoryStore::new())?;
    let defaults = settings.model_defaults(&args.fixture.model);
    let overrides = overrides::merge(defaults, &args.fixture.set)?;

    let built = engine.make_many(&args.fixture.model, args.count, overrides)?;
    let rendered: Vec<Value> = built
        .iter()
        .map(|instance| serde_json::to_value(instance.attributes()))
        .collect::<Result<_, _>>()?;
    print_json(&single_or_array(rendered))
}

fn run_create(settings: &Settings, args: BuildArgs) -> Result<(), CliError> {
    let store = InMemoryStore::new();
    let mut engine = build_engine(settings, &args.fixture, store.clone())?;
    let defaults = settings.model_defaults(&args.fixture.model);
    let overrides = overrides::merge(defaults, &args.fixture.set)?;

    engine.create_many(&args.fixture.model, args.count, overrides)?;
    tracing::info!(rows = store.total(), "fixtures created");
    print_json(&serde_json::to_value(store.snapshot())?)
}

fn run_attributes(settings: &Settings, args: FixtureArgs) -> Result<(), CliError> {
    let mut engine = build_engine(settings, &args, InMemoryStore::new())?;
    let defaults = settings.model_defaults(&args.model);
    let overrides = overrides::merge(defaults, &args.set)?;

    let attributes = engine.attributes_for(&args.model, overrides)?;
    print_json(&serde_json::to_value(attributes)?)
}

fn run_generators() -> Result<(), CliError> {
    let registry = GeneratorRegistry::with_defaults();
    for entry in registry.entries() {
        println!("{}\t{}\t{}", entry.slot, entry.key, entry.id);
    }
    Ok(())
}

fn run_introspect(args: IntrospectArgs) -> Result<(), CliError> {
    let options = CatalogOptions {
        schema: args.schema,
        ..CatalogOptions::default()
    };
    let catalog = PostgresCatalog::connect_with_options(&args.conn, options)?;
    let columns = catalog.columns(&args.table)?;
    tracing::info!(table = %args.table, columns = columns.len(), "table introspected");
    print_json(&serde_json::to_value(columns)?)
}

fn run_schema_json() -> Result<(), CliError> {
    let schema = schemars::schema_for!(SchemaSnapshot);
    print_json(&serde_json::to_value(schema)?)
}

fn build_engine(
    settings: &Settings,
    args: &FixtureArgs,
    store: InMemoryStore,
) -> Result<FixtureEngine, CliError> {
    let schema_path = args
        .schema
        .clone()
        .or_else(|| settings.schema.clone())
        .ok_or_else(|| {
            CliError::InvalidConfig(
                "no schema snapshot: pass --schema or set `schema` in fixtura.toml".to_string(),
            )
        })?;

    let catalog = SnapshotCatalog::from_path(&schema_path)?;
    let models = ModelRegistry::from_snapshot(catalog.snapshot());

    let mut options = settings.options.clone();
    if let Some(seed) = args.seed {
        options.seed = Some(seed);
    }
    if let Some(locale) = &args.locale {
        options.locale = Locale::parse(locale)
            .ok_or_else(|| CliError::InvalidConfig(format!("unsupported locale: {locale}")))?;
    }

    tracing::debug!(
        schema = %schema_path.display(),
        models = models.class_names().len(),
        "engine ready"
    );
    Ok(FixtureEngine::new(catalog, models, store).with_options(options))
}

fn single_or_array(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
