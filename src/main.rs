use anyhow::{Context, Result};
use clap::{Args, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};
use grasp_bridge::config::CliConfig;
use grasp_bridge::msg::GraspConfigList;
use grasp_bridge::params::{
    DetectionConfig, ParameterSpec, ParameterStore, ParameterTable, PlanningConfig,
    load_detection_config, load_planning_config, unknown_keys,
};
use grasp_bridge::render::{render_parameters, render_specs};
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "grasp-bridge",
    about = "Grasp detection parameter utilities",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Disable color
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Tool config file (default: <config dir>/grasp-bridge/config.toml)
    #[arg(long, global = true, value_name = "path")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved detection and planning parameters
    Params(ParamsArgs),
    /// List every parameter with its type and default
    List(ListArgs),
    /// Print the JSON schema of the parameter tables and result message
    Schema,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Detection,
    Planning,
}

#[derive(Args, Clone)]
struct ParamsArgs {
    /// Parameter file (.toml or .json); repeatable, later files win
    #[arg(short, long = "file", value_name = "path")]
    files: Vec<PathBuf>,

    /// Override a parameter, e.g. -p num_samples:=250
    #[arg(short = 'p', long = "param", value_name = "key:=value")]
    params: Vec<String>,

    /// Ignore GRASP_PARAM_* environment variables
    #[arg(long)]
    no_env: bool,

    /// Output JSON
    #[arg(long)]
    json: bool,

    /// Only show one table
    #[arg(long, value_enum)]
    section: Option<Section>,
}

#[derive(Args, Clone)]
struct ListArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,

    /// Only list one table
    #[arg(long, value_enum)]
    section: Option<Section>,
}

fn shows(selected: Option<Section>, section: Section) -> bool {
    selected.is_none_or(|s| s == section)
}

fn print_json(value: &Value, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}

fn run_params(args: ParamsArgs, config: &CliConfig, color: bool) -> Result<()> {
    let mut files = config.parameters.files.clone();
    files.extend(args.files);
    let use_env = config.parameters.env_overrides && !args.no_env;

    let store = ParameterStore::resolve(&files, use_env, &args.params)
        .context("failed to resolve parameters")?;
    for key in unknown_keys(&store) {
        tracing::warn!(key, "unknown parameter ignored");
    }

    let detection = load_detection_config(&store);
    let planning = load_planning_config(&store);

    if args.json {
        let mut out = Map::new();
        if shows(args.section, Section::Detection) {
            out.insert("detection".to_string(), serde_json::to_value(&detection)?);
        }
        if shows(args.section, Section::Planning) {
            out.insert("planning".to_string(), serde_json::to_value(&planning)?);
        }
        return print_json(&Value::Object(out), config.output.pretty_json);
    }

    let mut blocks = Vec::new();
    if shows(args.section, Section::Detection) {
        blocks.push(render_parameters(
            "Detection parameters:",
            &detection.parameters(),
            color,
        ));
    }
    if shows(args.section, Section::Planning) {
        blocks.push(render_parameters(
            "Planning parameters:",
            &planning.parameters(),
            color,
        ));
    }
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

fn specs_json(specs: &[ParameterSpec]) -> Result<Value> {
    let entries = specs
        .iter()
        .map(|spec| {
            Ok(json!({
                "key": spec.key,
                "type": serde_json::to_value(spec.kind)?,
                "default": serde_json::to_value(&spec.default)?,
                "description": spec.description,
                "fixed": spec.fixed,
            }))
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;
    Ok(Value::Array(entries))
}

fn run_list(args: ListArgs, config: &CliConfig, color: bool) -> Result<()> {
    let detection = DetectionConfig::parameter_specs();
    let planning = PlanningConfig::parameter_specs();

    if args.json {
        let mut out = Map::new();
        if shows(args.section, Section::Detection) {
            out.insert("detection".to_string(), specs_json(&detection)?);
        }
        if shows(args.section, Section::Planning) {
            out.insert("planning".to_string(), specs_json(&planning)?);
        }
        return print_json(&Value::Object(out), config.output.pretty_json);
    }

    let mut blocks = Vec::new();
    if shows(args.section, Section::Detection) {
        blocks.push(render_specs("Detection parameters:", &detection, color));
    }
    if shows(args.section, Section::Planning) {
        blocks.push(render_specs("Planning parameters:", &planning, color));
    }
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

fn run_schema(config: &CliConfig) -> Result<()> {
    let schema = json!({
        "detection": serde_json::to_value(schemars::schema_for!(DetectionConfig))?,
        "planning": serde_json::to_value(schemars::schema_for!(PlanningConfig))?,
        "grasp_config_list": serde_json::to_value(schemars::schema_for!(GraspConfigList))?,
    });
    print_json(&schema, config.output.pretty_json)
}

fn detect_color_choice() -> ColorChoice {
    // Scan args before clap so help/errors honor `--no-color`.
    // Stop at `--` which terminates flags.
    let mut args = std::env::args_os();
    args.next();
    let mut flag = false;
    for arg in args {
        if arg == "--" {
            break;
        }
        if arg == "--no-color" {
            flag = true;
            break;
        }
    }
    if flag || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let color = detect_color_choice();
    let matches = Cli::command().color(color).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => CliConfig::load_from(path),
        None => CliConfig::load(),
    };
    let want_color = !cli.no_color
        && !matches!(color, ColorChoice::Never)
        && config.output.color
        && supports_color::on(supports_color::Stream::Stdout).is_some();

    match cli.command {
        Some(Commands::Params(args)) => run_params(args, &config, want_color),
        Some(Commands::List(args)) => run_list(args, &config, want_color),
        Some(Commands::Schema) => run_schema(&config),
        None => Ok(()),
    }
}
