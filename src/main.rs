use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use vercel_project_domain::config::Config;
use vercel_project_domain::provider::project_domain;
use vercel_project_domain::provider::schema::{get_all_resource_types, get_schema};
use vercel_project_domain::provider::{InMemoryResourceData, ResourceData, ResourceState};
use vercel_project_domain::vercel::client::VercelClient;
use vercel_project_domain::VERSION;

/// Manage Vercel project domains from the command line
#[derive(Parser, Debug)]
#[command(name = "vercel-project-domain", version = VERSION, about, long_about = None)]
struct Args {
    /// Vercel API token (defaults to VERCEL_TOKEN, then the config file)
    #[arg(long, global = true)]
    token: Option<String>,

    /// API endpoint (defaults to https://api.vercel.com)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Attach a domain to a project and write the state file
    Create(CreateArgs),
    /// Refresh the state file from the API
    Read(StateArgs),
    /// Change the redirect of an existing domain
    Update(UpdateArgs),
    /// Remove the domain from its project and delete the state file
    Delete(StateArgs),
    /// Print the resource schemas as JSON
    Schema,
    /// Store defaults in the config file
    Configure(ConfigureArgs),
}

#[derive(ClapArgs, Debug)]
struct StateArgs {
    /// State file of the resource
    #[arg(short, long)]
    state: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct CreateArgs {
    #[command(flatten)]
    state: StateArgs,

    /// Project the domain belongs to
    #[arg(short, long)]
    project_id: String,

    /// Domain name
    #[arg(short, long)]
    name: String,

    /// Team scope (defaults to VERCEL_TEAM_ID, then the config file)
    #[arg(long)]
    team_id: Option<String>,

    /// Target domain to redirect to
    #[arg(long)]
    redirect: Option<String>,

    /// Redirect status code (301, 302, 307, 308)
    #[arg(long)]
    redirect_status_code: Option<i64>,

    /// Git branch the domain is auto assigned to
    #[arg(long)]
    git_branch: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct UpdateArgs {
    #[command(flatten)]
    state: StateArgs,

    /// New redirect target; an empty string removes the redirect
    #[arg(long)]
    redirect: Option<String>,
}

/// `--token` and `--api-url` are taken from the global flags
#[derive(ClapArgs, Debug)]
struct ConfigureArgs {
    /// Default team scope
    #[arg(long)]
    team_id: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("vercel-project-domain {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir
            .join("vercel-project-domain")
            .join("vercel-project-domain.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home
            .join(".vercel-project-domain")
            .join("vercel-project-domain.log");
    }
    PathBuf::from("vercel-project-domain.log")
}

fn load_state(path: &Path) -> Result<ResourceState> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read state {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse state {:?}", path))
}

fn save_state(path: &Path, state: &ResourceState) -> Result<()> {
    let content = serde_json::to_string_pretty(state)?;
    std::fs::write(path, content).with_context(|| format!("Failed to write state {:?}", path))
}

fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| millis.to_string())
}

fn print_summary(data: &InMemoryResourceData) {
    println!("id:         {}", data.id());
    println!("name:       {}", data.get_string("name"));
    println!("project_id: {}", data.get_string("project_id"));
    if let Some(redirect) = data.get_ok_string("redirect") {
        println!(
            "redirect:   {} ({})",
            redirect,
            data.get_int("redirect_status_code")
        );
    }
    println!("created_at: {}", format_millis(data.get_int("created_at")));
    println!("updated_at: {}", format_millis(data.get_int("updated_at")));
}

fn create_config(args: &CreateArgs, team_id: Option<String>) -> Map<String, Value> {
    let mut config = Map::new();
    config.insert("project_id".into(), Value::from(args.project_id.as_str()));
    config.insert("name".into(), Value::from(args.name.as_str()));
    if let Some(team_id) = team_id {
        config.insert("team_id".into(), Value::from(team_id));
    }
    if let Some(redirect) = &args.redirect {
        config.insert("redirect".into(), Value::from(redirect.as_str()));
    }
    if let Some(code) = args.redirect_status_code {
        config.insert("redirect_status_code".into(), Value::from(code));
    }
    if let Some(branch) = &args.git_branch {
        config.insert("git_branch".into(), Value::from(branch.as_str()));
    }
    config
}

fn build_client(args: &Args, config: &Config) -> Result<VercelClient> {
    let token = config.effective_token(args.token.as_deref())?;
    let api_url = config.effective_api_url(args.api_url.as_deref());
    tracing::info!("Using API endpoint: {}", api_url);
    VercelClient::with_base_url(&api_url, &token)
}

async fn run(args: &Args, config: Config) -> Result<()> {
    let schema = project_domain::schema();

    match &args.command {
        Command::Create(create) => {
            let client = build_client(args, &config)?;
            let team_id = config.effective_team_id(create.team_id.as_deref());
            let mut data =
                InMemoryResourceData::from_config(schema, create_config(create, team_id))?;

            project_domain::create(&mut data, &client).await?;
            if data.id().is_empty() {
                bail!("Create returned no identity, not writing {:?}", create.state.state);
            }
            print_summary(&data);
            save_state(&create.state.state, &data.into_state())?;
        }
        Command::Read(state) => {
            let client = build_client(args, &config)?;
            let mut data = InMemoryResourceData::from_state(schema, load_state(&state.state)?);

            project_domain::read(&mut data, &client).await?;
            if data.id().is_empty() {
                println!("Project domain no longer exists, removing {:?}", state.state);
                std::fs::remove_file(&state.state)?;
            } else {
                print_summary(&data);
                save_state(&state.state, &data.into_state())?;
            }
        }
        Command::Update(update) => {
            let client = build_client(args, &config)?;
            let mut changes = Map::new();
            if let Some(redirect) = &update.redirect {
                changes.insert("redirect".into(), Value::from(redirect.as_str()));
            }
            let mut data = InMemoryResourceData::with_changes(
                schema,
                load_state(&update.state.state)?,
                changes,
            )?;

            tracing::debug!("Changed attributes: {:?}", data.changed_keys());
            project_domain::update(&mut data, &client).await?;
            print_summary(&data);
            save_state(&update.state.state, &data.into_state())?;
        }
        Command::Delete(state) => {
            let client = build_client(args, &config)?;
            let mut data = InMemoryResourceData::from_state(schema, load_state(&state.state)?);

            project_domain::delete(&mut data, &client).await?;
            std::fs::remove_file(&state.state)?;
            println!("Deleted {}", data.id());
        }
        Command::Schema => {
            let mut root = Map::new();
            for type_name in get_all_resource_types() {
                if let Some(resource) = get_schema(type_name) {
                    root.insert(type_name.into(), serde_json::to_value(resource)?);
                }
            }
            println!("{}", serde_json::to_string_pretty(&root)?);
        }
        Command::Configure(configure) => {
            let mut config = config;
            if let Some(token) = &args.token {
                config.token = Some(token.clone());
            }
            if let Some(api_url) = &args.api_url {
                config.api_url = Some(api_url.clone());
            }
            if let Some(team_id) = &configure.team_id {
                config.team_id = Some(team_id.clone());
            }
            config.save()?;
            if let Some(path) = Config::config_path() {
                println!("Saved {:?}", path);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let config = Config::load();

    let result = run(&args, config).await;
    if let Err(err) = &result {
        tracing::error!("{:#}", err);
    }

    result
}
