use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use afued_message_templates::config::Settings;
use afued_message_templates::registry::Registry;
use afued_message_templates::store::{create_template_store, TemplateStore};
use afued_message_templates::template::{
    render_with_policy, validate_texts, Channel, MissingPolicy, RenderContext, TemplateDraft,
};

#[derive(Parser)]
#[command(name = "afued-templates")]
#[command(about = "Author, lint and preview portal message templates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the variable catalog, grouped by category
    Variables,

    /// Validate both bodies of a draft against the registry
    Check {
        /// Draft JSON file: { "name", "sms_body", "email_body" }
        draft: PathBuf,
    },

    /// Render a preview of a draft with concrete values
    Render {
        /// Draft JSON file
        draft: PathBuf,

        /// Render only one channel (both when omitted)
        #[arg(long)]
        channel: Option<ChannelArg>,

        /// JSON file with a string map of variable values
        #[arg(long)]
        context: Option<PathBuf>,

        /// Extra values as name=value (repeatable, overrides the file)
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// What to do with variables absent from the context
        #[arg(long)]
        missing: Option<MissingArg>,
    },

    /// List stored templates
    List,

    /// Create (no id) or update (with id) a stored template from a draft
    Push {
        /// Draft JSON file
        draft: PathBuf,

        /// Id of the stored template to update
        #[arg(long)]
        id: Option<Uuid>,
    },

    /// Delete a stored template
    Remove {
        /// Id of the stored template
        id: Uuid,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ChannelArg {
    Sms,
    Email,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Sms => Channel::Sms,
            ChannelArg::Email => Channel::Email,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MissingArg {
    KeepPlaceholder,
    Empty,
    Fail,
}

impl From<MissingArg> for MissingPolicy {
    fn from(arg: MissingArg) -> Self {
        match arg {
            MissingArg::KeepPlaceholder => MissingPolicy::KeepPlaceholder,
            MissingArg::Empty => MissingPolicy::Empty,
            MissingArg::Fail => MissingPolicy::Fail,
        }
    }
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("Expected name=value, got {raw:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let settings = Settings::new().context("Failed to load configuration")?;

    // A bad catalog must stop every command before it does any work
    let registry = match &settings.registry.file {
        Some(path) => Registry::from_file(path)
            .with_context(|| format!("Failed to load registry from {path}"))?,
        None => Registry::builtin().context("Built-in variable catalog is invalid")?,
    };
    tracing::debug!(variables = registry.len(), "Registry loaded");

    match cli.command {
        Commands::Variables => print_variables(&registry),
        Commands::Check { draft } => check(&registry, &draft)?,
        Commands::Render {
            draft,
            channel,
            context,
            vars,
            missing,
        } => {
            let policy = missing.map(Into::into).unwrap_or(settings.render.missing);
            render_preview(&draft, channel.map(Into::into), context, vars, policy)?;
        }
        Commands::List => {
            let store = create_template_store(&settings.store)?;
            list_templates(store).await?;
        }
        Commands::Push { draft, id } => {
            let store = create_template_store(&settings.store)?;
            push(&registry, store, &draft, id).await?;
        }
        Commands::Remove { id } => {
            let store = create_template_store(&settings.store)?;
            store.delete(id).await?;
            println!("Deleted {id}");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_variables(registry: &Registry) {
    for category in registry.categories() {
        println!("{}", category.name);
        for variable in &category.variables {
            println!(
                "  {{{{{}}}}}  {} (e.g. {})",
                variable.name, variable.description, variable.example
            );
        }
        println!();
    }
}

fn load_draft(path: &Path) -> Result<TemplateDraft> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Draft file {} is not valid JSON", path.display()))
}

fn check(registry: &Registry, path: &Path) -> Result<()> {
    let draft = load_draft(path)?;
    let result = validate_texts(draft.bodies(), registry);

    for name in &result.valid {
        println!("ok      {name}");
    }
    for name in &result.invalid {
        println!("unknown {name}");
    }

    if !draft.has_name() {
        bail!("Template name is required");
    }
    if !result.is_clean() {
        bail!("{} unknown variable(s)", result.invalid.len());
    }

    println!("{} variable(s), all known", result.valid.len());
    Ok(())
}

fn render_preview(
    path: &Path,
    channel: Option<Channel>,
    context_file: Option<PathBuf>,
    vars: Vec<(String, String)>,
    policy: MissingPolicy,
) -> Result<()> {
    let draft = load_draft(path)?;

    let mut values: HashMap<String, String> = match context_file {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read context file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Context file {} is not valid JSON", path.display()))?
        }
        None => HashMap::new(),
    };
    values.extend(vars);
    let context = RenderContext::from(values);

    let channels = match channel {
        Some(c) => vec![c],
        None => vec![Channel::Sms, Channel::Email],
    };

    for channel in channels {
        let rendered = render_with_policy(draft.body(channel), &context, policy)?;
        println!("--- {channel} ---");
        println!("{}", rendered.output);
        for name in &rendered.missing {
            eprintln!("missing: {name}");
        }
    }

    Ok(())
}

async fn list_templates(
    store: Arc<dyn TemplateStore>,
) -> Result<()> {
    let templates = store.list().await?;
    if templates.is_empty() {
        println!("No stored templates");
        return Ok(());
    }

    for template in templates {
        println!(
            "{}  {}  (updated {})",
            template.id,
            template.name,
            template.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

async fn push(
    registry: &Registry,
    store: Arc<dyn TemplateStore>,
    path: &Path,
    id: Option<Uuid>,
) -> Result<()> {
    let draft = load_draft(path)?;
    if !draft.has_name() {
        bail!("Template name is required");
    }

    let result = validate_texts(draft.bodies(), registry);
    if !result.is_clean() {
        let unknown: Vec<&str> = result.invalid.iter().map(String::as_str).collect();
        tracing::warn!(unknown = ?unknown, "Draft references unknown variables");
    }

    let stored = match id {
        Some(id) => store.update(id, draft).await?,
        None => store.create(draft).await?,
    };
    println!("{}  {}", stored.id, stored.name);
    Ok(())
}
