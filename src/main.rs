use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use slack_robot::application::messaging::{CommandDispatcher, CommandQueue};
use slack_robot::application::services::{CommandService, MentionResolver};
use slack_robot::domain::traits::{Bot, Executor};
use slack_robot::infrastructure::adapters::SlackAdapter;
use slack_robot::infrastructure::config::Config;
use slack_robot::infrastructure::executor::{AllowListExecutor, ShellExecutor};
use slack_robot::infrastructure::webhook::{self, SignatureVerifier, WebhookState};

#[derive(Parser)]
#[command(name = "slack-robot")]
#[command(about = "Run shell commands from Slack mentions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: ~/.robot.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,

    /// Signing secret (overrides config)
    #[arg(long)]
    signing_secret: Option<String>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server and dispatcher
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = load_config(&cli)?;
            init_logging(config.debug);
            let rt = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            rt.block_on(run_bot(config))
        }
        Commands::Version => {
            println!("slack-robot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => {
            let yaml = serde_yaml::to_string(&Config::default())?;
            println!("{}", yaml);
            println!("\nSave this to ~/.robot.yaml and adjust as needed.");
            Ok(())
        }
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = cli.config.clone().or_else(Config::default_path);
    let mut config = Config::resolve(path.as_deref())?;

    if let Some(token) = &cli.token {
        config.slack.token = Some(token.clone());
    }
    if let Some(secret) = &cli.signing_secret {
        config.slack.signing_secret = Some(secret.clone());
    }
    if let Some(listen) = &cli.listen {
        config.server.listen = listen.clone();
    }

    config.validate()?;
    Ok(config)
}

async fn run_bot(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting {}", config.bot.name);

    // validate() guarantees both are present
    let token = config.slack.token.clone().unwrap_or_default();
    let secret = config.slack.signing_secret.clone().unwrap_or_default();

    let bot: Arc<dyn Bot> = Arc::new(SlackAdapter::with_api_base(token, &config.slack.api_base));
    let executor: Arc<dyn Executor> = Arc::new(AllowListExecutor::new(
        ShellExecutor::new(),
        config.executor.allowed_commands.clone(),
    ));
    if !config.executor.allowed_commands.is_empty() {
        tracing::info!(allowed = ?config.executor.allowed_commands, "Command allow list enabled");
    }

    let mentions = match &config.slack.bot_user_id {
        Some(id) => MentionResolver::with_bot_id(bot.clone(), id.clone()),
        None => MentionResolver::new(bot.clone()),
    };
    let queue = Arc::new(CommandQueue::new());
    let commands = Arc::new(CommandService::new(bot.clone(), mentions, queue.clone()));

    let dispatcher = CommandDispatcher::new(queue, executor, bot)
        .with_interval(config.dispatcher.interval())
        .with_wake_on_enqueue(config.dispatcher.wake_on_enqueue);
    let dispatch_task = tokio::spawn(dispatcher.run());

    let state = WebhookState::new(SignatureVerifier::new(secret), commands);
    let app = webhook::router(&config.server.path, state);
    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.server.listen))?;
    tracing::info!(path = %config.server.path, "Accepting Slack events");

    let result = webhook::serve(listener, app, shutdown_signal()).await;
    dispatch_task.abort();
    result.context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
