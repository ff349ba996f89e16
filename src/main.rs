use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use todo_desk::api::ApiClient;
use todo_desk::commands;
use todo_desk::config::ClientSettings;
use todo_desk::console::run_console;

const LOG_FILE_PREFIX: &str = "todo_desk.log";

#[derive(Debug, Parser)]
#[command(
    name = "todo_desk",
    about = "Native console for the machine-info and todos backend"
)]
struct Cli {
    /// Backend origin; overrides API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the native console (default).
    Console,
    /// Fetch machine info once and print it.
    MachineInfo,
    /// Manage todos from the command line.
    Todos {
        #[command(subcommand)]
        command: TodoCommands,
    },
}

#[derive(Debug, Subcommand)]
enum TodoCommands {
    /// List todos in server order.
    List,
    /// Create a todo.
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Mark a todo as done.
    Done { id: String },
    /// Mark a todo as not done.
    Undone { id: String },
    /// Replace a todo's title and description.
    Edit {
        id: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a todo.
    Delete {
        id: String,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Tracing comes after settings: the file layer needs TODO_DESK_LOG_DIR
    // and TODO_DESK_FILE_LOG. Config errors surface through `main`'s Result.
    let settings = ClientSettings::from_env()
        .context("failed to load configuration")?
        .with_api_url_override(cli.api_url);
    let _file_log_guard = init_tracing(&settings)?;

    let client = ApiClient::from_settings(&settings);
    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => run_console(&settings)?,
        Commands::MachineInfo => commands::print_machine_info(&client).await?,
        Commands::Todos { command } => match command {
            TodoCommands::List => commands::print_todos(&client).await?,
            TodoCommands::Add { title, description } => {
                commands::add_todo(&client, &title, description.as_deref()).await?
            }
            TodoCommands::Done { id } => commands::set_done(&client, &id, true).await?,
            TodoCommands::Undone { id } => commands::set_done(&client, &id, false).await?,
            TodoCommands::Edit {
                id,
                title,
                description,
            } => commands::edit_todo(&client, &id, &title, description.as_deref()).await?,
            TodoCommands::Delete { id, yes } => commands::delete_todo(&client, &id, yes).await?,
        },
    }

    Ok(())
}

fn init_tracing(settings: &ClientSettings) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,todo_desk=debug"));
    let stderr_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let (file_layer, guard) = match &settings.log_dir {
        Some(log_dir) => {
            let file_filter = EnvFilter::try_new(&settings.file_log_filter).with_context(|| {
                format!(
                    "failed to parse TODO_DESK_FILE_LOG `{}`",
                    settings.file_log_filter
                )
            })?;
            let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(guard)
}
