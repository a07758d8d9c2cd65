use std::sync::Arc;

use chatdesk::commands::{Command, HELP, parse_command};
use chatdesk::config::{ConfigError, DeskConfig};
use chatdesk::controller::Controller;
use chatdesk::net::HttpBackend;
use chatdesk::net::types::ApiError;
use chatdesk::ui::Slot;
use chatdesk::ui::terminal::TerminalSurface;
use clap::Parser;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Client(#[from] ApiError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input task failed: {0}")]
    Input(#[from] tokio::task::JoinError),
}

/// Flags override the `CHATDESK_*` environment (and `.env`).
#[derive(Parser, Debug)]
#[command(name = "chatdesk", about = "Terminal host for the rates-page AI assistant")]
struct Cli {
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long)]
    context_capacity: Option<u64>,

    /// Treat the session as already signed in.
    #[arg(long)]
    authenticated: bool,

    #[arg(long)]
    user: Option<String>,

    #[arg(short, long, env = "CHATDESK_VERBOSE")]
    verbose: bool,
}

impl Cli {
    fn apply(self, mut config: DeskConfig) -> Result<DeskConfig, ConfigError> {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(capacity) = self.context_capacity {
            config.context_capacity = capacity;
        }
        if self.authenticated {
            config.initially_authenticated = true;
        }
        if let Some(user) = self.user {
            config.session_user = Some(user);
        }
        config.validated()
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();

    let config = cli.apply(DeskConfig::from_env()?)?;
    let backend = Arc::new(HttpBackend::new(&config.base_url)?);
    let surface = Arc::new(TerminalSurface::stdio());
    let controller = Controller::new(backend, surface.clone(), config);

    println!("{HELP}");
    run(&controller, &surface).await
}

type StdioSurface = TerminalSurface<std::io::Stdout, std::io::BufReader<std::io::Stdin>>;

/// Read the next command line off the runtime's worker threads.
async fn next_line(surface: &Arc<StdioSurface>) -> Result<Option<String>, CliError> {
    let surface = Arc::clone(surface);
    Ok(tokio::task::spawn_blocking(move || surface.read_line("> ")).await??)
}

async fn run(controller: &Controller, surface: &Arc<StdioSurface>) -> Result<(), CliError> {
    while let Some(line) = next_line(surface).await? {
        // Outcomes are already on screen; the returned errors only feed the log.
        match parse_command(&line) {
            Command::OpenLogin => controller.open_login(),
            Command::CloseLogin => controller.close_login(),
            Command::Login { username, password } => {
                let _ = controller.submit_login(Slot::LoginButton, &username, &password).await;
            }
            Command::ClearContext => {
                let _ = controller.clear_context(Slot::ClearContextButton).await;
            }
            Command::RefreshContext => {
                let _ = controller.refresh_context_info(None).await;
            }
            Command::ResetAnswer => controller.clear_answer(Slot::QuestionInput),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Ask(question) => {
                if !controller.auth().is_authenticated() {
                    println!("Sign in first: /login <username> <password>");
                    continue;
                }
                let _ = controller.ask_ai(Slot::AskButton, &question).await;
            }
            Command::Unknown(name) => println!("unknown command /{name}; try /help"),
        }
    }
    Ok(())
}
