use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use clap::{Args, Parser, Subcommand};
use portfolio::config::{ClientConfig, ConfigError};
use portfolio::net::api::ApiClient;
use portfolio::net::transport::{ReqwestTransport, TransportError};
use portfolio::pages::dashboard::render_dashboard;
use portfolio::pages::login::render_login;
use portfolio::state::auth::{AuthFlow, AuthMode, AuthState, SubmitOutcome};
use portfolio::state::dashboard::DashboardLoader;
use portfolio::state::token_store::{FileTokenStore, StoreError, TokenStore};
use portfolio::util::navigate::{DASHBOARD_ROUTE, LOGIN_ROUTE};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Auth(String),
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

#[derive(Parser, Debug)]
#[command(name = "portfolio", about = "Real-estate portfolio client")]
struct Cli {
    #[arg(long, env = "PORTFOLIO_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "PORTFOLIO_TOKEN_PATH")]
    token_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and open the dashboard.
    Login(Credentials),
    /// Create an account; sign in separately afterwards.
    Register(Credentials),
    /// Forget the stored session.
    Logout,
    /// Report whether a session is stored.
    Status,
    /// Show portfolio stats and recent properties.
    Dashboard,
}

#[derive(Args, Debug)]
struct Credentials {
    #[arg(long, env = "PORTFOLIO_EMAIL")]
    email: String,

    #[arg(long, env = "PORTFOLIO_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        tracing::warn!(error = %e, ".env could not be loaded");
    }

    let cli = Cli::parse();
    let config = ClientConfig::new(cli.api_url.as_deref(), cli.token_path)?;
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.token_path));
    let transport = Arc::new(ReqwestTransport::new()?);
    let api = ApiClient::new(config.api_url.as_str(), transport, tokens.clone());
    tracing::debug!(api_url = %config.api_url, token_path = %config.token_path.display(), "client configured");

    match cli.command {
        Command::Login(credentials) => run_auth(&api, AuthMode::Login, credentials).await,
        Command::Register(credentials) => run_auth(&api, AuthMode::Register, credentials).await,
        Command::Logout => run_logout(tokens.as_ref()),
        Command::Status => run_status(tokens.as_ref()),
        Command::Dashboard => open_route(&api, DASHBOARD_ROUTE).await,
    }
}

async fn run_auth(api: &ApiClient, mode: AuthMode, credentials: Credentials) -> Result<(), CliError> {
    let pending = Arc::new(Mutex::new(None::<String>));
    let sink = pending.clone();
    let flow = AuthFlow::new(api.clone(), move |path: &str| {
        *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_owned());
    });

    if mode == AuthMode::Register {
        flow.toggle_mode();
    }
    flow.set_email(credentials.email);
    flow.set_password(credentials.password);

    match flow.submit().await {
        SubmitOutcome::Authenticated => println!("Signed in."),
        SubmitOutcome::Registered => print!("{}", render_login(&flow.state())),
        SubmitOutcome::Failed(message) => {
            eprint!("{}", render_login(&flow.state()));
            return Err(CliError::Auth(message));
        }
        SubmitOutcome::Ignored => {}
    }

    let route = pending
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if let Some(route) = route {
        open_route(api, &route).await?;
    }
    Ok(())
}

async fn open_route(api: &ApiClient, route: &str) -> Result<(), CliError> {
    match route {
        DASHBOARD_ROUTE => {
            let state = DashboardLoader::new(api.clone()).mount().await;
            print!("{}", render_dashboard(&state));
            Ok(())
        }
        LOGIN_ROUTE => {
            print!("{}", render_login(&AuthState::default()));
            Ok(())
        }
        other => Err(CliError::UnknownRoute(other.to_owned())),
    }
}

fn run_logout(tokens: &dyn TokenStore) -> Result<(), CliError> {
    tokens.clear()?;
    println!("Signed out.");
    Ok(())
}

fn run_status(tokens: &dyn TokenStore) -> Result<(), CliError> {
    match tokens.load()? {
        Some(_) => println!("Signed in."),
        None => println!("Not signed in. Run `portfolio login` first."),
    }
    Ok(())
}
