//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::env_config_adapter::{EnvConfigAdapter, LayeredConfig};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::mt5_bridge_adapter::StubMt5Bridge;
use crate::adapters::stripe_adapter::StripeAdapter;
use crate::adapters::supabase_adapter::SupabaseAdapter;
use crate::adapters::web::{AppState, UserRow, build_router, hash_password};
use crate::domain::error::TruefundedError;
use crate::domain::settings::{AuthSettings, Settings};
use crate::ports::config_port::ConfigPort;
use crate::ports::database_port::DatabasePort;

#[derive(Parser, Debug)]
#[command(name = "truefunded", about = "TrueFunded web front end and API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Overrides [server] bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// Validate configuration and print the resolved settings
    CheckConfig {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print every row of the users table
    ListUsers {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Output an argon2 hash for a password read from stdin
    HashPassword,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Serve { config, bind } => run_serve(config.as_deref(), bind),
        Command::CheckConfig { config } => run_check_config(config.as_deref()),
        Command::ListUsers { config } => run_list_users(config.as_deref()),
        Command::HashPassword => run_hash_password(),
    }
}

fn fail(err: &TruefundedError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

/// Loads `.env`, the optional INI file, and the process environment, with
/// environment values taking precedence.
pub fn load_config(path: Option<&Path>) -> Result<LayeredConfig, TruefundedError> {
    let _ = dotenvy::dotenv();
    let file = match path {
        Some(p) => Some(Box::new(FileConfigAdapter::from_file(p)?)
            as Box<dyn ConfigPort + Send + Sync>),
        None => None,
    };
    Ok(LayeredConfig::new(EnvConfigAdapter::from_env(), file))
}

pub fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_serve(config_path: Option<&Path>, bind: Option<String>) -> ExitCode {
    let loaded = load_config(config_path).and_then(|config| {
        let settings = Settings::from_config(&config)?;
        let auth = AuthSettings::from_config(&config)?;
        Ok((settings, auth))
    });
    let (mut settings, auth) = match loaded {
        Ok(v) => v,
        Err(e) => return fail(&e),
    };
    if let Some(bind) = bind {
        settings.bind_addr = bind;
    }

    init_tracing(&settings.log_level);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => return fail(&TruefundedError::from(e)),
    };
    match runtime.block_on(serve(settings, auth)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server stopped");
            fail(&e)
        }
    }
}

/// Wires the adapters into the router and serves until Ctrl-C.
pub async fn serve(settings: Settings, auth: AuthSettings) -> Result<(), TruefundedError> {
    let state = AppState {
        payments: Arc::new(StripeAdapter::from_settings(&settings)?),
        database: Arc::new(SupabaseAdapter::from_settings(&settings)?),
        bridge: Arc::new(StubMt5Bridge::new()),
        site_url: settings.site_url.clone(),
    };
    let router = build_router(state, &auth)?;

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        site_url = %settings.site_url,
        "listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

/// Human-readable summary of the resolved configuration, secrets redacted.
pub fn check_config_report(config: &dyn ConfigPort) -> Result<String, TruefundedError> {
    let settings = Settings::from_config(config)?;
    let mut report = format!("{settings:#?}\n");
    match AuthSettings::from_config(config) {
        Ok(auth) => report.push_str(&format!("{auth:#?}\n")),
        Err(TruefundedError::ConfigMissing { section, key }) => report.push_str(&format!(
            "auth: not configured, [{section}] {key} is missing (required by serve)\n"
        )),
        Err(e) => return Err(e),
    }
    Ok(report)
}

fn run_check_config(config_path: Option<&Path>) -> ExitCode {
    let report = load_config(config_path).and_then(|config| check_config_report(&config));
    match report {
        Ok(report) => {
            print!("{report}");
            eprintln!("Configuration is valid");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

/// Tab-separated email, balance and profit, one line per user.
pub fn format_user_lines(rows: &[UserRow]) -> Vec<String> {
    rows.iter()
        .map(|r| format!("{}\t{}\t{}", r.email, r.balance, r.profit))
        .collect()
}

fn run_list_users(config_path: Option<&Path>) -> ExitCode {
    let settings = match load_config(config_path).and_then(|c| Settings::from_config(&c)) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    init_tracing(&settings.log_level);

    let adapter = match SupabaseAdapter::from_settings(&settings) {
        Ok(a) => a,
        Err(e) => return fail(&e),
    };
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => return fail(&TruefundedError::from(e)),
    };
    let users = match runtime.block_on(adapter.list_users()) {
        Ok(u) => u,
        Err(e) => return fail(&e),
    };

    let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
    println!("email\tbalance\tprofit");
    for line in format_user_lines(&rows) {
        println!("{line}");
    }
    eprintln!("{} users", rows.len());
    ExitCode::SUCCESS
}

fn run_hash_password() -> ExitCode {
    eprintln!("Password (read from stdin):");
    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_line(&mut input) {
        return fail(&TruefundedError::from(e));
    }
    let password = input.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        eprintln!("error: empty password");
        return ExitCode::from(1);
    }
    match hash_password(password) {
        Ok(hash) => {
            println!("{hash}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}
