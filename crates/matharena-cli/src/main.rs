//! matharena CLI — terminal front end for the MathArena quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use matharena_core::Route;

mod app;
mod commands;
mod input;

#[derive(Parser)]
#[command(name = "matharena", version, about = "Timed arithmetic quiz client")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the app at a route (/register, /login, /home)
    Open {
        /// Route to start from; unknown routes go to /register
        #[arg(default_value = "/")]
        path: String,
    },

    /// Create an account
    Register,

    /// Log in
    Login,

    /// Play a timed game
    Play,

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Whoami,

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("matharena=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Open { path } => commands::open::execute(&path, config).await,
        Commands::Register => commands::open::execute(Route::Register.path(), config).await,
        Commands::Login => commands::open::execute(Route::Login.path(), config).await,
        Commands::Play => commands::open::execute(Route::Home.path(), config).await,
        Commands::Logout => commands::logout::execute(config),
        Commands::Whoami => commands::whoami::execute(config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
