mod batch;
mod commands;
mod config;
mod display;
mod error;
mod github;
mod issue;
mod logging;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gitissuehelper",
    version,
    about = "Create GitHub issues across multiple repositories",
    long_about = "gitissuehelper creates the same issue in many repositories of a GitHub organization.\n\
                  It supports batch issue creation with customizable titles, descriptions, and labels."
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
pub struct GlobalOpts {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Show verbose output (rate limits)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// GitHub API base URL
    #[arg(long, global = true, hide = true, env = "GITISSUEHELPER_API_URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a GitHub personal access token for later runs
    Auth {
        /// Token to use (if omitted, prompts interactively)
        #[arg(long)]
        token: Option<String>,
    },
    /// Create issues in repositories
    Create(commands::create::CreateArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging();

    let result = match &cli.command {
        Commands::Auth { token } => commands::auth::run(token, &cli.global).await,
        Commands::Create(args) => commands::create::run(args, &cli.global).await,
    };

    if let Err(e) = result {
        display::error(&e.to_string());
        std::process::exit(1);
    }
}
