use crate::server;
use clap::{Args, Parser, Subcommand};
use talentgate::auth;
use talentgate::config::AppConfig;
use talentgate::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talentgate",
    about = "Run the Talentgate recruiting backend from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Mint an access token for local development and websocket testing
    Token(TokenArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct TokenArgs {
    /// User id the token is issued for (becomes the token subject)
    #[arg(long)]
    user_id: i64,
    /// Optional role claim, e.g. Admin
    #[arg(long)]
    role: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Token(args) => mint_token(args),
    }
}

fn mint_token(args: TokenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let token = auth::issue_token(
        &config.auth,
        &args.user_id.to_string(),
        args.role.as_deref(),
    )?;
    println!("{token}");
    Ok(())
}
