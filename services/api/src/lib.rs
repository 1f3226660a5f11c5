mod cli;
mod infra;
mod routes;
mod server;
mod ws;

use talentgate::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
