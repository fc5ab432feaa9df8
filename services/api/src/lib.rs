mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use campus_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
