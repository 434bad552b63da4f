mod cli;
mod infra;
mod report;
mod routes;
mod server;

use hse_rating::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
