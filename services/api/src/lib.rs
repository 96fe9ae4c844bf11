mod cli;
mod infra;
mod routes;
mod server;
mod students;

use student_marks::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
