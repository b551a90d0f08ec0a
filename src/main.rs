use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use tryiton_lib::bootstrap::tracing::init_tracing_subscriber;
use tryiton_lib::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();

    if let Err(err) = init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    let cli = Cli::parse();
    match cli::execute(cli).await {
        Ok(code) => code,
        Err(err) => {
            error!(error = ?err, "tryiton failed");
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}
