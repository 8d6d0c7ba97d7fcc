use clap::Parser;
use flight_performance::cli::{run, Cli};
use flight_performance::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
