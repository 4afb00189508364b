use clap::Parser;
use mcp_prompt_client::{Cli, run};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    run(cli).await
}
