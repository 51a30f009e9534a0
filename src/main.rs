//! Pondwire demo binary entry point.

use pondwire::cli::{demo, Cli};
use pondwire::config::SessionConfig;
use pondwire::session::SessionDriver;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(filter) = cli.log_filter() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .init();
    }

    let config = SessionConfig::from_env()
        .with_model(cli.model)
        .with_beta_header(cli.use_beta_header);

    let registry = demo::inventory_registry();
    let turns = demo::demo_turns();

    let driver = SessionDriver::connect(&config, registry).await?;
    driver
        .run(&turns, |index, script, outcome| {
            println!("\n=== Turn {} ===", index + 1);
            println!("User: {}", script.prompt);
            println!("Assistant: {}", outcome.assistant_text);
        })
        .await?;

    Ok(())
}
