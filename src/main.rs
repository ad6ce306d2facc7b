use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use indot_query::cli::Args;
use indot_query::commands::Context;
use indot_query::config::ConfigFile;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "indot_query=warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = ConfigFile::resolve(args.config.as_deref())?;
    let ctx = Context::from_config(config)?;
    let output = args.command.run(&ctx, args.format).await?;
    println!("{}", output);
    Ok(())
}
