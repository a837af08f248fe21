use anyhow::Result;
use banca::cli::Cli;
use clap::Parser;
use simple_logger::SimpleLogger;

fn main() -> Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new()
        .with_level(cli.log_level())
        .env()
        .init()?;

    cli.run()
}
