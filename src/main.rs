use clap::Parser;
use ubci::adapter::inbound::cli::command::Cli;
use ubci::adapter::inbound::cli::run;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    run::execute(cli).await?;
    Ok(())
}
