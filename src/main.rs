mod chart;
mod config;
mod error;
mod payoff;
mod server;
mod stream;
mod table;

use clap::Parser;

use config::{Cli, Command};

#[actix_rt::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().into_command() {
        Command::Serve(args) => server::run(args).await?,
        Command::Stream(args) => stream::run(args)?,
    }

    Ok(())
}
