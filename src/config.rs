use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Fixed strike grid served by the HTTP routes.
pub struct GridConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

pub const STRIKE_GRID: GridConfig = GridConfig {
    start: 20000.0,
    end: 25000.0,
    step: 100.0,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Parser)]
#[command(name = "payoff_server", about = "Option strategy payoff charts over HTTP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Runs `serve` with its defaults when no subcommand was given.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the payoff API and the dashboard page.
    Serve(ServeArgs),
    /// Print a simulated live feed of payoff readouts.
    Stream(StreamArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServeArgs {
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[derive(Debug, Clone, Args)]
pub struct StreamArgs {
    /// Base target price that each tick perturbs.
    #[arg(long, default_value_t = 23721)]
    pub target: i64,
    #[arg(long, default_value_t = 1)]
    pub expiry_days: i64,
    /// Expiry date (YYYY-MM-DD); takes precedence over `--expiry-days`.
    #[arg(long)]
    pub expiry_date: Option<NaiveDate>,
    #[arg(long, default_value_t = 10)]
    pub iterations: usize,
    /// Delay between ticks, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,
    /// Largest absolute offset applied to the target on a tick.
    #[arg(long, default_value_t = 50)]
    pub jitter: i64,
    #[arg(long)]
    pub seed: Option<u64>,
}
