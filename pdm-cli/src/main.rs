//! PDM CLI - serves the corridor monitoring dashboard.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "pdm-cli",
    version,
    about = "PDM corridor GNSS and blast vibration dashboard"
)]
struct Cli {
    #[command(flatten)]
    serve: pdm_server::config::ServeArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    pdm_server::run(cli.serve).await
}
