use clap::Parser;
use trailcut::cli::{self, Cli};
use trailcut::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format)?;
    tracing::debug!(
        version = trailcut::VERSION,
        build_date = trailcut::BUILD_DATE,
        "trailcut starting"
    );
    cli::run(cli)
}
