use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use ui5_version_check::action::{ActionEnvironment, run_action};
use ui5_version_check::cli::Cli;
use ui5_version_check::logging;
use ui5_version_check::version::quarter::QuarterResolver;
use ui5_version_check::version::source::HttpCatalogSource;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_json, cli.log_file.as_deref())?;

    let config = cli.to_config();
    let source = HttpCatalogSource::new(&cli.overview_url)?;
    let resolver = Arc::new(QuarterResolver::system());
    let env = ActionEnvironment::from_env();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // Reported once through the subscriber, which may be writing JSON
    if let Err(e) = runtime.block_on(run_action(&config, &source, resolver, &env)) {
        error!("{}", e);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
