//! ListenDrift CLI entry point

use std::process::ExitCode;

use clap::Parser;

use listendrift::cli::{
    app::{load_merged_config, run_analyze, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{AnalyzeOptions, AnalyzeSource, Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use listendrift::domain::audience::Audience;
use listendrift::domain::config::AppConfig;
use listendrift::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        api_base_url: cli.api_url.clone(),
        audience: cli
            .audience
            .map(|a| Audience::from(a).key().to_string()),
        ..Default::default()
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let source = if cli.record {
        AnalyzeSource::Record
    } else {
        match cli.file {
            Some(path) => AnalyzeSource::File(path),
            None => {
                presenter.error("Nothing to analyze. Pass an audio file or use --record.");
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        }
    };

    let options = AnalyzeOptions {
        source,
        audience: cli.audience.map(Audience::from),
        report: cli.report,
    };

    run_analyze(options, config).await
}
