use chrono::Local;
use clap::Parser;
use std::process::ExitCode;
use temposaurus_lib::config::Cli;
use temposaurus_lib::services::Pipeline;

#[tokio::main]
async fn main() -> ExitCode {
    temposaurus_lib::init_logging();

    log::info!("Temposaurus {} starting...", env!("CARGO_PKG_VERSION"));

    let config = match Cli::parse().into_config(Local::now().date_naive()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut pipeline = Pipeline::new(&config);
    match pipeline.run().await {
        Ok(report) => {
            print!("{}", report.render());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
