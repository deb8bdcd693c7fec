use room_scheduler::{
    configuration::Configuration, configuration_handler::ConfigurationHandler, console,
    http::HttpReservationApi, scheduler::Scheduler,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let api = match HttpReservationApi::new(&configuration.api_url()) {
        Ok(api) => api,
        Err(err) => {
            error!(%err, "Cannot use the configured reservation service");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    info!(url = %api.base_url(), "Using reservation service");

    let mut scheduler = Scheduler::new(api);
    // Failures are shown in the banner of the first screen.
    let _ = scheduler.load().await;

    if let Err(err) = console::run(&mut scheduler, &configuration.title()).await {
        error!(?err, "Console I/O failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
