use crate::configuration::Configuration;
use clap::Parser;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TITLE: &str = "Room & Lab Scheduling";

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Schedule rooms and labs against a reservation service")]
pub struct ConfigurationHandler {
    /// Base address of the reservation service
    #[arg(long, env = "RESERVATIONS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Heading shown above the reservation table
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn api_url(&self) -> String {
        self.api_url.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}
