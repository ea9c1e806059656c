use tracing_subscriber::EnvFilter;
use vitrine::{AppConfig, DemoError, MuseumDemo};

fn main() -> Result<(), DemoError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("museum starting");

    vitrine::run::<MuseumDemo>(AppConfig::new().title("Museum").size(1024, 768))
}
