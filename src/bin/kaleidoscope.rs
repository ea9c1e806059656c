use tracing_subscriber::EnvFilter;
use vitrine::{AppConfig, DemoError, KaleidoscopeDemo};

fn main() -> Result<(), DemoError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("kaleidoscope starting");

    vitrine::run::<KaleidoscopeDemo>(AppConfig::new().title("Kaleidoscope").size(1280, 720))
}
