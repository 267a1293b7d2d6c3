use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    // Key reports go to stdout; diagnostics stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = tecla::app::run(tecla::Config::default()) {
        error!("{err}");
        std::process::exit(2);
    }
}
