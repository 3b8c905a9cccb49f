use stockroom_cli::{AppConfig, run_demo};

fn main() {
    let config = AppConfig::default();
    stockroom_observability::init(&config.log);

    if let Err(err) = run_demo(&config, &mut std::io::stdout().lock()) {
        tracing::error!("demo output failed: {err:#}");
    }
}
