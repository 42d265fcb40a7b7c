use std::env;
use std::path::PathBuf;
use tracing::info;

mod app;
mod config;
mod error;

const DEFAULT_CONFIG: &str = "assets/config/demo.ini";

fn main() {
    tracing_subscriber::fmt::init();
    info!("Begin log");

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let result = config::Config::load(&path)
        .and_then(app::App::new)
        .and_then(|mut app| app.run());

    if let Err(e) = result {
        panic!("The app failed: {:?}", e);
    }
}
