use embers::app::App;
use embers::EngineConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match EngineConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    if let Err(e) = App::run(config) {
        log::error!("Event loop error: {e}");
        std::process::exit(1);
    }
}
