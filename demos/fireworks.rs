//! Fireworks: ember colors, heavier gravity, a larger budget.
//!
//! Click to launch an explosion at the cursor; press `f` for a fountain.
//!
//! Run with: `cargo run --example fireworks`

use embers::app::App;
use embers::{EngineConfig, Palette, ValueRange};

fn main() {
    env_logger::init();

    let config = EngineConfig {
        max_particles: 300,
        pool_capacity: 200,
        palette: Palette::Ember,
        speed: ValueRange::new(2.0, 5.5),
        lifetime: ValueRange::new(1.2, 2.4),
        gravity: 0.18,
        ..EngineConfig::default()
    };

    if let Err(e) = App::run(config) {
        eprintln!("Event loop error: {e}");
    }
}
