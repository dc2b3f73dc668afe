//! Confetti shower on the constrained profile.
//!
//! Press `c` to rain confetti, `b` for a burst at the cursor. The constrained
//! profile halves every spawn request and shortens lifetimes, the same
//! degradation a low-powered device gets.
//!
//! Run with: `cargo run --example confetti_shower`

use embers::app::App;
use embers::{DeviceProfile, EngineConfig, Palette};

fn main() {
    env_logger::init();

    let config = EngineConfig {
        palette: Palette::Celebration,
        profile: DeviceProfile::Constrained,
        ..EngineConfig::default()
    };

    if let Err(e) = App::run(config) {
        eprintln!("Event loop error: {e}");
    }
}
