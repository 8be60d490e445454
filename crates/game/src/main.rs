//! fps_sandbox: headless first-person movement sandbox.
//!
//! Builds a small level (floor, back wall, ball, goal), spawns one agent with a
//! first-person controller and replays a scripted input session through the
//! same event path a window system would use.

mod config;
mod sandbox;
mod script;

use anyhow::Result;
use glam::Vec3;

use config::GameConfig;
use sandbox::Sandbox;
use script::InputScript;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load();
    if !std::path::Path::new("config.ron").exists() {
        // First run: write defaults so they can be tuned.
        config.save();
    }
    config.movement.validate()?;

    log::info!(
        "Starting fps_sandbox: {} ticks at {} Hz",
        config.session.ticks,
        config.session.tick_hz
    );

    let mut sandbox = Sandbox::new(config)?;
    sandbox.kick_ball(Vec3::new(0.0, 0.0, -0.4));
    match sandbox.run(&InputScript::demo()) {
        Some(report) => log::info!(
            "final: pos=({:.2}, {:.2}, {:.2}) facing=({:.2}, {:.2}) yaw={:.1} pitch={:.1} {:?} grounded={}",
            report.position.x,
            report.position.y,
            report.position.z,
            report.facing.x,
            report.facing.z,
            report.yaw_degrees,
            report.pitch_degrees,
            report.posture,
            report.grounded,
        ),
        None => log::warn!("agent vanished before the session ended"),
    }
    log::info!("score: {}", sandbox.score());

    Ok(())
}
