//! Behavior tree demo binary.
//!
//! Drives a guard tree for a fixed number of ticks and logs the root status
//! after each one. Run with `RUST_LOG=debug` to also print the full tree
//! snapshot per tick, or `RUST_LOG=behavior_tree=trace` to follow every visit.
//!
//! # Examples
//!
//! ```bash
//! BT_DEMO_TICKS=40 BT_DEMO_SEED=3 cargo run -p bt-demo
//! ```

mod config;
mod guard;

use anyhow::Result;
use behavior_tree::Behavior;

use crate::config::DemoConfig;
use crate::guard::Guard;

/// Ticks in an intruder cycle; the intruder shows up near its end.
const INTRUDER_CYCLE: u32 = 8;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::from_env();
    tracing::info!("Starting behavior tree demo");
    tracing::info!("Config: {:?}", config);

    let mut tree = guard::build_tree(config.seed, config.rest_time)?;
    let mut guard = Guard::new();

    for tick in 0..config.ticks {
        guard.intruder_visible = matches!(tick % INTRUDER_CYCLE, 5 | 6);

        let status = tree.try_visit(config.elapsed, &mut guard)?;
        tracing::info!(
            tick,
            %status,
            position = guard.position,
            stamina = guard.stamina,
            ammo = guard.ammo,
            "tick complete"
        );
        tracing::debug!("tree state:\n{}", tree.state());
    }

    tracing::info!(
        shots = guard.shots,
        aim_high = guard.aim_high,
        aim_low = guard.aim_low,
        "Demo finished"
    );
    Ok(())
}
