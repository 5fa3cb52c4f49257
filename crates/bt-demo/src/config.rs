//! Demo configuration loaded from the environment.
use std::env;

/// Settings for a demo run.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    /// Number of ticks to drive the tree for.
    pub ticks: u32,
    /// Elapsed time passed with every tick.
    pub elapsed: i64,
    /// Seed for the tree's random choices.
    pub seed: u64,
    /// Time the guard rests before patrolling again.
    pub rest_time: i64,
}

impl DemoConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `BT_DEMO_TICKS` - Ticks to run (default: 20)
    /// - `BT_DEMO_ELAPSED` - Elapsed time per tick (default: 1)
    /// - `BT_DEMO_SEED` - Random seed (default: 7)
    /// - `BT_DEMO_REST_TIME` - Rest duration (default: 3)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ticks) = read_env::<u32>("BT_DEMO_TICKS") {
            config.ticks = ticks;
        }
        if let Some(elapsed) = read_env::<i64>("BT_DEMO_ELAPSED") {
            config.elapsed = elapsed.max(0);
        }
        if let Some(seed) = read_env::<u64>("BT_DEMO_SEED") {
            config.seed = seed;
        }
        if let Some(rest_time) = read_env::<i64>("BT_DEMO_REST_TIME") {
            config.rest_time = rest_time.max(0);
        }

        config
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ticks: 20,
            elapsed: 1,
            seed: 7,
            rest_time: 3,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
